//! 级联删除协调器
//!
//! 没有跨表事务，每个根事件被拆成一串各自幂等、顺序无关的步骤，
//! 中途失败后重跑同一逻辑操作即可补完。统一的重解析策略：所有
//! 收缩路径都先按"变更后"的成员关系重新解析注册集合，再决定删
//! 哪些行，学生经由其他批次或课程保持注册的记录一律不动。

use tracing::{info, warn};

use crate::errors::Result;
use crate::services::{enrollment, sync};
use crate::storage::Storage;

/// 学生加入批次，随之为批次挂接课程的每个任务补占位行
///
/// 已在批次中返回 Ok(false)，不重复铺行（铺了也会被唯一索引拦下）。
pub async fn enroll_student(
    storage: &dyn Storage,
    batch_id: i64,
    student_id: i64,
) -> Result<bool> {
    let newly_added = storage.add_student_to_batch(batch_id, student_id).await?;
    if !newly_added {
        return Ok(false);
    }

    for course_id in storage.list_course_ids_of_batch(batch_id).await? {
        for task in storage.list_tasks_by_course(course_id).await? {
            sync::create_missing_grades(storage, task.id, course_id, &[student_id]).await?;
        }
    }

    info!("Student {} enrolled into batch {}", student_id, batch_id);
    Ok(true)
}

/// 学生退出批次，失去注册资格的任务行连同提交一起收缩
pub async fn unenroll_student(
    storage: &dyn Storage,
    batch_id: i64,
    student_id: i64,
) -> Result<bool> {
    let removed = storage
        .remove_student_from_batch(batch_id, student_id)
        .await?;
    if !removed {
        return Ok(false);
    }

    // 变更后重解析：学生可能经由其他批次仍注册在同一课程
    for course_id in storage.list_course_ids_of_batch(batch_id).await? {
        if enrollment::is_student_enrolled(storage, student_id, course_id).await? {
            continue;
        }
        for task in storage.list_tasks_by_course(course_id).await? {
            storage
                .delete_submissions_for_students(task.id, &[student_id])
                .await?;
            sync::delete_obsolete_grades(storage, task.id, &[student_id]).await?;
        }
    }

    info!("Student {} unenrolled from batch {}", student_id, batch_id);
    Ok(true)
}

/// 课程批次挂接/摘除，然后按变更后的注册集合全量对账
pub async fn change_course_batches(
    storage: &dyn Storage,
    course_id: i64,
    added_batch_ids: &[i64],
    removed_batch_ids: &[i64],
) -> Result<()> {
    for &batch_id in added_batch_ids {
        storage.attach_batch_to_course(course_id, batch_id).await?;
    }
    for &batch_id in removed_batch_ids {
        storage.detach_batch_from_course(course_id, batch_id).await?;
    }

    sync::sync_grades_for_course_batch_change(storage, course_id).await
}

/// 删除学生：成员关系、提交、成绩、本体，四步皆幂等
pub async fn delete_student(storage: &dyn Storage, student_id: i64) -> Result<bool> {
    if storage.get_student_by_id(student_id).await?.is_none() {
        return Ok(false);
    }

    storage.remove_student_from_all_batches(student_id).await?;
    let submissions = storage.delete_submissions_by_student(student_id).await?;
    let grades = storage.delete_grades_by_student(student_id).await?;
    let deleted = storage.delete_student_row(student_id).await?;

    info!(
        "Student {} deleted ({} submission(s), {} grade(s) cascaded)",
        student_id, submissions, grades
    );
    Ok(deleted)
}

/// 删除批次
///
/// 先从所有课程摘除，再对每个受影响课程按变更后的注册集合对账，
/// 经由其他批次仍注册的学生记录不受波及，最后清成员、删本体。
pub async fn delete_batch(storage: &dyn Storage, batch_id: i64) -> Result<bool> {
    if storage.get_batch_by_id(batch_id).await?.is_none() {
        return Ok(false);
    }

    let affected_courses = storage.list_course_ids_of_batch(batch_id).await?;

    storage.detach_batch_from_all_courses(batch_id).await?;
    for course_id in &affected_courses {
        sync::reconcile_course(storage, *course_id).await?;
    }

    storage.clear_batch_students(batch_id).await?;
    let deleted = storage.delete_batch_row(batch_id).await?;

    info!(
        "Batch {} deleted, {} course(s) reconciled",
        batch_id,
        affected_courses.len()
    );
    Ok(deleted)
}

/// 删除课程：成绩按冗余 course_id 整删，任务与提交逐个清掉
pub async fn delete_course(storage: &dyn Storage, course_id: i64) -> Result<bool> {
    if storage.get_course_by_id(course_id).await?.is_none() {
        return Ok(false);
    }

    storage.delete_grades_by_course(course_id).await?;

    let tasks = storage.list_tasks_by_course(course_id).await?;
    for task in &tasks {
        storage.delete_submissions_by_task(task.id).await?;
        storage.delete_task_row(task.id).await?;
    }

    storage.clear_course_batches(course_id).await?;
    storage.clear_course_faculty(course_id).await?;
    let deleted = storage.delete_course_row(course_id).await?;

    info!("Course {} deleted with {} task(s)", course_id, tasks.len());
    Ok(deleted)
}

/// 删除任务：成绩、提交、本体
pub async fn delete_task(storage: &dyn Storage, task_id: i64) -> Result<bool> {
    if storage.get_task_by_id(task_id).await?.is_none() {
        return Ok(false);
    }

    storage.delete_grades_by_task(task_id).await?;
    storage.delete_submissions_by_task(task_id).await?;
    let deleted = storage.delete_task_row(task_id).await?;

    if !deleted {
        // 并发删除同一任务时另一方已经删掉本体
        warn!("Task {} row already gone during cascade", task_id);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::submissions::submit::submit_or_update;
    use crate::services::testutil::{seed_batch, seed_course, seed_student, seed_task};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_enroll_student_grows_placeholders() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS301").await;
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;

        assert!(enroll_student(&storage, batch, a).await.unwrap());
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );

        // 重复加入幂等
        assert!(!enroll_student(&storage, batch, a).await.unwrap());
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
    }

    #[tokio::test]
    async fn test_unenroll_respects_other_batches() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b1 = seed_batch(&storage, "b1").await;
        let b2 = seed_batch(&storage, "b2").await;
        let course = seed_course(&storage, "CS302").await;
        storage.attach_batch_to_course(course, b1).await.unwrap();
        storage.attach_batch_to_course(course, b2).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;

        enroll_student(&storage, b1, a).await.unwrap();
        enroll_student(&storage, b2, a).await.unwrap();

        // 退出 b1：经由 b2 仍注册，占位行保留
        unenroll_student(&storage, b1, a).await.unwrap();
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );

        // 退出 b2：彻底失去注册，占位行消失
        unenroll_student(&storage, b2, a).await.unwrap();
        assert!(
            storage
                .list_graded_student_ids(task.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_delete_student_cascades() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS303").await;
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        enroll_student(&storage, batch, a).await.unwrap();

        assert!(delete_student(&storage, a).await.unwrap());
        assert!(storage.get_student_by_id(a).await.unwrap().is_none());
        assert!(
            storage
                .list_graded_student_ids(task.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            storage
                .list_student_ids_of_batch(batch)
                .await
                .unwrap()
                .is_empty()
        );

        // 再删一次：目标已不存在
        assert!(!delete_student(&storage, a).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_batch_reconciles_courses() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let doomed = seed_batch(&storage, "doomed").await;
        let survivor = seed_batch(&storage, "survivor").await;
        let course = seed_course(&storage, "CS304").await;
        storage.attach_batch_to_course(course, doomed).await.unwrap();
        storage
            .attach_batch_to_course(course, survivor)
            .await
            .unwrap();
        let task = seed_task(&storage, course, "hw1").await;

        // alice 两个批次都在，bob 只在将被删除的批次
        enroll_student(&storage, doomed, a).await.unwrap();
        enroll_student(&storage, survivor, a).await.unwrap();
        enroll_student(&storage, doomed, b).await.unwrap();

        assert!(delete_batch(&storage, doomed).await.unwrap());

        // bob 的占位行消失，alice 经由幸存批次保持注册
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
        assert!(storage.get_batch_by_id(doomed).await.unwrap().is_none());
        assert_eq!(
            storage.list_batch_ids_of_course(course).await.unwrap(),
            vec![survivor]
        );
    }

    #[tokio::test]
    async fn test_delete_task_cascades() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS305").await;
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        enroll_student(&storage, batch, a).await.unwrap();

        assert!(delete_task(&storage, task.id).await.unwrap());
        assert!(storage.get_task_by_id(task.id).await.unwrap().is_none());
        assert!(
            storage
                .get_grade_by_task_and_student(task.id, a)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_detach_sweeps_orphan_submissions() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let b1 = seed_batch(&storage, "b1").await;
        let b2 = seed_batch(&storage, "b2").await;
        let course = seed_course(&storage, "CS307").await;
        change_course_batches(&storage, course, &[b1, b2], &[])
            .await
            .unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        enroll_student(&storage, b1, a).await.unwrap();
        enroll_student(&storage, b2, b).await.unwrap();

        let now = chrono::Utc::now();
        submit_or_update(&storage, task.id, a, "alice answer".to_string(), &[], now)
            .await
            .unwrap();
        let kept = submit_or_update(&storage, task.id, b, "bob answer".to_string(), &[], now)
            .await
            .unwrap();

        // 摘除 b1：alice 失去注册，成绩行和提交一起消失
        change_course_batches(&storage, course, &[], &[b1])
            .await
            .unwrap();
        assert!(
            storage
                .get_grade_by_task_and_student(task.id, a)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .get_submission_by_task_and_student(task.id, a)
                .await
                .unwrap()
                .is_none()
        );

        // bob 经由 b2 保持注册，提交原样保留
        assert_eq!(
            storage
                .get_submission_by_task_and_student(task.id, b)
                .await
                .unwrap()
                .unwrap()
                .id,
            kept.id
        );
    }

    /// 端到端场景：挂接、摘除、删除课程的完整走查
    #[tokio::test]
    async fn test_attach_detach_delete_scenario() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "ann").await;
        let b = seed_student(&storage, "ben").await;
        let c = seed_student(&storage, "cai").await;
        let b1 = seed_batch(&storage, "b1").await;
        let b2 = seed_batch(&storage, "b2").await;
        let course = seed_course(&storage, "CS306").await;

        storage.add_student_to_batch(b1, a).await.unwrap();
        storage.add_student_to_batch(b1, b).await.unwrap();
        storage.add_student_to_batch(b2, c).await.unwrap();
        storage.attach_batch_to_course(course, b1).await.unwrap();

        // 建任务：b1 的两人拿到 Pending 占位
        let task = seed_task(&storage, course, "hw1").await;
        sync::sync_grades_for_task_creation(&storage, &task)
            .await
            .unwrap();
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a, b]
        );

        // 挂接 b2：c 的占位行出现
        change_course_batches(&storage, course, &[b2], &[]).await.unwrap();
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a, b, c]
        );

        // 摘除 b1：a、b 失去注册，c 保留
        change_course_batches(&storage, course, &[], &[b1]).await.unwrap();
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![c]
        );

        // 删除课程：任务、占位行、提交全部消失
        assert!(delete_course(&storage, course).await.unwrap());
        assert!(storage.get_task_by_id(task.id).await.unwrap().is_none());
        assert!(
            storage
                .get_grade_by_task_and_student(task.id, c)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .list_batch_ids_of_course(course)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
