//! 成绩占位同步引擎
//!
//! 目标状态：对每个任务，注册集合里的每个学生恰有一行成绩占位，
//! 集合之外不残留任何行。增长与收缩都是幂等原语，任何路径被
//! 打断后重跑 [`reconcile_course`] 即可收敛，这是无跨表事务下的
//! 一致性策略。

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::errors::Result;
use crate::models::tasks::entities::Task;
use crate::services::enrollment;
use crate::storage::Storage;

/// 增长：为尚无占位行的学生补齐 Pending 行
///
/// 底层是无序批量插入，重复键逐项忽略，并发增长互不干扰。
pub async fn create_missing_grades(
    storage: &dyn Storage,
    task_id: i64,
    course_id: i64,
    student_ids: &[i64],
) -> Result<u64> {
    let inserted = storage
        .insert_missing_grades(task_id, course_id, student_ids)
        .await?;

    if inserted > 0 {
        debug!(
            "Grade sync grow: task {} gained {} placeholder(s)",
            task_id, inserted
        );
    }

    Ok(inserted)
}

/// 收缩：删除失去注册资格学生的占位行
pub async fn delete_obsolete_grades(
    storage: &dyn Storage,
    task_id: i64,
    student_ids: &[i64],
) -> Result<u64> {
    let deleted = storage
        .delete_grades_for_students(task_id, student_ids)
        .await?;

    if deleted > 0 {
        debug!(
            "Grade sync shrink: task {} lost {} placeholder(s)",
            task_id, deleted
        );
    }

    Ok(deleted)
}

/// 新任务建立后为当前注册集合铺满占位行
pub async fn sync_grades_for_task_creation(storage: &dyn Storage, task: &Task) -> Result<u64> {
    let enrolled = enrollment::resolve_enrollment(storage, task.course_id).await?;
    create_missing_grades(storage, task.id, task.course_id, &enrolled).await
}

/// 任务换课后的占位同步
///
/// 先整体删除旧课程注册下的全部占位行，再为新课程注册铺设，
/// 删除在前保证不存在学生在同一任务下短暂持有两行。仍属新注册
/// 集合的已有提交重新挂回新占位行，失去注册的提交连根清掉。
pub async fn sync_grades_for_task_course_change(
    storage: &dyn Storage,
    task: &Task,
    old_course_id: i64,
) -> Result<()> {
    info!(
        "Task {} moved from course {} to course {}, resyncing grades",
        task.id, old_course_id, task.course_id
    );

    // 先删后建
    storage.delete_grades_by_task(task.id).await?;

    let enrolled = enrollment::resolve_enrollment(storage, task.course_id).await?;
    let enrolled_set: BTreeSet<i64> = enrolled.iter().copied().collect();

    // 不在新注册集合里的提交成为孤儿，随占位行一起消失
    let submitted = storage.list_submitted_student_ids(task.id).await?;
    let orphaned: Vec<i64> = submitted
        .iter()
        .copied()
        .filter(|id| !enrolled_set.contains(id))
        .collect();
    storage
        .delete_submissions_for_students(task.id, &orphaned)
        .await?;

    create_missing_grades(storage, task.id, task.course_id, &enrolled).await?;

    // 幸存的提交重新挂回新建的占位行
    for student_id in submitted {
        if enrolled_set.contains(&student_id) {
            if let Some(submission) = storage
                .get_submission_by_task_and_student(task.id, student_id)
                .await?
            {
                storage
                    .link_submission(task.id, student_id, Some(submission.id))
                    .await?;
            }
        }
    }

    Ok(())
}

/// 课程批次变更后的占位同步
///
/// 挂接/摘除具体是哪些批次并不重要：统一按变更后的注册集合
/// 重新对账，学生若经由其他仍挂接的批次保持注册则不受影响。
pub async fn sync_grades_for_course_batch_change(
    storage: &dyn Storage,
    course_id: i64,
) -> Result<()> {
    reconcile_course(storage, course_id).await
}

/// 课程级全量对账：对每个任务收敛占位行到当前注册集合
///
/// 幂等，可在任何被打断的级联之后重跑。
pub async fn reconcile_course(storage: &dyn Storage, course_id: i64) -> Result<()> {
    let enrolled = enrollment::resolve_enrollment(storage, course_id).await?;
    let enrolled_set: BTreeSet<i64> = enrolled.iter().copied().collect();

    let tasks = storage.list_tasks_by_course(course_id).await?;

    for task in &tasks {
        // 增长
        create_missing_grades(storage, task.id, course_id, &enrolled).await?;

        // 收缩
        let existing = storage.list_graded_student_ids(task.id).await?;
        let obsolete: Vec<i64> = existing
            .into_iter()
            .filter(|id| !enrolled_set.contains(id))
            .collect();
        delete_obsolete_grades(storage, task.id, &obsolete).await?;

        // 孤儿提交清扫：成绩行没了，提交也不能留
        let submitted = storage.list_submitted_student_ids(task.id).await?;
        let (surviving, orphaned): (Vec<i64>, Vec<i64>) = submitted
            .into_iter()
            .partition(|id| enrolled_set.contains(id));
        storage
            .delete_submissions_for_students(task.id, &orphaned)
            .await?;

        // 被打断的级联可能留下刚重建、尚未挂接提交的占位行
        for student_id in surviving {
            let needs_link = storage
                .get_grade_by_task_and_student(task.id, student_id)
                .await?
                .is_some_and(|g| g.submission_id.is_none());
            if needs_link
                && let Some(submission) = storage
                    .get_submission_by_task_and_student(task.id, student_id)
                    .await?
            {
                storage
                    .link_submission(task.id, student_id, Some(submission.id))
                    .await?;
            }
        }
    }

    debug!(
        "Course {} reconciled: {} task(s), {} enrolled student(s)",
        course_id,
        tasks.len(),
        enrolled.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{seed_batch, seed_course, seed_student, seed_task};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_task_creation_fills_placeholders() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS201").await;
        storage.add_student_to_batch(batch, a).await.unwrap();
        storage.add_student_to_batch(batch, b).await.unwrap();
        storage.attach_batch_to_course(course, batch).await.unwrap();

        let task = seed_task(&storage, course, "hw1").await;
        let created = sync_grades_for_task_creation(&storage, &task).await.unwrap();
        assert_eq!(created, 2);

        let placeholders = storage.list_graded_student_ids(task.id).await.unwrap();
        assert_eq!(placeholders, vec![a, b]);

        let grade = storage
            .get_grade_by_task_and_student(task.id, a)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade.course_id, course);
        assert!(grade.grade.is_none());
    }

    #[tokio::test]
    async fn test_grow_is_idempotent() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS202").await;
        storage.add_student_to_batch(batch, a).await.unwrap();
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;

        let first = create_missing_grades(&storage, task.id, course, &[a]).await.unwrap();
        let second = create_missing_grades(&storage, task.id, course, &[a]).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
    }

    #[tokio::test]
    async fn test_reconcile_shrinks_to_current_enrollment() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS203").await;
        storage.add_student_to_batch(batch, a).await.unwrap();
        storage.add_student_to_batch(batch, b).await.unwrap();
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        sync_grades_for_task_creation(&storage, &task).await.unwrap();

        // bob 退出批次，对账后只剩 alice 的占位行
        storage.remove_student_from_batch(batch, b).await.unwrap();
        reconcile_course(&storage, course).await.unwrap();

        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS204").await;
        storage.add_student_to_batch(batch, a).await.unwrap();
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;

        reconcile_course(&storage, course).await.unwrap();
        reconcile_course(&storage, course).await.unwrap();

        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
    }

    #[tokio::test]
    async fn test_reconcile_relinks_surviving_submission() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS205").await;
        storage.add_student_to_batch(batch, a).await.unwrap();
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        sync_grades_for_task_creation(&storage, &task).await.unwrap();

        let submission = crate::services::submissions::submit::submit_or_update(
            &storage,
            task.id,
            a,
            "answer".to_string(),
            &[],
            chrono::Utc::now(),
        )
        .await
        .unwrap();

        // 模拟被打断的级联：占位行没了，提交还在
        storage
            .delete_grades_for_students(task.id, &[a])
            .await
            .unwrap();

        reconcile_course(&storage, course).await.unwrap();

        let grade = storage
            .get_grade_by_task_and_student(task.id, a)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade.submission_id, Some(submission.id));
    }

    #[tokio::test]
    async fn test_task_course_change_deletes_before_creating() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let old_batch = seed_batch(&storage, "old").await;
        let new_batch = seed_batch(&storage, "new").await;
        let old_course = seed_course(&storage, "CS205").await;
        let new_course = seed_course(&storage, "CS206").await;
        storage.add_student_to_batch(old_batch, a).await.unwrap();
        storage.add_student_to_batch(new_batch, b).await.unwrap();
        storage
            .attach_batch_to_course(old_course, old_batch)
            .await
            .unwrap();
        storage
            .attach_batch_to_course(new_course, new_batch)
            .await
            .unwrap();

        let task = seed_task(&storage, old_course, "hw1").await;
        sync_grades_for_task_creation(&storage, &task).await.unwrap();
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );

        // 任务换课
        let moved = storage
            .update_task(
                task.id,
                crate::models::tasks::requests::UpdateTaskRequest {
                    course_id: Some(new_course),
                    title: None,
                    description: None,
                    task_type: None,
                    max_points: None,
                    publish_at: None,
                    due_at: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        sync_grades_for_task_course_change(&storage, &moved, old_course)
            .await
            .unwrap();

        // 旧注册的行整体消失，新注册的行就位
        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![b]
        );
        let grade = storage
            .get_grade_by_task_and_student(task.id, b)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(grade.course_id, new_course);
    }

    #[tokio::test]
    async fn test_multi_batch_student_survives_partial_detach() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b1 = seed_batch(&storage, "b1").await;
        let b2 = seed_batch(&storage, "b2").await;
        let course = seed_course(&storage, "CS207").await;
        storage.add_student_to_batch(b1, a).await.unwrap();
        storage.add_student_to_batch(b2, a).await.unwrap();
        storage.attach_batch_to_course(course, b1).await.unwrap();
        storage.attach_batch_to_course(course, b2).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        sync_grades_for_task_creation(&storage, &task).await.unwrap();

        // 摘除 b1：alice 经由 b2 仍然注册，占位行必须保留
        storage.detach_batch_from_course(course, b1).await.unwrap();
        sync_grades_for_course_batch_change(&storage, course)
            .await
            .unwrap();

        assert_eq!(
            storage.list_graded_student_ids(task.id).await.unwrap(),
            vec![a]
        );
    }
}
