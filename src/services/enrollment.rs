//! 注册解析器
//!
//! 课程的有效注册集合是其全部挂接批次成员的去重并集，
//! 永远现算、从不落库。只读，无副作用。

use crate::errors::Result;
use crate::storage::Storage;
use std::collections::BTreeSet;

/// 解析课程的有效注册集合
///
/// 批次列表为空（或课程不存在）返回空集而非错误，
/// 调用方依赖这一点把"无人注册"与"查询失败"区分开。
pub async fn resolve_enrollment(storage: &dyn Storage, course_id: i64) -> Result<Vec<i64>> {
    let batch_ids = storage.list_batch_ids_of_course(course_id).await?;

    let mut students = BTreeSet::new();
    for batch_id in batch_ids {
        for student_id in storage.list_student_ids_of_batch(batch_id).await? {
            students.insert(student_id);
        }
    }

    Ok(students.into_iter().collect())
}

/// 学生是否经由某个批次注册在课程中
///
/// 学生批次集与课程批次集存在交集即为注册，
/// 不需要展开整个注册集合。
pub async fn is_student_enrolled(
    storage: &dyn Storage,
    student_id: i64,
    course_id: i64,
) -> Result<bool> {
    let course_batches: BTreeSet<i64> = storage
        .list_batch_ids_of_course(course_id)
        .await?
        .into_iter()
        .collect();

    if course_batches.is_empty() {
        return Ok(false);
    }

    let student_batches = storage.list_batch_ids_of_student(student_id).await?;

    Ok(student_batches
        .iter()
        .any(|batch_id| course_batches.contains(batch_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{seed_batch, seed_course, seed_student};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_resolve_union_deduplicates() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let b1 = seed_batch(&storage, "b1").await;
        let b2 = seed_batch(&storage, "b2").await;
        let course = seed_course(&storage, "CS101").await;

        storage.add_student_to_batch(b1, a).await.unwrap();
        storage.add_student_to_batch(b1, b).await.unwrap();
        // alice 同时在两个批次
        storage.add_student_to_batch(b2, a).await.unwrap();
        storage.attach_batch_to_course(course, b1).await.unwrap();
        storage.attach_batch_to_course(course, b2).await.unwrap();

        let enrolled = resolve_enrollment(&storage, course).await.unwrap();
        assert_eq!(enrolled, vec![a, b]);
    }

    #[tokio::test]
    async fn test_resolve_empty_batch_list_is_empty_not_error() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let course = seed_course(&storage, "CS102").await;

        let enrolled = resolve_enrollment(&storage, course).await.unwrap();
        assert!(enrolled.is_empty());

        // 课程不存在同样返回空集
        let enrolled = resolve_enrollment(&storage, 9999).await.unwrap();
        assert!(enrolled.is_empty());
    }

    #[tokio::test]
    async fn test_is_student_enrolled_by_batch_intersection() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let a = seed_student(&storage, "alice").await;
        let b = seed_student(&storage, "bob").await;
        let b1 = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS103").await;

        storage.add_student_to_batch(b1, a).await.unwrap();
        storage.attach_batch_to_course(course, b1).await.unwrap();

        assert!(is_student_enrolled(&storage, a, course).await.unwrap());
        assert!(!is_student_enrolled(&storage, b, course).await.unwrap());
    }
}
