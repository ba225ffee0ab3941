//! 成绩占位存储操作
//!
//! "增长"路径走无序批量插入，重复键逐项忽略，
//! (task_id, student_id) 唯一索引即并发保护。

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, TaskHubError};
use crate::models::{
    PaginationInfo,
    common::actor::ActorRef,
    grades::{
        entities::{Grade, GradeStatus},
        requests::GradeListQuery,
        responses::GradeListResponse,
    },
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 批量补齐占位行；返回实际插入数（已存在的行被唯一索引拦下）
    pub async fn insert_missing_grades_impl(
        &self,
        task_id: i64,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        if student_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();

        let models: Vec<ActiveModel> = student_ids
            .iter()
            .map(|&student_id| ActiveModel {
                task_id: Set(task_id),
                student_id: Set(student_id),
                course_id: Set(course_id),
                grade: Set(None),
                status: Set(GradeStatus::Pending.as_str().to_string()),
                feedback: Set(None),
                submission_id: Set(None),
                graded_by_kind: Set(None),
                graded_by_id: Set(None),
                graded_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();

        let inserted = Grades::insert_many(models)
            .on_conflict(
                OnConflict::columns([Column::TaskId, Column::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("补齐成绩占位失败: {e}")))?;

        Ok(inserted)
    }

    /// 删除指定 (task, students) 的成绩行
    pub async fn delete_grades_for_students_impl(
        &self,
        task_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        if student_ids.is_empty() {
            return Ok(0);
        }

        let result = Grades::delete_many()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("收缩成绩占位失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 按任务删除成绩
    pub async fn delete_grades_by_task_impl(&self, task_id: i64) -> Result<u64> {
        let result = Grades::delete_many()
            .filter(Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("按任务删除成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 按学生删除成绩
    pub async fn delete_grades_by_student_impl(&self, student_id: i64) -> Result<u64> {
        let result = Grades::delete_many()
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("按学生删除成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 按课程删除成绩（冗余 course_id 列直接命中，无需逐任务枚举）
    pub async fn delete_grades_by_course_impl(&self, course_id: i64) -> Result<u64> {
        let result = Grades::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("按课程删除成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过 (task, student) 获取成绩
    pub async fn get_grade_by_task_and_student_impl(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Grades::find();

        if let Some(task_id) = query.task_id {
            select = select.filter(Column::TaskId.eq(task_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                total: total as i64,
                page: page as i64,
                page_size: size as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 任务下已有占位行的学生集合
    pub async fn list_graded_student_ids_impl(&self, task_id: i64) -> Result<Vec<i64>> {
        let ids = Grades::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::TaskId.eq(task_id))
            .order_by_asc(Column::StudentId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询占位学生失败: {e}")))?;

        Ok(ids)
    }

    /// 应用单条评分
    ///
    /// status/graded_at/graded_by 均由 grade 是否为空派生，
    /// grade 为 None 回退 Pending 并清空评分信息。
    pub async fn apply_grade_update_impl(
        &self,
        grade_id: i64,
        grade: Option<f64>,
        feedback: Option<String>,
        grader: ActorRef,
    ) -> Result<Option<Grade>> {
        let Some(existing) = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let mut model: ActiveModel = existing.into();

        model.grade = Set(grade);
        model.feedback = Set(feedback);
        model.updated_at = Set(now);

        match grade {
            Some(_) => {
                model.status = Set(GradeStatus::Graded.as_str().to_string());
                model.graded_by_kind = Set(Some(grader.kind.as_str().to_string()));
                model.graded_by_id = Set(Some(grader.id));
                model.graded_at = Set(Some(now));
            }
            None => {
                model.status = Set(GradeStatus::Pending.as_str().to_string());
                model.graded_by_kind = Set(None);
                model.graded_by_id = Set(None);
                model.graded_at = Set(None);
            }
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(updated.into_grade()))
    }

    /// 把提交挂到对应成绩行上
    pub async fn link_submission_impl(
        &self,
        task_id: i64,
        student_id: i64,
        submission_id: Option<i64>,
    ) -> Result<bool> {
        let Some(existing) = Grades::find()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询成绩失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.submission_id = Set(submission_id);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("关联提交失败: {e}")))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::grades::requests::GradeListQuery;
    use crate::services::testutil::{seed_batch, seed_course, seed_student, seed_task};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_list_grades_pagination_metadata() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let mut students = Vec::new();
        for name in ["alice", "bob", "carol"] {
            students.push(seed_student(&storage, name).await);
        }
        let batch = seed_batch(&storage, "b1").await;
        let course = seed_course(&storage, "CS401").await;
        for &s in &students {
            storage.add_student_to_batch(batch, s).await.unwrap();
        }
        storage.attach_batch_to_course(course, batch).await.unwrap();
        let task = seed_task(&storage, course, "hw1").await;
        storage
            .insert_missing_grades(task.id, course, &students)
            .await
            .unwrap();

        let page = storage
            .list_grades_with_pagination(GradeListQuery {
                page: Some(1),
                size: Some(2),
                task_id: Some(task.id),
                student_id: None,
                course_id: None,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.page_size, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }
}
