//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, TaskHubError};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Lateness, Submission},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// (task, student) 已存在时返回 DuplicateKey，由调用方转入更新路径。
    pub async fn create_submission_impl(
        &self,
        task_id: i64,
        student_id: i64,
        content: String,
        attachments: &[String],
        lateness: Lateness,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let attachments_json = if attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(attachments)?)
        };

        let model = ActiveModel {
            task_id: Set(task_id),
            student_id: Set(student_id),
            content: Set(content),
            attachments: Set(attachments_json),
            lateness: Set(lateness.as_str().to_string()),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(TaskHubError::from)?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 (task, student) 获取提交
    pub async fn get_submission_by_task_and_student_impl(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 替换提交内容与附件；lateness 保持首交时的判定不变
    pub async fn update_submission_content_impl(
        &self,
        submission_id: i64,
        content: String,
        attachments: &[String],
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let attachments_json = if attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(attachments)?)
        };

        let mut model: ActiveModel = existing.into();
        model.content = Set(content);
        model.attachments = Set(attachments_json);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(task_id) = query.task_id {
            select = select.filter(Column::TaskId.eq(task_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 排序
        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo {
                total: total as i64,
                page: page as i64,
                page_size: size as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按任务删除提交
    pub async fn delete_submissions_by_task_impl(&self, task_id: i64) -> Result<u64> {
        let result = Submissions::delete_many()
            .filter(Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("按任务删除提交失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 按学生删除提交
    pub async fn delete_submissions_by_student_impl(&self, student_id: i64) -> Result<u64> {
        let result = Submissions::delete_many()
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("按学生删除提交失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除指定 (task, students) 的提交
    pub async fn delete_submissions_for_students_impl(
        &self,
        task_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        if student_ids.is_empty() {
            return Ok(0);
        }

        let result = Submissions::delete_many()
            .filter(Column::TaskId.eq(task_id))
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清理提交失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 任务下已提交的学生集合
    pub async fn list_submitted_student_ids_impl(&self, task_id: i64) -> Result<Vec<i64>> {
        let ids = Submissions::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::TaskId.eq(task_id))
            .order_by_asc(Column::StudentId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询已提交学生失败: {e}")))?;

        Ok(ids)
    }
}
