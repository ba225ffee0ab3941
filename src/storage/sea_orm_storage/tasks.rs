//! 任务存储操作

use super::SeaOrmStorage;
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{Result, TaskHubError};
use crate::models::{
    PaginationInfo,
    tasks::{
        entities::{Task, TaskType},
        requests::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
        responses::{TaskListResponse, TaskResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建任务
    ///
    /// due >= publish 校验由服务层完成，存储层只负责落库。
    pub async fn create_task_impl(&self, req: CreateTaskRequest) -> Result<Task> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            task_type: Set(req
                .task_type
                .unwrap_or(TaskType::Assignment)
                .as_str()
                .to_string()),
            max_points: Set(req.max_points.unwrap_or(100.0)),
            publish_at: Set(req.publish_at.timestamp()),
            due_at: Set(req.due_at.timestamp()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("创建任务失败: {e}")))?;

        Ok(result.into_task())
    }

    /// 通过 ID 获取任务
    pub async fn get_task_by_id_impl(&self, task_id: i64) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询任务失败: {e}")))?;

        Ok(result.map(|m| m.into_task()))
    }

    /// 课程下的全部任务
    pub async fn list_tasks_by_course_impl(&self, course_id: i64) -> Result<Vec<Task>> {
        let tasks = Tasks::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询课程任务失败: {e}")))?;

        Ok(tasks.into_iter().map(|m| m.into_task()).collect())
    }

    /// 分页列出任务
    pub async fn list_tasks_with_pagination_impl(
        &self,
        query: TaskListQuery,
    ) -> Result<TaskListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Tasks::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::DueAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询任务总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询任务页数失败: {e}")))?;

        let tasks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询任务列表失败: {e}")))?;

        Ok(TaskListResponse {
            items: tasks
                .into_iter()
                .map(|m| TaskResponse::with_status(m.into_task()))
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新任务信息
    ///
    /// 只更新任务行本身；course_id 变更引起的成绩同步由 services::sync 编排。
    pub async fn update_task_impl(
        &self,
        task_id: i64,
        update: UpdateTaskRequest,
    ) -> Result<Option<Task>> {
        // 先检查任务是否存在
        let existing = self.get_task_by_id_impl(task_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(task_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(task_type) = update.task_type {
            model.task_type = Set(task_type.as_str().to_string());
        }

        if let Some(max_points) = update.max_points {
            model.max_points = Set(max_points);
        }

        if let Some(publish_at) = update.publish_at {
            model.publish_at = Set(publish_at.timestamp());
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(due_at.timestamp());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("更新任务失败: {e}")))?;

        self.get_task_by_id_impl(task_id).await
    }

    /// 删除任务行
    pub async fn delete_task_row_impl(&self, task_id: i64) -> Result<bool> {
        let result = Tasks::delete_by_id(task_id)
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("删除任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
