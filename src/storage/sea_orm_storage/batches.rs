//! 批次存储操作

use super::SeaOrmStorage;
use crate::entity::batches::{ActiveModel, Column, Entity as Batches};
use crate::errors::{Result, TaskHubError};
use crate::models::{
    PaginationInfo,
    batches::{
        entities::Batch,
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
        responses::BatchListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建批次
    pub async fn create_batch_impl(&self, req: CreateBatchRequest) -> Result<Batch> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            department: Set(req.department),
            creator_kind: Set(req.creator.kind.as_str().to_string()),
            creator_id: Set(req.creator.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // (name, academic_year, department) 唯一索引冲突作为 DuplicateKey 上抛
        let result = model.insert(&self.db).await.map_err(TaskHubError::from)?;

        Ok(result.into_batch())
    }

    /// 通过 ID 获取批次
    pub async fn get_batch_by_id_impl(&self, batch_id: i64) -> Result<Option<Batch>> {
        let result = Batches::find_by_id(batch_id)
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    /// 按 (名称, 学年, 院系) 唯一键查批次
    pub async fn find_batch_by_unique_impl(
        &self,
        name: &str,
        academic_year: &str,
        department: &str,
    ) -> Result<Option<Batch>> {
        let result = Batches::find()
            .filter(Column::Name.eq(name))
            .filter(Column::AcademicYear.eq(academic_year))
            .filter(Column::Department.eq(department))
            .one(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次失败: {e}")))?;

        Ok(result.map(|m| m.into_batch()))
    }

    /// 分页列出批次
    pub async fn list_batches_with_pagination_impl(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Batches::find();

        // 学年筛选
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        // 院系筛选
        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次页数失败: {e}")))?;

        let batches = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次列表失败: {e}")))?;

        Ok(BatchListResponse {
            items: batches.into_iter().map(|m| m.into_batch()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新批次信息
    pub async fn update_batch_impl(
        &self,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        // 先检查批次是否存在
        let existing = self.get_batch_by_id_impl(batch_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(batch_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }

        if let Some(department) = update.department {
            model.department = Set(department);
        }

        model.update(&self.db).await.map_err(TaskHubError::from)?;

        self.get_batch_by_id_impl(batch_id).await
    }

    /// 删除批次行
    pub async fn delete_batch_row_impl(&self, batch_id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(batch_id)
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("删除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
