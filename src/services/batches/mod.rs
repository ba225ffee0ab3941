pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::batches::requests::{
    BatchListParams, BatchMemberRequest, CreateBatchRequest, UpdateBatchRequest,
};
use crate::storage::Storage;

pub struct BatchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BatchService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取批次列表
    pub async fn list_batches(
        &self,
        query: BatchListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_batches(self, query, request).await
    }

    // 创建批次
    pub async fn create_batch(
        &self,
        batch_data: CreateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_batch(self, batch_data, request).await
    }

    // 根据ID获取批次
    pub async fn get_batch(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_batch(self, batch_id, request).await
    }

    // 更新批次信息
    pub async fn update_batch(
        &self,
        batch_id: i64,
        update_data: UpdateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_batch(self, batch_id, update_data, request).await
    }

    // 删除批次（级联收缩受影响课程的占位行）
    pub async fn delete_batch(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_batch(self, batch_id, request).await
    }

    // 批次成员列表
    pub async fn list_members(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, batch_id, request).await
    }

    // 学生加入批次
    pub async fn add_member(
        &self,
        batch_id: i64,
        member: BatchMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, batch_id, member, request).await
    }

    // 学生移出批次
    pub async fn remove_member(
        &self,
        batch_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, batch_id, student_id, request).await
    }
}
