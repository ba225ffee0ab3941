pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tasks::requests::{CreateTaskRequest, TaskListParams, UpdateTaskRequest};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
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

    // 获取任务列表
    pub async fn list_tasks(
        &self,
        query: TaskListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, query, request).await
    }

    // 创建任务并为当前注册集合铺占位行
    pub async fn create_task(
        &self,
        task_data: CreateTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, task_data, request).await
    }

    // 根据ID获取任务
    pub async fn get_task(&self, task_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_task(self, task_id, request).await
    }

    // 更新任务；course_id 变更触发占位行先删后建
    pub async fn update_task(
        &self,
        task_id: i64,
        update_data: UpdateTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, task_id, update_data, request).await
    }

    // 删除任务（级联删除成绩与提交）
    pub async fn delete_task(
        &self,
        task_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, task_id, request).await
    }
}
