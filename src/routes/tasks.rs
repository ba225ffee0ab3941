use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::tasks::requests::{CreateTaskRequest, TaskListParams, UpdateTaskRequest};
use crate::services::TaskService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TaskService 实例
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

// HTTP处理程序
pub async fn list_tasks(
    req: HttpRequest,
    query: web::Query<TaskListParams>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.list_tasks(query.into_inner(), &req).await
}

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.create_task(task_data.into_inner(), &req).await
}

pub async fn get_task(req: HttpRequest, task_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(task_id.0, &req).await
}

pub async fn update_task(
    req: HttpRequest,
    task_id: SafeIDI64,
    update_data: web::Json<UpdateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE
        .update_task(task_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_task(req: HttpRequest, task_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TASK_SERVICE.delete_task(task_id.0, &req).await
}

// 配置路由
pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .route("", web::get().to(list_tasks))
            .route("", web::post().to(create_task))
            .route("/{id}", web::get().to(get_task))
            .route("/{id}", web::put().to(update_task))
            .route("/{id}", web::delete().to(delete_task)),
    );
}
