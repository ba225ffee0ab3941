use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::cascade;

pub async fn delete_task(
    service: &TaskService,
    task_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match cascade::delete_task(storage.as_ref(), task_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("任务删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => {
            error!("Failed to delete task {}: {}", task_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete task: {e}"),
                )),
            )
        }
    }
}
