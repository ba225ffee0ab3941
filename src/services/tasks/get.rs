use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode, tasks::responses::TaskResponse};

pub async fn get_task(
    service: &TaskService,
    task_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TaskResponse::with_status(task),
            "任务信息获取成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get task information: {e}"),
            )),
        ),
    }
}
