use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode, tasks::requests::TaskListParams};

pub async fn list_tasks(
    service: &TaskService,
    params: TaskListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_tasks_with_pagination(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "任务列表获取成功"))),
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list tasks: {e}"),
                )),
            )
        }
    }
}
