use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BatchService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::cascade;

pub async fn delete_batch(
    service: &BatchService,
    batch_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match cascade::delete_batch(storage.as_ref(), batch_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("批次删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) => {
            error!("Failed to delete batch {}: {}", batch_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete batch: {e}"),
                )),
            )
        }
    }
}
