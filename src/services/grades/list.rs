use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::GradeListParams};

pub async fn list_grades(
    service: &GradeService,
    params: GradeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_with_pagination(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "成绩列表获取成功"))),
        Err(e) => {
            error!("Failed to list grades: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list grades: {e}"),
                )),
            )
        }
    }
}
