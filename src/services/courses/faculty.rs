use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CourseFacultyChangeRequest};

/// 课程教师变更；不触碰注册集合，无占位行同步
pub async fn change_faculty(
    service: &CourseService,
    course_id: i64,
    change: CourseFacultyChangeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load course: {e}"),
                )),
            );
        }
    }

    for &faculty_id in &change.added_faculty_ids {
        if let Err(e) = storage.add_faculty_to_course(course_id, faculty_id).await {
            error!(
                "Failed to add faculty {} to course {}: {}",
                faculty_id, course_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to add faculty: {e}"),
                )),
            );
        }
    }

    for &faculty_id in &change.removed_faculty_ids {
        if let Err(e) = storage
            .remove_faculty_from_course(course_id, faculty_id)
            .await
        {
            error!(
                "Failed to remove faculty {} from course {}: {}",
                faculty_id, course_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to remove faculty: {e}"),
                )),
            );
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课程教师变更成功")))
}
