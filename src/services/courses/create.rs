use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::cascade;

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if course_data.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course code must not be empty",
        )));
    }

    let storage = service.get_storage(request);
    let faculty_ids = course_data.faculty_ids.clone().unwrap_or_default();
    let batch_ids = course_data.batch_ids.clone().unwrap_or_default();

    let course = match storage.create_course(course_data).await {
        Ok(course) => course,
        Err(e) if e.is_duplicate_key() => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseCodeTaken,
                "Course code already taken",
            )));
        }
        Err(e) => {
            error!("Course creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course creation failed: {e}"),
                )),
            );
        }
    };

    for faculty_id in faculty_ids {
        if let Err(e) = storage.add_faculty_to_course(course.id, faculty_id).await {
            error!(
                "Attaching faculty {} to course {} failed: {}",
                faculty_id, course.id, e
            );
        }
    }

    // 创建时挂接批次；此刻课程还没有任务，对账只是空转
    if !batch_ids.is_empty()
        && let Err(e) =
            cascade::change_course_batches(storage.as_ref(), course.id, &batch_ids, &[]).await
    {
        error!("Attaching batches to course {} failed: {}", course.id, e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
}
