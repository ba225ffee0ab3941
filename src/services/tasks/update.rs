use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaskService;
use crate::models::{
    ApiResponse, ErrorCode,
    tasks::{requests::UpdateTaskRequest, responses::TaskResponse},
};
use crate::services::sync;

pub async fn update_task(
    service: &TaskService,
    task_id: i64,
    update_data: UpdateTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_task_by_id(task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load task: {e}"),
                )),
            );
        }
    };

    // 合并后的时间窗口仍须满足 due >= publish
    let publish_at = update_data.publish_at.unwrap_or(existing.publish_at);
    let due_at = update_data.due_at.unwrap_or(existing.due_at);
    if due_at < publish_at {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Due date must not be earlier than publish date",
        )));
    }

    // 换课前目标课程必须存在
    let course_changed = update_data
        .course_id
        .is_some_and(|new_course| new_course != existing.course_id);
    if course_changed {
        let new_course = update_data.course_id.unwrap_or(existing.course_id);
        match storage.get_course_by_id(new_course).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Target course not found",
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
    }

    let updated = match storage.update_task(task_id, update_data).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TaskNotFound,
                "Task not found",
            )));
        }
        Err(e) => {
            error!("Failed to update task {}: {}", task_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update task: {e}"),
                )),
            );
        }
    };

    // 换课触发占位行先删后建
    if course_changed
        && let Err(e) =
            sync::sync_grades_for_task_course_change(storage.as_ref(), &updated, existing.course_id)
                .await
    {
        error!("Grade resync after task {} course change failed: {}", task_id, e);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TaskResponse::with_status(updated),
        "任务信息更新成功",
    )))
}
