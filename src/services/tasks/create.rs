use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TaskService;
use crate::models::{
    ApiResponse, ErrorCode,
    tasks::{requests::CreateTaskRequest, responses::TaskResponse},
};
use crate::services::sync;

pub async fn create_task(
    service: &TaskService,
    task_data: CreateTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 截止不得早于发布
    if task_data.due_at < task_data.publish_at {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Due date must not be earlier than publish date",
        )));
    }

    let storage = service.get_storage(request);

    // 课程必须存在，未动任何数据前拒绝
    match storage.get_course_by_id(task_data.course_id).await {
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

    let task = match storage.create_task(task_data).await {
        Ok(task) => task,
        Err(e) => {
            error!("Task creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Task creation failed: {e}"),
                )),
            );
        }
    };

    // 为当前注册集合铺占位行；失败不回滚任务，重跑对账即可补齐
    if let Err(e) = sync::sync_grades_for_task_creation(storage.as_ref(), &task).await {
        error!("Grade sync after task {} creation failed: {}", task.id, e);
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        TaskResponse::with_status(task),
        "任务创建成功",
    )))
}
