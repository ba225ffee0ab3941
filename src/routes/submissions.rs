use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::{SubmissionListParams, SubmitRequest};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(submission_id.0, &req).await
}

// 提交/重交共用一个 PUT 入口
pub async fn submit(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    data: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    let (task_id, student_id) = path.into_inner();
    SUBMISSION_SERVICE
        .submit(task_id, student_id, data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .route("", web::get().to(list_submissions))
            .route("/{id}", web::get().to(get_submission)),
    );
    cfg.service(
        web::scope("/api/v1/tasks/{task_id}/students/{student_id}")
            .route("/submission", web::put().to(submit)),
    );
}
