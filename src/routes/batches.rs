use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::batches::requests::{
    BatchListParams, BatchMemberRequest, CreateBatchRequest, UpdateBatchRequest,
};
use crate::services::BatchService;
use crate::utils::SafeIDI64;

// 懒加载的全局 BatchService 实例
static BATCH_SERVICE: Lazy<BatchService> = Lazy::new(BatchService::new_lazy);

// HTTP处理程序
pub async fn list_batches(
    req: HttpRequest,
    query: web::Query<BatchListParams>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.list_batches(query.into_inner(), &req).await
}

pub async fn create_batch(
    req: HttpRequest,
    batch_data: web::Json<CreateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.create_batch(batch_data.into_inner(), &req).await
}

pub async fn get_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.get_batch(batch_id.0, &req).await
}

pub async fn update_batch(
    req: HttpRequest,
    batch_id: SafeIDI64,
    update_data: web::Json<UpdateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .update_batch(batch_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.delete_batch(batch_id.0, &req).await
}

pub async fn list_members(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.list_members(batch_id.0, &req).await
}

pub async fn add_member(
    req: HttpRequest,
    batch_id: SafeIDI64,
    member: web::Json<BatchMemberRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .add_member(batch_id.0, member.into_inner(), &req)
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (batch_id, student_id) = path.into_inner();
    BATCH_SERVICE.remove_member(batch_id, student_id, &req).await
}

// 配置路由
pub fn configure_batch_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/batches")
            .route("", web::get().to(list_batches))
            .route("", web::post().to(create_batch))
            .route("/{id}", web::get().to(get_batch))
            .route("/{id}", web::put().to(update_batch))
            .route("/{id}", web::delete().to(delete_batch))
            .route("/{id}/students", web::get().to(list_members))
            .route("/{id}/students", web::post().to(add_member))
            .route(
                "/{id}/students/{student_id}",
                web::delete().to(remove_member),
            ),
    );
}
