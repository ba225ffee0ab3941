use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::courses::requests::{
    CourseBatchChangeRequest, CourseFacultyChangeRequest, CourseListParams, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeIDI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(course_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

pub async fn change_batches(
    req: HttpRequest,
    course_id: SafeIDI64,
    change: web::Json<CourseBatchChangeRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .change_batches(course_id.0, change.into_inner(), &req)
        .await
}

pub async fn get_enrollment(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_enrollment(course_id.0, &req).await
}

pub async fn change_faculty(
    req: HttpRequest,
    course_id: SafeIDI64,
    change: web::Json<CourseFacultyChangeRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .change_faculty(course_id.0, change.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .route("", web::get().to(list_courses))
            .route("", web::post().to(create_course))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}", web::delete().to(delete_course))
            .route("/{id}/batches", web::patch().to(change_batches))
            .route("/{id}/enrollment", web::get().to(get_enrollment))
            .route("/{id}/faculty", web::patch().to(change_faculty)),
    );
}
