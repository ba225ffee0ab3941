pub mod batches;
pub mod create;
pub mod delete;
pub mod faculty;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseBatchChangeRequest, CourseFacultyChangeRequest, CourseListParams, CreateCourseRequest,
    UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取课程列表
    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course_data, request).await
    }

    // 根据ID获取课程
    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        course_id: i64,
        update_data: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, course_id, update_data, request).await
    }

    // 删除课程（级联删除任务、成绩与提交）
    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, course_id, request).await
    }

    // 课程批次挂接/摘除，随后重新对账占位行
    pub async fn change_batches(
        &self,
        course_id: i64,
        change: CourseBatchChangeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batches::change_batches(self, course_id, change, request).await
    }

    // 课程注册集合（解析后的学生并集）
    pub async fn get_enrollment(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        batches::get_enrollment(self, course_id, request).await
    }

    // 课程教师变更
    pub async fn change_faculty(
        &self,
        course_id: i64,
        change: CourseFacultyChangeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        faculty::change_faculty(self, course_id, change, request).await
    }
}
