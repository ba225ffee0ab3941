pub mod bulk;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{BulkApplyGradesRequest, GradeListParams};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 获取成绩列表（按任务/学生/课程/状态筛选）
    pub async fn list_grades(
        &self,
        query: GradeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    // 根据ID获取成绩
    pub async fn get_grade(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_grade(self, grade_id, request).await
    }

    // 批量评分，各项独立落库
    pub async fn bulk_apply(
        &self,
        data: BulkApplyGradesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_apply(self, data, request).await
    }
}
