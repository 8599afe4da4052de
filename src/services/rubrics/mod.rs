pub mod create;
pub mod deactivate;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::rubrics::requests::{CreateRubricRequest, RubricListQuery};
use crate::storage::Storage;

pub struct RubricService {
    storage: Option<Arc<dyn Storage>>,
}

impl RubricService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    /// Tạo rubric kèm tiêu chí
    pub async fn create_rubric(
        &self,
        request: &HttpRequest,
        req: CreateRubricRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_rubric(self, request, req).await
    }

    /// Lấy rubric kèm tiêu chí
    pub async fn get_rubric(
        &self,
        request: &HttpRequest,
        rubric_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_rubric(self, request, rubric_id).await
    }

    /// Liệt kê rubric
    pub async fn list_rubrics(
        &self,
        request: &HttpRequest,
        query: RubricListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_rubrics(self, request, query).await
    }

    /// Ngừng sử dụng rubric
    pub async fn deactivate_rubric(
        &self,
        request: &HttpRequest,
        rubric_id: i64,
    ) -> ActixResult<HttpResponse> {
        deactivate::deactivate_rubric(self, request, rubric_id).await
    }
}

/// Khóa cache cho bản chụp rubric
pub(crate) fn rubric_cache_key(rubric_id: i64) -> String {
    format!("rubric:{rubric_id}")
}
