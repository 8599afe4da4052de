pub mod create;
pub mod detail;
pub mod list;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::Actor;
use crate::models::appeals::requests::{AppealListQuery, CreateAppealRequest, ReviewAppealRequest};
use crate::storage::Storage;

/// Các vai trò được xét kháng nghị
pub const APPEAL_REVIEWER_ROLES: &[&str] = &["FACULTY", "CTSV"];

pub struct AppealService {
    storage: Option<Arc<dyn Storage>>,
}

impl AppealService {
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

    /// Tạo kháng nghị
    pub async fn create_appeal(
        &self,
        request: &HttpRequest,
        actor: Actor,
        req: CreateAppealRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_appeal(self, request, actor, req).await
    }

    /// Lấy kháng nghị theo ID
    pub async fn get_appeal(
        &self,
        request: &HttpRequest,
        actor: Actor,
        appeal_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_appeal(self, request, actor, appeal_id).await
    }

    /// Xét kháng nghị
    pub async fn review_appeal(
        &self,
        request: &HttpRequest,
        actor: Actor,
        appeal_id: i64,
        req: ReviewAppealRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_appeal(self, request, actor, appeal_id, req).await
    }

    /// Liệt kê kháng nghị
    pub async fn list_appeals(
        &self,
        request: &HttpRequest,
        actor: Actor,
        query: AppealListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_appeals(self, request, actor, query).await
    }
}
