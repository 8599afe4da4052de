pub mod create;
pub mod list;
pub mod open;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::periods::requests::{CreatePeriodRequest, PeriodListQuery, UpdatePeriodRequest};
use crate::storage::Storage;

pub struct PeriodService {
    storage: Option<Arc<dyn Storage>>,
}

impl PeriodService {
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

    /// Tạo đợt đánh giá
    pub async fn create_period(
        &self,
        request: &HttpRequest,
        req: CreatePeriodRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_period(self, request, req).await
    }

    /// Cập nhật đợt đánh giá
    pub async fn update_period(
        &self,
        request: &HttpRequest,
        period_id: i64,
        req: UpdatePeriodRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_period(self, request, period_id, req).await
    }

    /// Liệt kê đợt đánh giá
    pub async fn list_periods(
        &self,
        request: &HttpRequest,
        query: PeriodListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_periods(self, request, query).await
    }

    /// Tìm đợt đang mở cho một học kỳ
    pub async fn get_open_period(
        &self,
        request: &HttpRequest,
        semester: String,
    ) -> ActixResult<HttpResponse> {
        open::get_open_period(self, request, semester).await
    }
}
