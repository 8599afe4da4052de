pub mod count;
pub mod dispatcher;
pub mod list;
pub mod read;
pub mod scheduler;

pub use dispatcher::EventDispatcher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::NotificationListQuery;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
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

    /// Liệt kê thông báo của người gọi
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        user_id: i64,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, user_id, query).await
    }

    /// Đếm thông báo chưa đọc
    pub async fn unread_count(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        count::unread_count(self, request, user_id).await
    }

    /// Đánh dấu một thông báo đã đọc
    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        user_id: i64,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_read(self, request, user_id, notification_id).await
    }

    /// Đánh dấu tất cả thông báo đã đọc
    pub async fn mark_all_read(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::mark_all_read(self, request, user_id).await
    }
}
