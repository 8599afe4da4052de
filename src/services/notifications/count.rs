use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::services::error_response;
use crate::storage::Storage;

/// Đếm thông báo chưa đọc của người gọi
/// GET /notifications/unread-count
pub async fn unread_count(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_unread_notification_count(user_id).await {
        Ok(unread) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread },
            "Truy vấn thành công",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
