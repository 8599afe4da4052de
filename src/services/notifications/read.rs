use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Đánh dấu một thông báo đã đọc
/// POST /notifications/{id}/read
pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // Chỉ chạm được vào thông báo của chính mình
    match storage.mark_notification_as_read(user_id, notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Đã đánh dấu đã đọc"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Không tìm thấy thông báo",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Đánh dấu tất cả thông báo của người gọi đã đọc
/// POST /notifications/read-all
pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user_id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            count,
            "Đã đánh dấu tất cả đã đọc",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
