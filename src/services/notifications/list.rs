use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::requests::NotificationListQuery;
use crate::services::error_response;
use crate::storage::Storage;

/// Liệt kê thông báo của người gọi
/// GET /notifications
pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
    query: NotificationListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_notifications_with_pagination(user_id, query)
        .await
    {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
