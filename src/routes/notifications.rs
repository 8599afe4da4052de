use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::notifications::requests::NotificationListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::NotificationService;

// Thể hiện NotificationService toàn cục, khởi tạo trễ
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Không xác định được người gọi",
    ))
}

// Liệt kê thông báo của người gọi
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    NOTIFICATION_SERVICE
        .list_notifications(&req, actor.id, query.into_inner())
        .await
}

// Đếm thông báo chưa đọc
pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    NOTIFICATION_SERVICE.unread_count(&req, actor.id).await
}

// Đánh dấu một thông báo đã đọc
pub async fn mark_read(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    NOTIFICATION_SERVICE
        .mark_read(&req, actor.id, path.into_inner())
        .await
}

// Đánh dấu tất cả thông báo đã đọc
pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    NOTIFICATION_SERVICE.mark_all_read(&req, actor.id).await
}

// Cấu hình route
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireActor)
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(unread_count))
            .route("/read-all", web::post().to(mark_all_read))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}
