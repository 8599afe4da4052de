use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::appeals::requests::{AppealListQuery, CreateAppealRequest, ReviewAppealRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AppealService;
use crate::services::appeals::APPEAL_REVIEWER_ROLES;

// Thể hiện AppealService toàn cục, khởi tạo trễ
static APPEAL_SERVICE: Lazy<AppealService> = Lazy::new(AppealService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Không xác định được người gọi",
    ))
}

// Tạo kháng nghị
pub async fn create_appeal(
    req: HttpRequest,
    body: web::Json<CreateAppealRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    APPEAL_SERVICE
        .create_appeal(&req, actor, body.into_inner())
        .await
}

// Lấy kháng nghị theo ID
pub async fn get_appeal(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    APPEAL_SERVICE.get_appeal(&req, actor, path.into_inner()).await
}

// Xét kháng nghị
pub async fn review_appeal(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ReviewAppealRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    APPEAL_SERVICE
        .review_appeal(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// Liệt kê kháng nghị
pub async fn list_appeals(
    req: HttpRequest,
    query: web::Query<AppealListQuery>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    APPEAL_SERVICE
        .list_appeals(&req, actor, query.into_inner())
        .await
}

// Cấu hình route
pub fn configure_appeals_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/appeals")
            .wrap(middlewares::RequireActor)
            .route("", web::post().to(create_appeal))
            .route("", web::get().to(list_appeals))
            .route("/{id}", web::get().to(get_appeal))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::any_of(APPEAL_REVIEWER_ROLES))
                    .route("/{id}/review", web::post().to(review_appeal)),
            ),
    );
}
