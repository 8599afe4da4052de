use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::periods::requests::{CreatePeriodRequest, PeriodListQuery, UpdatePeriodRequest};
use crate::services::PeriodService;

// Thể hiện PeriodService toàn cục, khởi tạo trễ
static PERIOD_SERVICE: Lazy<PeriodService> = Lazy::new(PeriodService::new_lazy);

/// Tham số tìm đợt đang mở
#[derive(Debug, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/period.ts")]
pub struct OpenPeriodQuery {
    pub semester: String,
}

// Tạo đợt đánh giá
pub async fn create_period(
    req: HttpRequest,
    body: web::Json<CreatePeriodRequest>,
) -> ActixResult<HttpResponse> {
    PERIOD_SERVICE.create_period(&req, body.into_inner()).await
}

// Cập nhật đợt đánh giá
pub async fn update_period(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdatePeriodRequest>,
) -> ActixResult<HttpResponse> {
    PERIOD_SERVICE
        .update_period(&req, path.into_inner(), body.into_inner())
        .await
}

// Liệt kê đợt đánh giá
pub async fn list_periods(
    req: HttpRequest,
    query: web::Query<PeriodListQuery>,
) -> ActixResult<HttpResponse> {
    PERIOD_SERVICE.list_periods(&req, query.into_inner()).await
}

// Tìm đợt đang mở cho một học kỳ
pub async fn get_open_period(
    req: HttpRequest,
    query: web::Query<OpenPeriodQuery>,
) -> ActixResult<HttpResponse> {
    PERIOD_SERVICE
        .get_open_period(&req, query.into_inner().semester)
        .await
}

// Cấu hình route
pub fn configure_periods_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/periods")
            .wrap(middlewares::RequireActor)
            .route("", web::get().to(list_periods))
            .route("/open", web::get().to(get_open_period))
            .service(
                // Mở/đóng đợt đánh giá thuộc về CTSV
                web::scope("")
                    .wrap(middlewares::RequireRole::any_of(&["CTSV"]))
                    .route("", web::post().to(create_period))
                    .route("/{id}", web::put().to(update_period)),
            ),
    );
}
