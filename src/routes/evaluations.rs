use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::evaluations::requests::{
    ApproveEvaluationRequest, CreateEvaluationRequest, EvaluationListQuery, PendingReviewQuery,
    RejectEvaluationRequest, ResubmitEvaluationRequest, UpdateEvaluationRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::EvaluationService;
use crate::services::evaluations::REVIEWER_ROLES;

// Thể hiện EvaluationService toàn cục, khởi tạo trễ
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Không xác định được người gọi",
    ))
}

// Tạo phiếu đánh giá
pub async fn create_evaluation(
    req: HttpRequest,
    body: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .create_evaluation(&req, actor, body.into_inner())
        .await
}

// Lấy phiếu theo ID
pub async fn get_evaluation(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .get_evaluation(&req, actor, path.into_inner())
        .await
}

/// Tham số đọc lịch sử
#[derive(Debug, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct HistoryQuery {
    /// "asc" = cũ nhất trước; mặc định mới nhất trước
    pub order: Option<String>,
}

// Đọc lịch sử phiếu
pub async fn get_evaluation_history(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<HistoryQuery>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    let newest_first = query.order.as_deref() != Some("asc");
    EVALUATION_SERVICE
        .get_evaluation_history(&req, actor, path.into_inner(), newest_first)
        .await
}

// Liệt kê phiếu
pub async fn list_evaluations(
    req: HttpRequest,
    query: web::Query<EvaluationListQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluations(&req, query.into_inner())
        .await
}

// Liệt kê phiếu chờ duyệt
pub async fn list_pending_evaluations(
    req: HttpRequest,
    query: web::Query<PendingReviewQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_pending_evaluations(&req, query.into_inner())
        .await
}

// Cập nhật bản nháp
pub async fn update_draft(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .update_draft(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// Nộp phiếu
pub async fn submit_evaluation(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .submit_evaluation(&req, actor, path.into_inner())
        .await
}

// Duyệt phiếu
pub async fn approve_evaluation(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ApproveEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .approve_evaluation(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// Từ chối phiếu
pub async fn reject_evaluation(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<RejectEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .reject_evaluation(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// Nộp lại phiếu
pub async fn resubmit_evaluation(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ResubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .resubmit_evaluation(&req, actor, path.into_inner(), body.into_inner())
        .await
}

// Xóa bản nháp
pub async fn delete_draft(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(a) => a,
        None => return Ok(unauthorized()),
    };

    EVALUATION_SERVICE
        .delete_draft(&req, actor, path.into_inner())
        .await
}

// Cấu hình route
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireActor)
            .route("", web::post().to(create_evaluation))
            .route("", web::get().to(list_evaluations))
            .route("/pending", web::get().to(list_pending_evaluations))
            .route("/{id}", web::get().to(get_evaluation))
            .route("/{id}", web::put().to(update_draft))
            .route("/{id}", web::delete().to(delete_draft))
            .route("/{id}/history", web::get().to(get_evaluation_history))
            .route("/{id}/submit", web::post().to(submit_evaluation))
            .route("/{id}/resubmit", web::post().to(resubmit_evaluation))
            .service(
                // Duyệt và từ chối dành riêng cho các vai trò xét duyệt
                web::scope("")
                    .wrap(middlewares::RequireRole::any_of(REVIEWER_ROLES))
                    .route("/{id}/approve", web::post().to(approve_evaluation))
                    .route("/{id}/reject", web::post().to(reject_evaluation)),
            ),
    );
}
