use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::{EvaluationListQuery, PendingReviewQuery};
use crate::services::error_response;
use crate::storage::Storage;

/// Liệt kê phiếu theo sinh viên / học kỳ / trạng thái
/// GET /evaluations
pub async fn list_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    query: EvaluationListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluations_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Liệt kê phiếu chờ duyệt theo cấp, phiếu nộp sớm xếp trước
/// GET /evaluations/pending
pub async fn list_pending_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    query: PendingReviewQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_pending_evaluations(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
