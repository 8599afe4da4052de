use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, REVIEWER_ROLES};
use crate::middlewares::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Người gọi được xem phiếu khi là chủ phiếu hoặc mang vai trò duyệt
fn can_view(actor: &Actor, owner_code: &str) -> bool {
    actor.student_code.as_deref() == Some(owner_code)
        || actor.has_any_role(REVIEWER_ROLES)
        || actor.has_role("ADMIN")
}

/// Lấy phiếu kèm chi tiết và lịch sử
/// GET /evaluations/{id}
pub async fn get_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => {
            if !can_view(&actor, &evaluation.student_code) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotOwner,
                    "Không có quyền xem phiếu đánh giá này",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "Truy vấn thành công")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "Không tìm thấy phiếu đánh giá",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Đọc lịch sử một phiếu
/// GET /evaluations/{id}/history
pub async fn get_evaluation_history(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
    newest_first: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // Quyền xem lịch sử trùng với quyền xem phiếu
    match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => {
            if !can_view(&actor, &evaluation.student_code) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotOwner,
                    "Không có quyền xem phiếu đánh giá này",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Không tìm thấy phiếu đánh giá",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    match storage
        .list_evaluation_history(evaluation_id, newest_first)
        .await
    {
        Ok(history) => Ok(HttpResponse::Ok().json(ApiResponse::success(history, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
