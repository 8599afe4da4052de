use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Xóa bản nháp của chính mình
/// DELETE /evaluations/{id}
pub async fn delete_draft(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    // Xóa yêu cầu danh tính sinh viên; tầng lưu trữ đối chiếu chủ phiếu
    let Some(student_code) = actor.student_code else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotOwner,
            "Chỉ sinh viên chủ phiếu mới được xóa bản nháp",
        )));
    };

    let storage = service.get_storage(request);

    match storage
        .delete_draft_evaluation(evaluation_id, &student_code)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Đã xóa bản nháp"))),
        Err(e) => Ok(error_response(&e)),
    }
}
