use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::Actor;
use crate::models::evaluations::workflow::ApprovalLevel;
use crate::models::notifications::events::TransitionEvent;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::evaluations::requests::RejectEvaluationRequest;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Từ chối phiếu kèm lý do
/// POST /evaluations/{id}/reject
pub async fn reject_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
    req: RejectEvaluationRequest,
) -> ActixResult<HttpResponse> {
    if req.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Từ chối phiếu phải kèm lý do",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .reject_evaluation(evaluation_id, req.reason.clone(), Some(actor.id), actor.name)
        .await
    {
        Ok(evaluation) => {
            EventDispatcher::emit(TransitionEvent::EvaluationReturned {
                evaluation_id: evaluation.id,
                student_code: evaluation.student_code.clone(),
                level: evaluation
                    .last_rejection_level
                    .unwrap_or(ApprovalLevel::None),
                reason: req.reason,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "Đã từ chối phiếu")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
