use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, check_evaluation_owner};
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::ResubmitEvaluationRequest;
use crate::models::notifications::events::TransitionEvent;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Nộp lại phiếu sau khi bị từ chối
/// POST /evaluations/{id}/resubmit
///
/// Phiếu quay về đúng cấp đã từ chối; chi tiết điểm được thay toàn bộ.
pub async fn resubmit_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
    req: ResubmitEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_evaluation_owner(&storage, &actor, evaluation_id).await {
        return Ok(resp);
    }

    match storage
        .resubmit_evaluation(evaluation_id, req.details, req.response_to_rejection)
        .await
    {
        Ok(evaluation) => {
            EventDispatcher::emit(TransitionEvent::EvaluationResubmitted {
                evaluation_id: evaluation.id,
                student_code: evaluation.student_code.clone(),
                resume_level: evaluation.status.approval_level(),
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "Nộp lại phiếu thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
