use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, check_evaluation_owner};
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::notifications::events::TransitionEvent;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Nộp phiếu chờ duyệt (DRAFT → SUBMITTED)
/// POST /evaluations/{id}/submit
pub async fn submit_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_evaluation_owner(&storage, &actor, evaluation_id).await {
        return Ok(resp);
    }

    match storage.submit_evaluation(evaluation_id).await {
        Ok(evaluation) => {
            // Tác dụng phụ chỉ phát sau khi chuyển trạng thái đã ghi xong
            EventDispatcher::emit(TransitionEvent::EvaluationSubmitted {
                evaluation_id: evaluation.id,
                student_code: evaluation.student_code.clone(),
                semester: evaluation.semester.clone(),
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "Nộp phiếu thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
