use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::ApproveEvaluationRequest;
use crate::models::notifications::events::TransitionEvent;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Duyệt phiếu lên cấp kế tiếp
/// POST /evaluations/{id}/approve
///
/// Vai trò duyệt đã được chặn ở middleware; ở đây chỉ còn nghiệp vụ chuyển
/// trạng thái.
pub async fn approve_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
    req: ApproveEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .approve_evaluation(evaluation_id, req.comment, Some(actor.id), actor.name)
        .await
    {
        Ok(evaluation) => {
            if evaluation.status.is_final() {
                EventDispatcher::emit(TransitionEvent::EvaluationFinalApproved {
                    evaluation_id: evaluation.id,
                    student_code: evaluation.student_code.clone(),
                    semester: evaluation.semester.clone(),
                    total_points: evaluation.total_points,
                });
            } else {
                EventDispatcher::emit(TransitionEvent::EvaluationEscalated {
                    evaluation_id: evaluation.id,
                    student_code: evaluation.student_code.clone(),
                    next_level: evaluation.status.approval_level(),
                });
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "Duyệt phiếu thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
