use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AppealService;
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::appeals::requests::ReviewAppealRequest;
use crate::models::notifications::events::TransitionEvent;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Xét kháng nghị; mỗi kháng nghị chỉ xét một lần
/// POST /appeals/{id}/review
pub async fn review_appeal(
    service: &AppealService,
    request: &HttpRequest,
    actor: Actor,
    appeal_id: i64,
    req: ReviewAppealRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .review_appeal(appeal_id, req.decision, actor.id, req.comment)
        .await
    {
        Ok(appeal) => {
            EventDispatcher::emit(TransitionEvent::AppealReviewed {
                appeal_id: appeal.id,
                student_code: appeal.student_code.clone(),
                decision: appeal.status,
            });
            Ok(HttpResponse::Ok().json(ApiResponse::success(appeal, "Xét kháng nghị thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
