use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, check_evaluation_owner};
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::evaluations::requests::UpdateEvaluationRequest;
use crate::services::error_response;
use crate::storage::Storage;

/// Cập nhật bản nháp: thay toàn bộ chi tiết điểm và tính lại tổng
/// PUT /evaluations/{id}
pub async fn update_draft(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    evaluation_id: i64,
    req: UpdateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_evaluation_owner(&storage, &actor, evaluation_id).await {
        return Ok(resp);
    }

    match storage.update_draft_details(evaluation_id, req.details).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluation,
            "Cập nhật phiếu thành công",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
