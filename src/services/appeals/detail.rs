use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{APPEAL_REVIEWER_ROLES, AppealService};
use crate::middlewares::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Lấy kháng nghị theo ID; chỉ chủ kháng nghị và người xét được xem
/// GET /appeals/{id}
pub async fn get_appeal(
    service: &AppealService,
    request: &HttpRequest,
    actor: Actor,
    appeal_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_appeal_by_id(appeal_id).await {
        Ok(Some(appeal)) => {
            let is_owner = actor.student_code.as_deref() == Some(appeal.student_code.as_str());
            let is_reviewer =
                actor.has_any_role(APPEAL_REVIEWER_ROLES) || actor.has_role("ADMIN");
            if !is_owner && !is_reviewer {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotOwner,
                    "Không có quyền xem kháng nghị này",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(appeal, "Truy vấn thành công")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AppealNotFound,
            "Không tìm thấy kháng nghị",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
