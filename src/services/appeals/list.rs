use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{APPEAL_REVIEWER_ROLES, AppealService};
use crate::middlewares::Actor;
use crate::models::ApiResponse;
use crate::models::appeals::requests::AppealListQuery;
use crate::services::error_response;
use crate::storage::Storage;

/// Liệt kê kháng nghị
/// GET /appeals
///
/// Sinh viên chỉ thấy kháng nghị của mình; người xét thấy tất cả.
pub async fn list_appeals(
    service: &AppealService,
    request: &HttpRequest,
    actor: Actor,
    mut query: AppealListQuery,
) -> ActixResult<HttpResponse> {
    let is_reviewer = actor.has_any_role(APPEAL_REVIEWER_ROLES) || actor.has_role("ADMIN");
    if !is_reviewer {
        query.student_code = actor.student_code.clone();
    }

    let storage = service.get_storage(request);

    match storage.list_appeals_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
