use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AppealService;
use crate::middlewares::Actor;
use crate::models::notifications::events::TransitionEvent;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::appeals::requests::CreateAppealRequest;
use crate::services::error_response;
use crate::services::notifications::EventDispatcher;
use crate::storage::Storage;

/// Tạo kháng nghị cho phiếu đã duyệt cấp khoa của chính mình
/// POST /appeals
pub async fn create_appeal(
    service: &AppealService,
    request: &HttpRequest,
    actor: Actor,
    req: CreateAppealRequest,
) -> ActixResult<HttpResponse> {
    let Some(student_code) = actor.student_code else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotOwner,
            "Chỉ sinh viên mới được kháng nghị",
        )));
    };

    if req.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Kháng nghị phải kèm lý do",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .create_appeal(req.evaluation_id, &student_code, req.reason)
        .await
    {
        Ok(appeal) => {
            // Lấy học kỳ cho nội dung thông báo; lỗi đọc phụ không chặn kết quả
            let semester = storage
                .get_evaluation_by_id(appeal.evaluation_id)
                .await
                .ok()
                .flatten()
                .map(|e| e.semester)
                .unwrap_or_default();
            EventDispatcher::emit(TransitionEvent::AppealCreated {
                appeal_id: appeal.id,
                evaluation_id: appeal.evaluation_id,
                student_code: appeal.student_code.clone(),
                semester,
            });
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(appeal, "Tạo kháng nghị thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
