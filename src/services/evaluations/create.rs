use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::errors::DrlError;
use crate::middlewares::Actor;
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::validate::{validate_academic_year, validate_semester, validate_student_code};
use crate::storage::Storage;

/// Tạo phiếu đánh giá (trạng thái DRAFT)
/// POST /evaluations
pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    actor: Actor,
    req: CreateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    // Sinh viên chỉ tạo phiếu cho chính mình; tạo hộ cần quyền quản trị
    let self_created = actor.student_code.as_deref() == Some(req.student_code.as_str());
    if !self_created && !actor.has_any_role(&["ADMIN", "CTSV"]) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotOwner,
            "Chỉ được tạo phiếu đánh giá cho chính mình",
        )));
    }

    if let Err(msg) = validate_student_code(&req.student_code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_semester(&req.semester) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Some(ref academic_year) = req.academic_year {
        if let Err(msg) = validate_academic_year(academic_year) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }

    // Xác nhận sinh viên tồn tại qua dịch vụ sinh viên; dịch vụ không phản
    // hồi được thì báo lỗi chứ không mặc định cho qua
    let directory = service.get_student_directory(request);
    if let Err(e) = directory.get_student_by_code(&req.student_code).await {
        return Ok(match &e {
            DrlError::NotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                e.message(),
            )),
            _ => error_response(&e),
        });
    }

    // Ghi nhận người tạo hộ để phục vụ kiểm toán
    let created_by = if self_created { None } else { Some(actor.id) };

    let storage = service.get_storage(request);
    match storage.create_evaluation(req, created_by).await {
        Ok(evaluation) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(evaluation, "Tạo phiếu thành công")))
        }
        Err(e) => Ok(match &e {
            DrlError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DuplicateEvaluation,
                e.message(),
            )),
            _ => error_response(&e),
        }),
    }
}
