use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PeriodService;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::periods::requests::CreatePeriodRequest;
use crate::services::error_response;
use crate::utils::validate::{validate_academic_year, validate_semester};
use crate::storage::Storage;

/// Tạo đợt đánh giá
/// POST /periods
pub async fn create_period(
    service: &PeriodService,
    request: &HttpRequest,
    req: CreatePeriodRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_semester(&req.semester) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_academic_year(&req.academic_year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_period(req).await {
        Ok(period) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(period, "Tạo đợt thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
