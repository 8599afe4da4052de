use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PeriodService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Tìm đợt đang mở cho một học kỳ tại thời điểm hiện tại
/// GET /periods/open?semester=...
pub async fn get_open_period(
    service: &PeriodService,
    request: &HttpRequest,
    semester: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .get_open_period_for_semester(&semester, chrono::Utc::now())
        .await
    {
        Ok(Some(period)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(period, "Truy vấn thành công")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PeriodNotFound,
            format!("Không có đợt đánh giá nào đang mở cho học kỳ '{semester}'"),
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
