use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PeriodService;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::periods::requests::UpdatePeriodRequest;
use crate::services::error_response;
use crate::storage::Storage;

/// Cập nhật đợt đánh giá (đổi tên, dời hạn, đóng/mở)
/// PUT /periods/{id}
pub async fn update_period(
    service: &PeriodService,
    request: &HttpRequest,
    period_id: i64,
    req: UpdatePeriodRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_period(period_id, req).await {
        Ok(Some(period)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(period, "Cập nhật đợt thành công")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PeriodNotFound,
            "Không tìm thấy đợt đánh giá",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
