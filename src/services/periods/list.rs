use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PeriodService;
use crate::models::ApiResponse;
use crate::models::periods::requests::PeriodListQuery;
use crate::services::error_response;
use crate::storage::Storage;

/// Liệt kê đợt đánh giá
/// GET /periods
pub async fn list_periods(
    service: &PeriodService,
    request: &HttpRequest,
    query: PeriodListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_periods_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
