use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RubricService, rubric_cache_key};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Ngừng sử dụng rubric; phiếu đã gắn rubric vẫn giữ nguyên
/// POST /rubrics/{id}/deactivate
pub async fn deactivate_rubric(
    service: &RubricService,
    request: &HttpRequest,
    rubric_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_rubric(rubric_id).await {
        Ok(true) => {
            // Bản chụp đệm không còn đúng cờ is_active
            service
                .get_cache(request)
                .remove(&rubric_cache_key(rubric_id))
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Đã ngừng sử dụng rubric")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RubricNotFound,
            "Không tìm thấy rubric",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
