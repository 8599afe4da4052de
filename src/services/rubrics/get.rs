use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RubricService, rubric_cache_key};
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::models::rubrics::entities::Rubric;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

/// Lấy rubric kèm tiêu chí, có đệm bản chụp
/// GET /rubrics/{id}
///
/// Rubric bất biến sau khi tạo (chỉ có thể bị ngừng sử dụng) nên bản chụp
/// đệm được an toàn; ngừng sử dụng sẽ xóa khóa đệm.
pub async fn get_rubric(
    service: &RubricService,
    request: &HttpRequest,
    rubric_id: i64,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);
    let key = rubric_cache_key(rubric_id);

    if let CacheResult::Found(rubric) = cache.get::<Rubric>(&key).await {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(rubric, "Truy vấn thành công")));
    }

    let storage = service.get_storage(request);

    match storage.get_rubric_by_id(rubric_id).await {
        Ok(Some(rubric)) => {
            cache
                .insert(key, &rubric, AppConfig::get().cache.default_ttl)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(rubric, "Truy vấn thành công")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RubricNotFound,
            "Không tìm thấy rubric",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
