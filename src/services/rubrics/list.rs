use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RubricService;
use crate::models::ApiResponse;
use crate::models::rubrics::requests::RubricListQuery;
use crate::services::error_response;
use crate::storage::Storage;

/// Liệt kê rubric
/// GET /rubrics
pub async fn list_rubrics(
    service: &RubricService,
    request: &HttpRequest,
    query: RubricListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_rubrics_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Truy vấn thành công"))),
        Err(e) => Ok(error_response(&e)),
    }
}
