use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RubricService;
use crate::models::ApiResponse;
use crate::models::rubrics::requests::CreateRubricRequest;
use crate::services::error_response;
use crate::storage::Storage;

/// Tạo rubric kèm danh sách tiêu chí
/// POST /rubrics
pub async fn create_rubric(
    service: &RubricService,
    request: &HttpRequest,
    req: CreateRubricRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_rubric(req).await {
        Ok(rubric) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(rubric, "Tạo rubric thành công")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
