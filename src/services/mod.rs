//! Tầng nghiệp vụ
//!
//! Mỗi miền một service, mỗi thao tác một tệp. Service lấy Storage từ
//! app_data của request; các sự kiện chuyển trạng thái được phát cho bộ
//! điều phối thông báo SAU khi thao tác lưu trữ thành công.

pub mod appeals;
pub mod evaluations;
pub mod notifications;
pub mod periods;
pub mod rubrics;

pub use appeals::AppealService;
pub use evaluations::EvaluationService;
pub use notifications::NotificationService;
pub use periods::PeriodService;
pub use rubrics::RubricService;

use actix_web::HttpResponse;

use crate::errors::DrlError;
use crate::models::{ApiResponse, ErrorCode};

/// Ánh xạ lỗi nghiệp vụ sang phản hồi HTTP thống nhất
pub(crate) fn error_response(err: &DrlError) -> HttpResponse {
    let message = err.message();
    match err {
        DrlError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, message))
        }
        DrlError::Validation(_) | DrlError::DateParse(_) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
        DrlError::InvalidTransition(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::InvalidTransition, message),
        ),
        DrlError::PeriodClosed(_) => HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::PeriodClosed, message)),
        // Thua cuộc đua với một thao tác đồng thời: bên gọi tải lại rồi thử lại
        DrlError::Conflict(_) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, message))
        }
        DrlError::Ownership(_) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::NotOwner, message))
        }
        DrlError::DependencyUnresolved(_) => HttpResponse::ServiceUnavailable().json(
            ApiResponse::error_empty(ErrorCode::DependencyUnavailable, message),
        ),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            message,
        )),
    }
}
