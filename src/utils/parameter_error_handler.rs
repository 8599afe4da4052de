//! Bộ xử lý lỗi tham số cho actix-web
//!
//! Biến lỗi phân tích JSON body và query string thành phản hồi ApiResponse
//! thống nhất thay vì trang lỗi mặc định của framework.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

/// Xử lý lỗi phân tích JSON body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Nội dung JSON không hợp lệ: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

/// Xử lý lỗi phân tích query string
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Tham số truy vấn không hợp lệ: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}
