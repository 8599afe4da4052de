/*!
 * Middleware danh tính người gọi
 *
 * Dịch vụ này đứng sau API gateway; gateway xác thực JWT rồi chuyển danh
 * tính xuống qua các header tin cậy:
 *
 * - `X-User-Id`: ID người dùng (bắt buộc)
 * - `X-User-Name`: tên hiển thị
 * - `X-Student-Code`: mã sinh viên (nếu người gọi là sinh viên)
 * - `X-Roles`: danh sách vai trò, phân tách bằng dấu phẩy
 *
 * Middleware đọc các header này, dựng [`Actor`] và gắn vào request extension
 * cho các handler phía sau. Thiếu `X-User-Id` thì trả 401 ngay.
 */

use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

const USER_ID_HEADER: &str = "X-User-Id";
const USER_NAME_HEADER: &str = "X-User-Name";
const STUDENT_CODE_HEADER: &str = "X-Student-Code";
const ROLES_HEADER: &str = "X-Roles";

/// Danh tính người gọi do gateway cung cấp
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i64,
    pub name: Option<String>,
    pub student_code: Option<String>,
    pub roles: Vec<String>,
}

impl Actor {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| self.has_role(r))
    }
}

#[derive(Clone)]
pub struct RequireActor;

// Hàm phụ trợ: dựng phản hồi lỗi
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                message,
            )),
    }
}

fn header_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// Hàm phụ trợ: dựng Actor từ các header tin cậy của gateway
fn extract_actor(req: &ServiceRequest) -> Result<Actor, String> {
    let id = header_value(req, USER_ID_HEADER)
        .ok_or_else(|| format!("Thiếu header {USER_ID_HEADER}"))?
        .parse::<i64>()
        .map_err(|_| format!("Header {USER_ID_HEADER} không phải số hợp lệ"))?;

    let roles = header_value(req, ROLES_HEADER)
        .map(|raw| {
            raw.split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(Actor {
        id,
        name: header_value(req, USER_NAME_HEADER),
        student_code: header_value(req, STUDENT_CODE_HEADER),
        roles,
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireActor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireActorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireActorMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireActorMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireActorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // Cho qua các request OPTIONS (preflight CORS)
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match extract_actor(&req) {
                Ok(actor) => {
                    debug!("Xác định người gọi thành công, ID: {}", actor.id);
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => Ok(req.into_response(
                    create_error_response(StatusCode::UNAUTHORIZED, &err).map_into_right_body(),
                )),
            }
        })
    }
}

// Hàm phụ trợ: trích danh tính từ request trong các handler
impl RequireActor {
    /// Lấy Actor từ request extension.
    /// Chỉ dùng trong các route đã bọc middleware RequireActor.
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().cloned()
    }

    /// Lấy mã sinh viên của người gọi (nếu có)
    pub fn extract_student_code(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions()
            .get::<Actor>()
            .and_then(|a| a.student_code.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[&str]) -> Actor {
        Actor {
            id: 1,
            name: None,
            student_code: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_has_role() {
        let a = actor(&["STUDENT", "CLASS_MONITOR"]);
        assert!(a.has_role("CLASS_MONITOR"));
        assert!(!a.has_role("ADMIN"));
    }

    #[test]
    fn test_has_any_role() {
        let a = actor(&["FACULTY"]);
        assert!(a.has_any_role(&["ADMIN", "FACULTY"]));
        assert!(!a.has_any_role(&["ADMIN", "CTSV"]));
        assert!(!actor(&[]).has_any_role(&["ADMIN"]));
    }
}
