//! Middleware kiểm tra vai trò
//!
//! Bọc sau RequireActor; chặn request khi người gọi không mang vai trò nào
//! trong danh sách cho phép. Vai trò do gateway cấp (STUDENT, CLASS_MONITOR,
//! ADVISOR, FACULTY, CTSV, ADMIN).

use crate::middlewares::require_actor::Actor;
use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<Vec<&'static str>>,
}

impl RequireRole {
    pub fn any_of(roles: &[&'static str]) -> Self {
        Self {
            allowed: Rc::new(roles.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<Vec<&'static str>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = self.allowed.clone();
        Box::pin(async move {
            let permitted = req
                .extensions()
                .get::<Actor>()
                .map(|actor| actor.has_any_role(&allowed) || actor.has_role("ADMIN"))
                .unwrap_or(false);

            if !permitted {
                let response = HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Không có quyền thực hiện thao tác này",
                ));
                return Ok(req.into_response(response.map_into_right_body()));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}
