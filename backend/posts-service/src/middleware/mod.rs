/// HTTP middleware for the posts service
///
/// JWT bearer-token authentication: the middleware validates the token via
/// `auth-core` and stores the resolved caller id in request extensions;
/// handlers receive it through the `UserId` extractor. Rejections render
/// the standard `{"error": ...}` body with status 401.
use crate::error::AppError;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use auth_core::jwt;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Extracted caller identifier stored in request extensions after auth.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub i64);

/// Actix middleware that validates a Bearer token using the shared JWT
/// helpers.
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| unauthorized("Missing Authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized("Invalid Authorization scheme"))?;

            let claims = jwt::validate_token(token)
                .map_err(|_| unauthorized("Invalid or expired token"))?;

            let user_id = claims
                .claims
                .sub
                .parse::<i64>()
                .map_err(|_| unauthorized("Invalid user id in token"))?;

            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await
        })
    }
}

fn unauthorized(msg: &str) -> Error {
    AppError::Unauthorized(msg.to_string()).into()
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .copied()
                .ok_or_else(|| unauthorized("Caller identity missing")),
        )
    }
}
