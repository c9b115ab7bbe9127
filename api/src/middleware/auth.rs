//! Bearer token authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the access token from the `Authorization`
//! header, verifies it and injects the caller's [`AuthContext`] into the
//! request extensions. Requests without a valid access token never reach
//! the wrapped handler: they are answered with `401` and the standard
//! failure envelope.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;
use ts_core::{
    Claims, DomainError, Identity, RevocationRepository, TokenAudience, TokenCodec, TokenService,
};

use crate::handlers::error::handle_domain_error;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext(pub Identity);

impl AuthContext {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn into_identity(self) -> Identity {
        self.0
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self(Identity::from(claims))
    }
}

impl Deref for AuthContext {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

/// Anything that can check an access token
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError>;
}

impl<R: RevocationRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

impl AccessTokenVerifier for TokenCodec {
    fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, TokenAudience::Access)
            .map_err(DomainError::from)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl JwtAuth {
    /// Creates the middleware around a shared verifier
    pub fn new<V: AccessTokenVerifier + 'static>(verifier: Arc<V>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    debug!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req, &DomainError::Unauthenticated));
                }
            };

            let claims = match verifier.verify_access_token(&token) {
                Ok(claims) => claims,
                Err(error) => {
                    debug!(path = %req.path(), "Bearer token rejected");
                    return Ok(reject(req, &error));
                }
            };

            req.extensions_mut().insert(AuthContext::from(claims));

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, error: &DomainError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(handle_domain_error(error))
        .map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_basic = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dTE6cGFzcw=="))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_basic), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[::core::prelude::v1::test]
    fn test_auth_context_derefs_to_identity() {
        let identity = Identity {
            subject: "u1".to_string(),
            email: None,
            role: Some("admin".to_string()),
            token_id: "jti".to_string(),
            expires_at: chrono::Utc::now(),
        };
        let context = AuthContext(identity.clone());

        assert_eq!(context.subject, "u1");
        assert_eq!(context.into_identity(), identity);
    }
}
