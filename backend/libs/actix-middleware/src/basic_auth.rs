//! HTTP Basic authentication middleware
//!
//! Authenticates every request against a single in-memory user. Requests whose
//! path is on the public allow-list pass through untouched; everything else
//! needs an `Authorization: Basic <base64(user:password)>` header or is
//! answered with `401` and a `WWW-Authenticate` challenge before reaching the
//! wrapped service.
//!
//! ## Example
//! ```rust,no_run
//! use actix_middleware::{BasicAuthConfig, BasicAuthMiddleware, InMemoryUser};
//! use actix_web::App;
//!
//! let user = InMemoryUser::new("admin", "password", ["USER", "ADMIN"]);
//! let app = App::new().wrap(BasicAuthMiddleware::new(BasicAuthConfig::new(user)));
//! ```

use crate::public_paths::PublicPaths;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::LocalBoxFuture;
use std::fmt;
use std::future::{ready, Ready};
use std::sync::Arc;
use thiserror::Error;

/// Authentication failures, all rendered as `401 Unauthorized`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization must use Basic scheme")]
    InvalidScheme,

    #[error("Malformed Basic credentials")]
    MalformedCredentials,

    #[error("Bad credentials")]
    BadCredentials,
}

/// The single user known to the service
#[derive(Clone)]
pub struct InMemoryUser {
    username: String,
    password: String,
    roles: Vec<String>,
}

impl InMemoryUser {
    pub fn new<R, S>(username: impl Into<String>, password: impl Into<String>, roles: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both comparisons so timing does not reveal which one failed
        let user_ok = constant_time_compare(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_compare(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

impl fmt::Debug for InMemoryUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("roles", &self.roles)
            .finish()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

/// Principal stored in request extensions after successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}

/// Immutable authentication settings shared by every worker
#[derive(Debug, Clone)]
pub struct BasicAuthConfig {
    user: InMemoryUser,
    public_paths: PublicPaths,
    realm: String,
}

impl BasicAuthConfig {
    pub fn new(user: InMemoryUser) -> Self {
        Self {
            user,
            public_paths: PublicPaths::default(),
            realm: "Realm".to_string(),
        }
    }

    pub fn with_public_paths(mut self, public_paths: PublicPaths) -> Self {
        self.public_paths = public_paths;
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn public_paths(&self) -> &PublicPaths {
        &self.public_paths
    }

    /// Validate an `Authorization` header value
    pub fn authenticate(
        &self,
        header: Option<&HeaderValue>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let raw = header
            .ok_or(AuthError::MissingHeader)?
            .to_str()
            .map_err(|_| AuthError::MalformedCredentials)?;

        let (scheme, encoded) = raw.trim().split_once(' ').ok_or(AuthError::InvalidScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::InvalidScheme);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::MalformedCredentials)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthError::MalformedCredentials)?;

        if !self.user.verify(username, password) {
            return Err(AuthError::BadCredentials);
        }

        Ok(AuthenticatedUser {
            username: self.user.username.clone(),
            roles: self.user.roles.clone(),
        })
    }

    fn challenge(&self, err: &AuthError) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", self.realm),
            ))
            .json(serde_json::json!({
                "error": err.to_string(),
                "status": 401,
            }))
    }
}

/// HTTP Basic Authentication Middleware
#[derive(Clone)]
pub struct BasicAuthMiddleware {
    config: Arc<BasicAuthConfig>,
}

impl BasicAuthMiddleware {
    pub fn new(config: BasicAuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn from_shared(config: Arc<BasicAuthConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddlewareService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct BasicAuthMiddlewareService<S> {
    service: S,
    config: Arc<BasicAuthConfig>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.config.public_paths.is_public(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) });
        }

        match self
            .config
            .authenticate(req.headers().get(header::AUTHORIZATION))
        {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(err) => {
                tracing::warn!(
                    method = %req.method(),
                    path = %req.path(),
                    reason = %err,
                    "Basic authentication rejected"
                );
                let response = self.config.challenge(&err);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
