//! Authenticated owner identity
//!
//! The identity provider in front of this service authenticates the caller
//! and forwards the owner id in the `X-User-Id` header. The extractor only
//! checks that the header is present and non-empty; everything beyond that
//! is the gateway's responsibility.

use crate::error::AppError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Owner id extracted from the trusted gateway header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| AuthenticatedUser(id.to_string()))
            .ok_or(AppError::Unauthenticated);
        ready(user)
    }
}
