//! Bearer-token authentication.
//!
//! The core trusts whatever owner id the [`Authenticator`] resolves; the
//! trait is the seam to the external identity provider. The bundled
//! [`JwtAuthenticator`] verifies HS256-signed tokens with a shared secret
//! and uses the `sub` claim as the owner id.

use std::future::Future;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::api::AppState;
use crate::api::v1::ErrorResponse;
use crate::db::HabitStore;

/// Authentication errors.
#[derive(Error, Diagnostic, Debug)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    #[diagnostic(code(habitd::auth::missing_credentials))]
    MissingCredentials,

    #[error("Invalid token: {message}")]
    #[diagnostic(code(habitd::auth::invalid_token))]
    InvalidToken { message: String },
}

/// Resolves a bearer credential to an owner id.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// Claims carried by habit tokens. Only `sub` is consumed; `exp` is
/// checked by the validator.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: i64,
}

/// HS256 JWT verification against a shared secret.
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "token verification failed");
            AuthError::InvalidToken {
                message: e.to_string(),
            }
        })?;
        Ok(data.claims.sub)
    }
}

/// The authenticated requester, extracted from the `Authorization: Bearer`
/// header. Handlers take this to scope every store operation to its owner.
pub struct Owner(pub String);

impl<S, A> FromRequestParts<AppState<S, A>> for Owner
where
    S: HabitStore + 'static,
    A: Authenticator + 'static,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, A>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized(AuthError::MissingCredentials))?;

        let owner_id = state
            .authenticator()
            .authenticate(token)
            .await
            .map_err(unauthorized)?;

        Ok(Owner(owner_id))
    }
}

fn unauthorized(e: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
