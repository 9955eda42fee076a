//! Two-stage request authentication.
//!
//! Stage one ([`validate_token`]) checks the bearer token and stores a
//! [`ValidatedToken`] in the request extensions. Stage two
//! ([`resolve_identity`]) turns that token into the stored user and stores an
//! [`AuthenticatedUser`]. Handlers read the latter with
//! `Extension<AuthenticatedUser>`.
//!
//! Both stages are installed with `route_layer`, so the layer added last
//! (`validate_token`) runs first.

use auth::Authenticator;
use auth::Claims;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Access token that passed signature, algorithm, expiry and kind checks.
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub raw: String,
    pub subject: String,
    pub claims: Claims,
}

/// Identity resolved from a [`ValidatedToken`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: Claims,
}

/// Reasons a request is turned away by the pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedAuthHeader,

    #[error("{0}")]
    InvalidToken(#[from] JwtError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Authentication pipeline misconfigured")]
    InternalPipelineError,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::InternalPipelineError => {
                ApiError::InternalServerError(self.to_string()).into_response()
            }
            _ => ApiError::Unauthorized(self.to_string()).into_response(),
        }
    }
}

/// Extract and verify the bearer access token.
///
/// # Errors
/// * `MissingToken` - No `Authorization` header
/// * `MalformedAuthHeader` - Header is not `Bearer <token>`
/// * `InvalidToken` - Token failed verification
pub fn validate(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<ValidatedToken, AuthRejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthRejection::MissingToken)?;

    let token = value
        .to_str()
        .map_err(|_| AuthRejection::MalformedAuthHeader)?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthRejection::MalformedAuthHeader)?;

    let verified = authenticator.verify_access_token(token)?;

    Ok(ValidatedToken {
        raw: token.to_string(),
        subject: verified.subject,
        claims: verified.claims,
    })
}

/// Resolve the stored user behind a validated token.
///
/// # Errors
/// * `InternalPipelineError` - Stage one did not run
/// * `Unauthorized` - Subject is not a user id, no longer exists, or the
///   lookup failed
pub async fn resolve(
    token: Option<ValidatedToken>,
    user_service: &dyn UserServicePort,
) -> Result<AuthenticatedUser, AuthRejection> {
    let token = token.ok_or(AuthRejection::InternalPipelineError)?;

    let user_id = UserId::from_string(&token.subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        AuthRejection::Unauthorized
    })?;

    let user = user_service.get_user(&user_id).await.map_err(|e| {
        match &e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists")
            }
            _ => tracing::error!(user_id = %user_id, error = %e, "Identity lookup failed"),
        }
        AuthRejection::Unauthorized
    })?;

    Ok(AuthenticatedUser {
        user,
        claims: token.claims,
    })
}

/// Stage one: verify the bearer token.
pub async fn validate_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let validated = validate(req.headers(), &state.authenticator).map_err(|rejection| {
        tracing::warn!(reason = ?rejection, "Token validation failed");
        rejection
    })?;

    req.extensions_mut().insert(validated);
    Ok(next.run(req).await)
}

/// Stage two: resolve the token subject to a stored user.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let validated = req.extensions().get::<ValidatedToken>().cloned();

    let authenticated = resolve(validated, state.user_service.as_ref())
        .await
        .map_err(|rejection| {
            if rejection == AuthRejection::InternalPipelineError {
                tracing::error!("Identity resolution ran without a validated token");
            }
            rejection
        })?;

    tracing::debug!(user_id = %authenticated.user.id, "Request authenticated");

    req.extensions_mut().insert(authenticated);
    Ok(next.run(req).await)
}
