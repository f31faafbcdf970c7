//! Authentication middleware for budget drafting routes.

use std::convert::Infallible;

use axum::{
    extract::{OptionalFromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use sentinel_shared::{AppError, Claims, JwtError, Role};
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Cookie set by the web client after login.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// Does nothing when no JWT secret is configured. Otherwise:
/// 1. Takes the token from the `Authorization: Bearer` header, falling back
///    to the `access_token` cookie
/// 2. Validates the token using the JWT service
/// 3. Requires the `Admin` or `Finance` role
/// 4. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(jwt_service) = state.jwt_service.as_ref() else {
        return next.run(request).await;
    };

    let header_token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(str::to_string);

    let Some(token) = header_token.or_else(|| {
        jar.get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }) else {
        return ApiError(AppError::Unauthorized(
            "Authorization header with Bearer token is required".into(),
        ))
        .into_response();
    };

    let claims = match jwt_service.validate_token(&token) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => {
            return ApiError(AppError::Unauthorized("Token has expired".into())).into_response();
        }
        Err(e) => {
            debug!(error = %e, "Rejected token");
            return ApiError(AppError::Unauthorized("Invalid or malformed token".into()))
                .into_response();
        }
    };

    if !claims.has_any_role(&Role::BUDGET_DRAFTERS) {
        return ApiError(AppError::Forbidden(format!(
            "Role '{}' is not permitted to draft budgets",
            claims.role
        )))
        .into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// Optional extractor for authenticated user claims.
///
/// Yields `None` when authentication is disabled.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Claims>().cloned().map(AuthUser))
    }
}
