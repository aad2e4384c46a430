use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};

use super::{jwt::JwtKeys, repo::UserStore, repo_types::User};
use crate::{error::AppError, state::AppState};

const NOT_AUTHENTICATED: &str = "Not authenticated";
const BAD_CREDENTIALS: &str = "Could not validate credentials";

/// The authenticated caller of a protected route.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized(NOT_AUTHENTICATED))?;

        let token = bearer_token(header).ok_or(AppError::Unauthorized(NOT_AUTHENTICATED))?;

        let user = authenticate(&state.keys, state.users.as_ref(), token).await?;
        Ok(CurrentUser(user))
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves a raw bearer token to the user it was issued for.
pub async fn authenticate(
    keys: &JwtKeys,
    users: &dyn UserStore,
    token: &str,
) -> Result<User, AppError> {
    let claims = keys.verify(token).map_err(|e| {
        debug!(error = %e, "bearer token rejected");
        AppError::Unauthorized(BAD_CREDENTIALS)
    })?;

    users
        .find_user_by_email(&claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(subject = %claims.sub, "token subject has no matching user");
            AppError::Unauthorized(BAD_CREDENTIALS)
        })
}
