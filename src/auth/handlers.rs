use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginForm, PublicUser, RegisterRequest, TokenResponse},
        extractors::CurrentUser,
        services,
    },
    error::AppError,
    extract::{ValidForm, ValidJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(login))
        .route("/users/", post(register))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/users/me/", get(get_me))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::login(
        state.users.as_ref(),
        &state.keys,
        &form.username,
        form.password,
    )
    .await?;
    Ok(Json(TokenResponse::bearer(token)))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<Json<PublicUser>, AppError> {
    let user = services::register(state.users.as_ref(), &payload.email, payload.password).await?;
    Ok(Json(user.into()))
}

pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}
