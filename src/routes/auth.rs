use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload, UserResponse},
    error::Result,
    middleware::auth::SessionToken,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created and session opened", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload or unknown role"),
        (status = 409, description = "Username or email already taken")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, role) = state.auth_service.register(payload).await?;
    let session = state.auth_service.open_session(user.id).await?;
    let body = AuthResponse {
        token: session.token,
        user: UserResponse::from_parts(user, Some(role)),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session opened", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth_service
        .authenticate(&payload.username, &payload.password)
        .await?;
    let role = state.auth_service.find_role(user.id).await?;
    let session = state.auth_service.open_session(user.id).await?;
    let body = AuthResponse {
        token: session.token,
        user: UserResponse::from_parts(user, role),
    };
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Not authenticated")
    )
)]
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<impl IntoResponse> {
    state.auth_service.revoke_session(&token.0).await?;
    Ok(StatusCode::NO_CONTENT)
}
