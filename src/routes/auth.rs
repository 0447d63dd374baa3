use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{SessionResponse, SessionUser, SigninPayload, SignupPayload},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth_service
        .signup(&payload.email, &payload.password, &payload.company_name)
        .await?;
    let token = state.auth_service.issue_token(&user)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user: SessionUser {
                id: user.id,
                email: user.email,
                company_name: user.company_name,
            },
        }),
    ))
}

#[axum::debug_handler]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .auth_service
        .signin(&payload.email, &payload.password)
        .await?;
    let token = state.auth_service.issue_token(&user)?;
    Ok(Json(SessionResponse {
        token,
        user: SessionUser {
            id: user.id,
            email: user.email,
            company_name: user.company_name,
        },
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.get_user(claims.user_id()?).await?;
    Ok(Json(SessionUser {
        id: user.id,
        email: user.email,
        company_name: user.company_name,
    }))
}
