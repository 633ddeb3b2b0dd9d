//! Signup and login endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    ui::{error::ApiError, state::AppState},
    usecase::SignupInput,
};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let account = state
        .signup
        .execute(SignupInput {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "Sign up successful.".to_string(),
            user: account.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, account) = state
        .login
        .execute(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful.".to_string(),
        token,
        user: account.into(),
    }))
}
