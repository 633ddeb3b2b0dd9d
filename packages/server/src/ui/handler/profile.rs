//! Own-profile endpoints, authorized by a bearer token.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};

use crate::{
    domain::{ParticipantId, ProfileUpdate},
    infrastructure::dto::http::{ProfileUpdateRequest, ProfileUpdateResponse, UserDto},
    ui::{error::ApiError, state::AppState},
};

/// Resolve the caller from the `Authorization: Bearer <token>` header.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<ParticipantId, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingAuthorization)?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    state
        .credentials
        .verify(token)
        .map(|identity| identity.participant_id)
        .map_err(|e| ApiError::InvalidToken(e.to_string()))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserDto>, ApiError> {
    let id = authenticate(&state, &headers)?;
    let account = state.get_profile.execute(&id).await?;
    Ok(Json(account.into()))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileUpdateResponse>, ApiError> {
    let id = authenticate(&state, &headers)?;
    let account = state
        .update_profile
        .execute(
            &id,
            ProfileUpdate {
                name: request.name,
                address: request.address,
                new_password: request.new_password,
            },
        )
        .await?;

    Ok(Json(ProfileUpdateResponse {
        success: true,
        message: "Profile updated.".to_string(),
        user: account.into(),
    }))
}
