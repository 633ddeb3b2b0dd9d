//! HTTP error mapping for the REST endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    infrastructure::dto::http::ErrorResponse,
    usecase::{LoginError, ProfileError, SignupError},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization header required.")]
    MissingAuthorization,
    #[error("Invalid or expired token.")]
    InvalidToken(String),
    #[error("Invalid email or password.")]
    InvalidLogin,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal server error.")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization | ApiError::InvalidLogin => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(detail) => tracing::error!("Request failed: {}", detail),
            ApiError::InvalidToken(detail) => tracing::warn!("Rejected token: {}", detail),
            _ => tracing::debug!("Request failed with {}: {}", status, self),
        }

        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::DuplicateIdentity(_) => {
                ApiError::Conflict("User already exists with this email address.".to_string())
            }
            SignupError::InvalidInput(message) => ApiError::BadRequest(message),
            SignupError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidLogin,
            LoginError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::NotFound(_) => ApiError::NotFound("User not found.".to_string()),
            ProfileError::PasswordTooShort(min) => {
                ApiError::BadRequest(format!("Password must be at least {} characters.", min))
            }
            ProfileError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        // テスト項目: ユースケースのエラーが HTTP ステータスに対応付けられる
        // given (前提条件):
        let cases = [
            (
                ApiError::from(SignupError::DuplicateIdentity("a@b.c".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(SignupError::InvalidInput("bad".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(LoginError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(ProfileError::NotFound("a@b.c".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(ProfileError::PasswordTooShort(8)),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MissingAuthorization, StatusCode::UNAUTHORIZED),
            (
                ApiError::InvalidToken("expired".to_string()),
                StatusCode::FORBIDDEN,
            ),
        ];

        // when (操作) / then (期待する結果):
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
