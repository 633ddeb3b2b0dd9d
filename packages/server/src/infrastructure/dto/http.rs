//! REST API request/response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Public account data; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub balance: i64,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
