//! UseCase 層のエラー型

use thiserror::Error;

/// 接続時の識別子解決エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

/// ルーティング時に捨てられたイベントの理由（送信者には返さずログに残す）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),
    #[error("unknown target '{0}': reply was not stored")]
    UnknownTarget(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("an account already exists for '{0}'")]
    DuplicateIdentity(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("account '{0}' not found")]
    NotFound(String),
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("internal error: {0}")]
    Internal(String),
}
