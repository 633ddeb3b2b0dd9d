//! Domain error types.

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("participant id must not be empty")]
    ParticipantIdEmpty,
    #[error("message must not be empty")]
    MessageEmpty,
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("no conversation exists for participant '{0}'")]
    ConversationNotFound(String),
    #[error("account '{0}' not found")]
    AccountNotFound(String),
    #[error("an account already exists for '{0}'")]
    DuplicateIdentity(String),
}

/// メッセージ送信（プッシュ）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("participant '{0}' has no live endpoint")]
    ParticipantNotFound(String),
    #[error("push failed: {0}")]
    PushFailed(String),
}

/// Credential (bearer token) errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("failed to issue credential: {0}")]
    IssueFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);
