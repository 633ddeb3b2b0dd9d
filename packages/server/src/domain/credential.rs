//! Seams to the credential service and password hashing.

use super::{
    entity::Account,
    error::{CredentialError, PasswordHashError},
    value_object::ParticipantId,
};

/// Identity carried by a verified bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub participant_id: ParticipantId,
    pub is_staff: bool,
}

/// Bearer-credential issuing and verification.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialService: Send + Sync {
    /// Fails with `InvalidCredential` for malformed, forged or expired tokens.
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, CredentialError>;

    fn issue(&self, account: &Account) -> Result<String, CredentialError>;
}

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, password: &str, password_hash: &str) -> bool;
}
