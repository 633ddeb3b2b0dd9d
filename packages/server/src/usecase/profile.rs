//! UseCase: 自分のプロフィールの参照・更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetProfileUseCase / UpdateProfileUseCase
//!
//! ### どのような状況を想定しているか
//! - 正常系：名前・住所・パスワードの更新
//! - 異常系：短すぎるパスワードは何も変更せずに失敗する
//! - 異常系：存在しないアカウント

use std::sync::Arc;

use crate::domain::{Account, AccountRepository, ParticipantId, PasswordHasher, ProfileUpdate};

use super::error::ProfileError;

pub const MIN_PASSWORD_CHARS: usize = 8;

pub struct GetProfileUseCase {
    accounts: Arc<dyn AccountRepository>,
}

impl GetProfileUseCase {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, id: &ParticipantId) -> Result<Account, ProfileError> {
        self.accounts
            .find_by_id(id)
            .await
            .ok_or_else(|| ProfileError::NotFound(id.as_str().to_string()))
    }
}

pub struct UpdateProfileUseCase {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UpdateProfileUseCase {
    pub fn new(accounts: Arc<dyn AccountRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    /// Blank fields in `update` are ignored. All checks run before anything is written.
    pub async fn execute(
        &self,
        id: &ParticipantId,
        update: ProfileUpdate,
    ) -> Result<Account, ProfileError> {
        let mut account = self
            .accounts
            .find_by_id(id)
            .await
            .ok_or_else(|| ProfileError::NotFound(id.as_str().to_string()))?;

        let new_password = update.new_password.filter(|p| !p.is_empty());
        if let Some(password) = &new_password {
            if password.chars().count() < MIN_PASSWORD_CHARS {
                return Err(ProfileError::PasswordTooShort(MIN_PASSWORD_CHARS));
            }
        }

        if let Some(name) = update.name.filter(|n| !n.trim().is_empty()) {
            account.name = name;
        }
        if let Some(address) = update.address.filter(|a| !a.trim().is_empty()) {
            account.address = address;
        }
        if let Some(password) = new_password {
            account.password_hash = self
                .hasher
                .hash(&password)
                .map_err(|e| ProfileError::Internal(e.to_string()))?;
        }

        self.accounts
            .update(account.clone())
            .await
            .map_err(|e| ProfileError::Internal(e.to_string()))?;
        tracing::info!("Profile of '{}' updated", id);
        Ok(account)
    }
}
