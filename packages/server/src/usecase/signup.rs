//! UseCase: サインアップ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SignupUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：アカウント作成と同時に会話履歴がウェルカムで初期化される
//! - 異常系：既存のメールアドレス（スタッフ ID を含む）は DuplicateIdentity、状態は変化しない
//! - 異常系：不正なメールアドレス・短すぎるパスワード

use std::sync::Arc;

use crate::domain::{
    Account, AccountRepository, ConversationRepository, EmailAddress, ParticipantId,
    PasswordHasher, RepositoryError,
};

use super::{error::SignupError, greeting::WelcomeGreeting, profile::MIN_PASSWORD_CHARS};

/// Balance credited to every new client account.
pub const SIGNUP_BONUS: i64 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignupUseCase {
    accounts: Arc<dyn AccountRepository>,
    conversations: Arc<dyn ConversationRepository>,
    hasher: Arc<dyn PasswordHasher>,
    greeting: WelcomeGreeting,
}

impl SignupUseCase {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        conversations: Arc<dyn ConversationRepository>,
        hasher: Arc<dyn PasswordHasher>,
        greeting: WelcomeGreeting,
    ) -> Self {
        Self {
            accounts,
            conversations,
            hasher,
            greeting,
        }
    }

    pub async fn execute(&self, input: SignupInput) -> Result<Account, SignupError> {
        let email = EmailAddress::new(input.email)
            .map_err(|e| SignupError::InvalidInput(e.to_string()))?;
        if input.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(SignupError::InvalidInput(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }

        let id = ParticipantId::new(email.as_str().to_string())
            .map_err(|e| SignupError::InvalidInput(e.to_string()))?;
        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(|e| SignupError::Internal(e.to_string()))?;

        let account = Account {
            id: id.clone(),
            name: input.name.trim().to_string(),
            email: email.into_string(),
            address: String::new(),
            balance: SIGNUP_BONUS,
            is_staff: false,
            password_hash,
        };

        self.accounts
            .insert(account.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateIdentity(who) => SignupError::DuplicateIdentity(who),
                other => SignupError::Internal(other.to_string()),
            })?;

        self.conversations
            .ensure_initialized(&id, self.greeting.event())
            .await;

        tracing::info!("Account created for '{}'", id);
        Ok(account)
    }
}
