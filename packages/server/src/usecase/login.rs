//! UseCase: ログイン（資格情報の発行）

use std::sync::Arc;

use crate::domain::{Account, AccountRepository, CredentialService, PasswordHasher};

use super::error::LoginError;

pub struct LoginUseCase {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    credentials: Arc<dyn CredentialService>,
}

impl LoginUseCase {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        credentials: Arc<dyn CredentialService>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            credentials,
        }
    }

    /// Returns the bearer token and the account it was issued for.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<(String, Account), LoginError> {
        let account = self
            .accounts
            .find_by_email(email.trim())
            .await
            .ok_or(LoginError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::warn!("Failed login for '{}'", account.id);
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .credentials
            .issue(&account)
            .map_err(|e| LoginError::Internal(e.to_string()))?;
        tracing::info!("'{}' logged in", account.id);
        Ok((token, account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ParticipantId,
        infrastructure::{
            credential::{Argon2PasswordHasher, JwtCredentialService},
            repository::InMemoryAccountRepository,
        },
    };

    async fn create_test_usecase() -> (LoginUseCase, Arc<JwtCredentialService>) {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        let credentials = Arc::new(JwtCredentialService::new("test-secret"));
        accounts
            .insert(Account {
                id: ParticipantId::new("alice@example.com".to_string()).unwrap(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                address: String::new(),
                balance: 200,
                is_staff: false,
                password_hash: hasher.hash("password123").unwrap(),
            })
            .await
            .unwrap();
        (
            LoginUseCase::new(accounts, hasher, credentials.clone()),
            credentials,
        )
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        // テスト項目: 正しい資格情報で検証可能なトークンが発行される
        // given (前提条件):
        let (usecase, credentials) = create_test_usecase().await;

        // when (操作):
        let (token, account) = usecase
            .execute("alice@example.com", "password123")
            .await
            .unwrap();

        // then (期待する結果):
        let identity = credentials.verify(&token).unwrap();
        assert_eq!(identity.participant_id, account.id);
        assert!(!identity.is_staff);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        // テスト項目: パスワード違い・未登録メールはどちらも InvalidCredentials
        // given (前提条件):
        let (usecase, _credentials) = create_test_usecase().await;

        // when (操作):
        let wrong_password = usecase.execute("alice@example.com", "wrong-password").await;
        let unknown = usecase.execute("nobody@example.com", "password123").await;

        // then (期待する結果):
        assert_eq!(wrong_password, Err(LoginError::InvalidCredentials));
        assert_eq!(unknown, Err(LoginError::InvalidCredentials));
    }
}
