//! InMemory Account Repository 実装
//!
//! サインアップ済みのアカウントとスタッフアカウントを保持する。
//! ID とメールアドレスの両方で一意性を保証する。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Account, AccountRepository, ParticipantId, RepositoryError};

/// インメモリアカウント Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<ParticipantId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn count_accounts(&self) -> usize {
        let accounts = self.accounts.lock().await;
        accounts.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<(), RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let taken = accounts.contains_key(&account.id)
            || accounts.values().any(|existing| existing.email == account.email);
        if taken {
            return Err(RepositoryError::DuplicateIdentity(account.email));
        }
        accounts.insert(account.id.clone(), account);
        Ok(())
    }

    async fn find_by_id(&self, id: &ParticipantId) -> Option<Account> {
        let accounts = self.accounts.lock().await;
        accounts.get(id).cloned()
    }

    async fn find_by_email(&self, email: &str) -> Option<Account> {
        let accounts = self.accounts.lock().await;
        accounts.values().find(|a| a.email == email).cloned()
    }

    async fn update(&self, account: Account) -> Result<(), RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account;
                Ok(())
            }
            None => Err(RepositoryError::AccountNotFound(account.id.into_string())),
        }
    }
}
