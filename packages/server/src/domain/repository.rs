//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Account, ChatEvent, Conversation},
    error::RepositoryError,
    value_object::ParticipantId,
};

/// 会話履歴（History Store）の Repository
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Create the conversation with `welcome` as its first event unless it already exists.
    ///
    /// Returns `true` if a conversation was created. Calling it again is a no-op.
    async fn ensure_initialized(&self, participant_id: &ParticipantId, welcome: ChatEvent) -> bool;

    /// Append to an existing conversation and return its new length.
    ///
    /// Fails with `ConversationNotFound` if the participant was never initialized.
    async fn append(
        &self,
        participant_id: &ParticipantId,
        event: ChatEvent,
    ) -> Result<usize, RepositoryError>;

    /// Append, creating an empty conversation first if needed. Returns the new length.
    async fn append_or_create(&self, participant_id: &ParticipantId, event: ChatEvent) -> usize;

    /// Full event log; empty if the participant has no conversation.
    async fn get_events(&self, participant_id: &ParticipantId) -> Vec<ChatEvent>;

    /// The conversation, or `None` if the participant was never initialized.
    async fn find(&self, participant_id: &ParticipantId) -> Option<Conversation>;

    /// All conversations, in order of first contact.
    async fn get_conversations(&self) -> Vec<Conversation>;
}

/// アカウント（Profile Store）の Repository
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `DuplicateIdentity` if the id or email is already taken.
    async fn insert(&self, account: Account) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ParticipantId) -> Option<Account>;

    async fn find_by_email(&self, email: &str) -> Option<Account>;

    /// Replace a stored account. Fails with `AccountNotFound` if it does not exist.
    async fn update(&self, account: Account) -> Result<(), RepositoryError>;
}
