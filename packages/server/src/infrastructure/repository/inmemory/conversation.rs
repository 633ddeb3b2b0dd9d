//! InMemory Conversation Repository 実装
//!
//! ドメイン層が定義する ConversationRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、一覧表示のために最初の接触順を別途保持します。
//!
//! 履歴は削除されず上限もありません（プロセスが生きている間、無制限に増える）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatEvent, Conversation, ConversationRepository, ParticipantId, RepositoryError};

#[derive(Debug, Default)]
struct ConversationStore {
    /// 最初の接触順
    order: Vec<ParticipantId>,
    conversations: HashMap<ParticipantId, Conversation>,
}

impl ConversationStore {
    fn create(&mut self, participant_id: &ParticipantId) -> &mut Conversation {
        if !self.conversations.contains_key(participant_id) {
            self.order.push(participant_id.clone());
        }
        self.conversations
            .entry(participant_id.clone())
            .or_insert_with(|| Conversation::new(participant_id.clone()))
    }
}

/// インメモリ会話 Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryConversationRepository {
    store: Mutex<ConversationStore>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn count_conversations(&self) -> usize {
        let store = self.store.lock().await;
        store.conversations.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn ensure_initialized(&self, participant_id: &ParticipantId, welcome: ChatEvent) -> bool {
        let mut store = self.store.lock().await;
        if store.conversations.contains_key(participant_id) {
            return false;
        }
        store.create(participant_id).append(welcome);
        tracing::debug!("Conversation for '{}' initialized", participant_id);
        true
    }

    async fn append(
        &self,
        participant_id: &ParticipantId,
        event: ChatEvent,
    ) -> Result<usize, RepositoryError> {
        let mut store = self.store.lock().await;
        let conversation = store
            .conversations
            .get_mut(participant_id)
            .ok_or_else(|| RepositoryError::ConversationNotFound(participant_id.to_string()))?;
        Ok(conversation.append(event))
    }

    async fn append_or_create(&self, participant_id: &ParticipantId, event: ChatEvent) -> usize {
        let mut store = self.store.lock().await;
        store.create(participant_id).append(event)
    }

    async fn get_events(&self, participant_id: &ParticipantId) -> Vec<ChatEvent> {
        let store = self.store.lock().await;
        store
            .conversations
            .get(participant_id)
            .map(|c| c.events().to_vec())
            .unwrap_or_default()
    }

    async fn find(&self, participant_id: &ParticipantId) -> Option<Conversation> {
        let store = self.store.lock().await;
        store.conversations.get(participant_id).cloned()
    }

    async fn get_conversations(&self) -> Vec<Conversation> {
        let store = self.store.lock().await;
        store
            .order
            .iter()
            .filter_map(|id| store.conversations.get(id).cloned())
            .collect()
    }
}
