//! UseCase: 1 人分の会話履歴の取得

use std::sync::Arc;

use crate::domain::{ChatEvent, ConversationRepository, ParticipantId};

pub struct GetConversationHistoryUseCase {
    repository: Arc<dyn ConversationRepository>,
}

impl GetConversationHistoryUseCase {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    /// `None` if the participant has no conversation.
    pub async fn execute(&self, participant_id: &ParticipantId) -> Option<Vec<ChatEvent>> {
        self.repository
            .find(participant_id)
            .await
            .map(|conversation| conversation.events().to_vec())
    }
}
