//! UseCase: スタッフ向けの会話一覧
//!
//! 履歴ストアの全会話に、Presence Table から求めた接続状態を付けて返す。

use std::{collections::HashSet, sync::Arc};

use crate::domain::{ConversationRepository, ConversationSummary, MessagePusher};

use super::routing_lock::RoutingLock;

pub struct ListConversationsUseCase {
    repository: Arc<dyn ConversationRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    routing: RoutingLock,
}

impl ListConversationsUseCase {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        routing: RoutingLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            routing,
        }
    }

    /// Summaries in order of first contact.
    pub async fn execute(&self) -> Vec<ConversationSummary> {
        let _routing = self.routing.acquire().await;
        let present: HashSet<_> = self
            .message_pusher
            .connected_participant_ids()
            .await
            .into_iter()
            .collect();

        self.repository
            .get_conversations()
            .await
            .iter()
            .map(|conversation| {
                ConversationSummary::from_conversation(
                    conversation,
                    present.contains(&conversation.participant_id),
                )
            })
            .collect()
    }
}
