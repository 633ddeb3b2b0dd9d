//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - compare-and-delete による Presence 削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：現在の接続の切断で Presence が消える
//! - エッジケース：置き換えられた古い接続の切断は新しい接続を消さない
//! - エッジケース：履歴は切断で変化しない

use std::sync::Arc;

use crate::domain::{EndpointId, MessagePusher, ParticipantId};

use super::routing_lock::RoutingLock;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    routing: RoutingLock,
}

impl DisconnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, routing: RoutingLock) -> Self {
        Self {
            message_pusher,
            routing,
        }
    }

    /// Returns whether the presence entry was removed.
    pub async fn execute(&self, participant_id: &ParticipantId, endpoint_id: EndpointId) -> bool {
        let _routing = self.routing.acquire().await;
        let removed = self
            .message_pusher
            .unregister(participant_id, endpoint_id)
            .await;
        if removed {
            tracing::info!(
                "Participant '{}' disconnected (endpoint {})",
                participant_id,
                endpoint_id
            );
        } else {
            tracing::debug!(
                "Stale disconnect for '{}' from endpoint {} ignored",
                participant_id,
                endpoint_id
            );
        }
        removed
    }
}
