//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 参加者 ID と接続（`Endpoint`）の対応表（Presence Table）を管理
//! - 参加者へのイベント送信（push_to）とスタッフ全員へのファンアウト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui::handler::websocket`）で行われます。
//! この実装は UI 層が作った `Endpoint`（送信チャンネル）を受け取り、送信に使用します。
//! 実際のフレーム書き込みは接続ごとの送信タスクが行います。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Endpoint, EndpointId, MessagePushError, MessagePusher, ParticipantId, ParticipantRole,
    PresenceTable, ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register(participant_id.clone(), ParticipantRole::Client, endpoint).await;
/// pusher.push_to(&participant_id, ServerEvent::MessageDelivered(event)).await?;
/// ```
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher {
    presence: Mutex<PresenceTable>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn is_present(&self, participant_id: &ParticipantId) -> bool {
        let presence = self.presence.lock().await;
        presence.lookup(participant_id).is_some()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, participant_id: ParticipantId, role: ParticipantRole, endpoint: Endpoint) {
        let mut presence = self.presence.lock().await;
        if role.is_staff() {
            presence.add_staff(endpoint.clone());
        }
        let endpoint_id = endpoint.id;
        if let Some(replaced) = presence.register(participant_id.clone(), endpoint) {
            tracing::info!(
                "Participant '{}' reconnected: endpoint {} replaces {}",
                participant_id,
                endpoint_id,
                replaced
            );
        } else {
            tracing::debug!(
                "Participant '{}' registered with endpoint {}",
                participant_id,
                endpoint_id
            );
        }
    }

    async fn unregister(&self, participant_id: &ParticipantId, endpoint_id: EndpointId) -> bool {
        let mut presence = self.presence.lock().await;
        let removed = presence.unregister(participant_id, endpoint_id);
        if removed {
            tracing::debug!("Participant '{}' unregistered", participant_id);
        } else {
            tracing::debug!(
                "Endpoint {} of '{}' was already superseded, presence kept",
                endpoint_id,
                participant_id
            );
        }
        removed
    }

    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: ServerEvent,
    ) -> Result<(), MessagePushError> {
        let presence = self.presence.lock().await;
        let endpoint = presence
            .lookup(participant_id)
            .ok_or_else(|| MessagePushError::ParticipantNotFound(participant_id.to_string()))?;
        endpoint.send(event)?;
        tracing::debug!("Pushed event to '{}'", participant_id);
        Ok(())
    }

    async fn broadcast_to_staff(&self, event: ServerEvent) -> usize {
        let presence = self.presence.lock().await;
        let mut delivered = 0;
        // ブロードキャストでは一部の送信失敗を許容
        for endpoint in presence.staff_endpoints() {
            match endpoint.send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to notify staff endpoint {}: {}", endpoint.id, e),
            }
        }
        delivered
    }

    async fn connected_participant_ids(&self) -> Vec<ParticipantId> {
        let presence = self.presence.lock().await;
        presence.participant_ids()
    }
}
