//! MessagePusher trait 定義
//!
//! ドメイン層が必要とする「参加者へイベントを届ける」インターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供する。

use async_trait::async_trait;

use super::{
    error::MessagePushError,
    event::ServerEvent,
    presence::Endpoint,
    value_object::{EndpointId, ParticipantId, ParticipantRole},
};

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Bind a participant to a live endpoint (last connection wins).
    ///
    /// Staff endpoints also join the staff fan-out roster.
    async fn register(&self, participant_id: ParticipantId, role: ParticipantRole, endpoint: Endpoint);

    /// Compare-and-delete removal. Returns whether the presence entry was removed.
    async fn unregister(&self, participant_id: &ParticipantId, endpoint_id: EndpointId) -> bool;

    /// Deliver to the participant's current endpoint.
    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        event: ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// Deliver to every connected staff endpoint. Returns how many received it.
    async fn broadcast_to_staff(&self, event: ServerEvent) -> usize;

    async fn connected_participant_ids(&self) -> Vec<ParticipantId>;
}
