//! Presence table: which live endpoint currently speaks for a participant.
//!
//! This module is pure data manipulation without I/O, so it can be tested
//! without any transport. `WebSocketMessagePusher` wraps it in a mutex.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    event::ServerEvent,
    value_object::{EndpointId, ParticipantId},
};

/// Outbound channel of one connection; the transport task drains it.
pub type PusherChannel = mpsc::UnboundedSender<ServerEvent>;

/// A live transport connection.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub id: EndpointId,
    channel: PusherChannel,
}

impl Endpoint {
    pub fn new(id: EndpointId, channel: PusherChannel) -> Self {
        Self { id, channel }
    }

    pub fn send(&self, event: ServerEvent) -> Result<(), MessagePushError> {
        self.channel
            .send(event)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

/// 参加者 ID → エンドポイントの対応表
///
/// - 1 つの ID につきエンドポイントは高々 1 つ（後から来た接続が上書きする）
/// - 切断時は、登録されているのがその接続自身の場合のみ削除する
/// - スタッフのエンドポイントは別途ロスターに全て保持し、同じ ID の
///   スタッフ画面が複数あっても全てにファンアウトできるようにする
#[derive(Debug, Default)]
pub struct PresenceTable {
    entries: HashMap<ParticipantId, Endpoint>,
    staff_roster: HashMap<EndpointId, Endpoint>,
}

impl PresenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `participant_id` to `endpoint`, replacing any previous binding.
    ///
    /// Returns the id of the endpoint that was replaced, if any.
    pub fn register(
        &mut self,
        participant_id: ParticipantId,
        endpoint: Endpoint,
    ) -> Option<EndpointId> {
        self.entries
            .insert(participant_id, endpoint)
            .map(|previous| previous.id)
    }

    /// Add a staff endpoint to the fan-out roster.
    pub fn add_staff(&mut self, endpoint: Endpoint) {
        self.staff_roster.insert(endpoint.id, endpoint);
    }

    /// Compare-and-delete: the binding is removed only if it still points at `endpoint_id`.
    ///
    /// The endpoint always leaves the staff roster. Returns whether the presence entry was removed.
    pub fn unregister(&mut self, participant_id: &ParticipantId, endpoint_id: EndpointId) -> bool {
        self.staff_roster.remove(&endpoint_id);

        match self.entries.get(participant_id) {
            Some(current) if current.id == endpoint_id => {
                self.entries.remove(participant_id);
                true
            }
            _ => false,
        }
    }

    pub fn lookup(&self, participant_id: &ParticipantId) -> Option<&Endpoint> {
        self.entries.get(participant_id)
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.entries.keys().cloned().collect()
    }

    pub fn staff_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.staff_roster.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
