//! Events crossing the transport boundary, in domain terms.
//!
//! The wire representation lives in `infrastructure::dto::websocket`.

use super::{
    entity::{ChatEvent, ConversationSummary},
    value_object::{MessageContent, ParticipantId},
};

/// サーバーからエンドポイントへ送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Full history, sent once right after a client connects.
    HistorySnapshot(Vec<ChatEvent>),
    /// A chat event addressed to this endpoint (own echo or a staff reply).
    MessageDelivered(ChatEvent),
    /// Fan-out to every staff endpoint so open dashboards stay in sync.
    StaffNotification(ChatEvent),
    ParticipantList(Vec<ConversationSummary>),
    ParticipantHistory {
        participant_id: ParticipantId,
        events: Vec<ChatEvent>,
    },
}

/// エンドポイントから受け取る検証済みコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    ClientMessage {
        content: MessageContent,
    },
    StaffReply {
        target: ParticipantId,
        content: MessageContent,
    },
    RequestParticipantList,
    RequestParticipantHistory {
        participant_id: ParticipantId,
    },
}

impl InboundCommand {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientMessage { .. } => "client-message",
            Self::StaffReply { .. } => "staff-reply",
            Self::RequestParticipantList => "request-participant-list",
            Self::RequestParticipantHistory { .. } => "request-participant-history",
        }
    }
}
