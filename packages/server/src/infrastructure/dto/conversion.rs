//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    Account, ChatEvent, ConversationSummary, InboundCommand, MessageContent, ParticipantId,
    ServerEvent, ValueObjectError,
};
use crate::infrastructure::dto::{http as http_dto, websocket as ws_dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ws_dto::ClientMessage> for InboundCommand {
    type Error = ValueObjectError;

    fn try_from(dto: ws_dto::ClientMessage) -> Result<Self, Self::Error> {
        Ok(match dto {
            ws_dto::ClientMessage::ClientMessage { message } => Self::ClientMessage {
                content: MessageContent::new(message)?,
            },
            ws_dto::ClientMessage::StaffReply {
                target_participant_id,
                message,
            } => Self::StaffReply {
                target: ParticipantId::new(target_participant_id)?,
                content: MessageContent::new(message)?,
            },
            ws_dto::ClientMessage::RequestParticipantList => Self::RequestParticipantList,
            ws_dto::ClientMessage::RequestParticipantHistory { participant_id } => {
                Self::RequestParticipantHistory {
                    participant_id: ParticipantId::new(participant_id)?,
                }
            }
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<ChatEvent> for ws_dto::ChatEventDto {
    fn from(model: ChatEvent) -> Self {
        Self {
            participant_id: model.participant_id.into_string(),
            message: model.message.into_string(),
            timestamp: model.timestamp.into_string(),
            is_staff: model.is_staff,
            client_visible_only: model.client_visible_only,
        }
    }
}

impl From<ConversationSummary> for ws_dto::ConversationSummaryDto {
    fn from(model: ConversationSummary) -> Self {
        Self {
            participant_id: model.participant_id.into_string(),
            last_message_time: model.last_timestamp,
            last_message_summary: model.last_message_preview,
            is_active: model.is_active,
        }
    }
}

fn events_to_dto(events: Vec<ChatEvent>) -> Vec<ws_dto::ChatEventDto> {
    events.into_iter().map(Into::into).collect()
}

impl From<ServerEvent> for ws_dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::HistorySnapshot(events) => Self::HistorySnapshot {
                events: events_to_dto(events),
            },
            ServerEvent::MessageDelivered(event) => Self::MessageDelivered {
                event: event.into(),
            },
            ServerEvent::StaffNotification(event) => Self::StaffNotification {
                event: event.into(),
            },
            ServerEvent::ParticipantList(summaries) => Self::ParticipantList {
                participants: summaries.into_iter().map(Into::into).collect(),
            },
            ServerEvent::ParticipantHistory {
                participant_id,
                events,
            } => Self::ParticipantHistory {
                participant_id: participant_id.into_string(),
                events: events_to_dto(events),
            },
        }
    }
}

impl From<Account> for http_dto::UserDto {
    fn from(model: Account) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name,
            email: model.email,
            address: model.address,
            balance: model.balance,
            is_staff: model.is_staff,
        }
    }
}
