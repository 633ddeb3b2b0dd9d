//! WebSocket frame DTOs.
//!
//! Frames are JSON objects tagged by `type`; payload fields are camelCase.

use serde::{Deserialize, Serialize};

/// Chat event as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEventDto {
    pub participant_id: String,
    pub message: String,
    pub timestamp: String,
    pub is_staff: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub client_visible_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummaryDto {
    pub participant_id: String,
    pub last_message_time: String,
    pub last_message_summary: String,
    pub is_active: bool,
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    HistorySnapshot {
        events: Vec<ChatEventDto>,
    },
    MessageDelivered {
        event: ChatEventDto,
    },
    StaffNotification {
        event: ChatEventDto,
    },
    ParticipantList {
        participants: Vec<ConversationSummaryDto>,
    },
    #[serde(rename_all = "camelCase")]
    ParticipantHistory {
        participant_id: String,
        events: Vec<ChatEventDto>,
    },
}

/// Frames sent by clients and staff dashboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    ClientMessage {
        #[serde(default)]
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    StaffReply {
        #[serde(default)]
        target_participant_id: String,
        #[serde(default)]
        message: String,
    },
    RequestParticipantList,
    #[serde(rename_all = "camelCase")]
    RequestParticipantHistory {
        #[serde(default)]
        participant_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_message() {
        // テスト項目: client-message フレームを解析できる
        // given (前提条件):
        let text = r#"{"type":"client-message","message":"help"}"#;

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientMessage::ClientMessage {
                message: "help".to_string()
            }
        );
    }

    #[test]
    fn test_parse_staff_reply_uses_camel_case() {
        // テスト項目: staff-reply の宛先は camelCase のフィールド名で受け取る
        // given (前提条件):
        let text = r#"{"type":"staff-reply","targetParticipantId":"alice@example.com","message":"hi"}"#;

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientMessage::StaffReply {
                target_participant_id: "alice@example.com".to_string(),
                message: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_missing_message_defaults_to_empty() {
        // テスト項目: message が欠けていても解析でき、空文字になる（後段で破棄される）
        // given (前提条件):
        let text = r#"{"type":"client-message"}"#;

        // when (操作):
        let parsed: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            parsed,
            ClientMessage::ClientMessage {
                message: String::new()
            }
        );
    }

    #[test]
    fn test_serialize_event_omits_client_visible_only_when_false() {
        // テスト項目: clientVisibleOnly が false の場合は出力されない
        // given (前提条件):
        let message = ServerMessage::MessageDelivered {
            event: ChatEventDto {
                participant_id: "alice@example.com".to_string(),
                message: "help".to_string(),
                timestamp: "10:00:00".to_string(),
                is_staff: false,
                client_visible_only: false,
            },
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "type": "message-delivered",
                "event": {
                    "participantId": "alice@example.com",
                    "message": "help",
                    "timestamp": "10:00:00",
                    "isStaff": false
                }
            })
        );
    }

    #[test]
    fn test_serialize_participant_history() {
        // テスト項目: participant-history は participantId と events を持つ
        // given (前提条件):
        let message = ServerMessage::ParticipantHistory {
            participant_id: "alice@example.com".to_string(),
            events: vec![],
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "type": "participant-history",
                "participantId": "alice@example.com",
                "events": []
            })
        );
    }
}
