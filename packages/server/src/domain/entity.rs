//! Entities
//!
//! 参加者ごとの会話履歴（`Conversation`）と、その要素である `ChatEvent`、
//! REST 層で扱うアカウント（`Account`）を定義する。

use super::value_object::{MessageContent, ParticipantId, Timestamp};

/// Maximum number of characters kept in a conversation preview.
pub const PREVIEW_MAX_CHARS: usize = 30;

const PREVIEW_ELLIPSIS: &str = "...";
const EMPTY_CONVERSATION_PREVIEW: &str = "No messages yet.";

/// 1 件のチャットイベント（作成後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub participant_id: ParticipantId,
    pub message: MessageContent,
    pub timestamp: Timestamp,
    pub is_staff: bool,
    /// Shown to the client only; staff views must not treat it as a real reply.
    pub client_visible_only: bool,
}

impl ChatEvent {
    pub fn from_client(
        participant_id: ParticipantId,
        message: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            participant_id,
            message,
            timestamp,
            is_staff: false,
            client_visible_only: false,
        }
    }

    pub fn from_staff(
        staff_id: ParticipantId,
        message: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            participant_id: staff_id,
            message,
            timestamp,
            is_staff: true,
            client_visible_only: false,
        }
    }

    /// Synthetic greeting that opens every client conversation.
    pub fn welcome(message: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            participant_id: ParticipantId::system(),
            message,
            timestamp,
            is_staff: true,
            client_visible_only: true,
        }
    }
}

/// 参加者 1 人分の会話履歴
///
/// 追加のみ可能（append-only）。既存イベントの削除・並べ替えは行えない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub participant_id: ParticipantId,
    events: Vec<ChatEvent>,
}

impl Conversation {
    pub fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            events: Vec::new(),
        }
    }

    /// Append an event and return the new length.
    pub fn append(&mut self, event: ChatEvent) -> usize {
        self.events.push(event);
        self.events.len()
    }

    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    pub fn last_event(&self) -> Option<&ChatEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// スタッフ用の会話一覧の 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub participant_id: ParticipantId,
    pub last_timestamp: String,
    pub last_message_preview: String,
    pub is_active: bool,
}

impl ConversationSummary {
    pub fn from_conversation(conversation: &Conversation, is_active: bool) -> Self {
        let (last_timestamp, last_message_preview) = match conversation.last_event() {
            Some(event) => (
                event.timestamp.as_str().to_string(),
                preview(event.message.as_str()),
            ),
            None => (String::new(), EMPTY_CONVERSATION_PREVIEW.to_string()),
        };

        Self {
            participant_id: conversation.participant_id.clone(),
            last_timestamp,
            last_message_preview,
            is_active,
        }
    }
}

/// Cut a message to [`PREVIEW_MAX_CHARS`] characters, appending `...` if anything was cut.
///
/// The cut counts characters, not words.
pub fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}{}", head, PREVIEW_ELLIPSIS)
    } else {
        head
    }
}

/// アカウント（REST 層のサインアップ・ログイン・プロフィール用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub balance: i64,
    pub is_staff: bool,
    pub password_hash: String,
}

/// Changes a participant may make to their own profile; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub new_password: Option<String>,
}
