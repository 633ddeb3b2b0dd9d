//! Value Objects
//!
//! 不変で、値によって等価性が判断されるドメインの基本型。
//! 生成時にバリデーションを行い、不正な値を持つインスタンスは存在しない。

use std::fmt;

use madoguchi_shared::time::timestamp_to_clock_time;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Participant identifier used by synthetic system events (e.g. the welcome greeting).
pub const SYSTEM_PARTICIPANT_ID: &str = "System";

/// Prefix for identifiers assigned to connections that carry no credential.
const ANONYMOUS_PREFIX: &str = "guest-";

/// 参加者 ID
///
/// スタッフは設定で決まる固定 ID、クライアントはサインアップ時のメールアドレス、
/// 認証なしの接続は接続ごとの匿名 ID を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::ParticipantIdEmpty);
        }
        Ok(Self(value))
    }

    /// Identifier for an unauthenticated connection, scoped to that single endpoint.
    pub fn anonymous(endpoint_id: EndpointId) -> Self {
        Self(format!("{}{}", ANONYMOUS_PREFIX, endpoint_id.as_uuid()))
    }

    pub fn system() -> Self {
        Self(SYSTEM_PARTICIPANT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文（空白のみは不可）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::MessageEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 表示用の時刻文字列（`HH:MM:SS`）
///
/// 順序付けには使わない。イベントの順序は履歴への追加順のみで決まる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn from_millis(timestamp_millis: i64) -> Self {
        Self(timestamp_to_clock_time(timestamp_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Identity of one live transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(Uuid);

impl EndpointId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 接続時に一度だけ決まる参加者の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Client,
    Staff,
}

impl ParticipantRole {
    pub fn from_staff_flag(is_staff: bool) -> Self {
        if is_staff { Self::Staff } else { Self::Client }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

/// サインアップ・ログインに使うメールアドレス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            return Err(ValueObjectError::InvalidEmail(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
