//! UseCase: 接続時の参加者識別子の解決
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ResolveIdentityUseCase::execute() メソッド
//! - 資格情報あり / スタッフ要求 / 匿名 の 3 経路
//!
//! ### どのような状況を想定しているか
//! - 正常系：検証済みトークンの識別子とスタッフフラグを使う
//! - 正常系：トークンなしでスタッフ要求 → 固定のスタッフ ID
//! - 正常系：トークンなし → 接続ごとのゲスト ID
//! - 異常系：不正・期限切れトークンは匿名にフォールバックせず拒否

use std::sync::Arc;

use crate::domain::{CredentialService, EndpointId, ParticipantId, ParticipantRole};

use super::error::IdentityError;

/// Transport handshake, already extracted from the upgrade request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handshake {
    pub token: Option<String>,
    pub requests_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub participant_id: ParticipantId,
    pub role: ParticipantRole,
}

pub struct ResolveIdentityUseCase {
    credentials: Arc<dyn CredentialService>,
    staff_id: ParticipantId,
    /// Whether `requests_staff` without a token is honoured.
    allow_anonymous_staff: bool,
}

impl ResolveIdentityUseCase {
    pub fn new(
        credentials: Arc<dyn CredentialService>,
        staff_id: ParticipantId,
        allow_anonymous_staff: bool,
    ) -> Self {
        Self {
            credentials,
            staff_id,
            allow_anonymous_staff,
        }
    }

    /// An empty token counts as missing.
    pub fn execute(
        &self,
        handshake: &Handshake,
        endpoint_id: EndpointId,
    ) -> Result<ResolvedIdentity, IdentityError> {
        let token = handshake
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty());

        if let Some(token) = token {
            let identity = self
                .credentials
                .verify(token)
                .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?;
            return Ok(ResolvedIdentity {
                participant_id: identity.participant_id,
                role: ParticipantRole::from_staff_flag(identity.is_staff),
            });
        }

        if handshake.requests_staff {
            if self.allow_anonymous_staff {
                return Ok(ResolvedIdentity {
                    participant_id: self.staff_id.clone(),
                    role: ParticipantRole::Staff,
                });
            }
            tracing::warn!(
                "Anonymous staff entry is disabled; endpoint {} joins as a guest",
                endpoint_id
            );
        }

        Ok(ResolvedIdentity {
            participant_id: ParticipantId::anonymous(endpoint_id),
            role: ParticipantRole::Client,
        })
    }
}
