//! UseCase: スタッフからクライアントへの返信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReplyToParticipantUseCase::execute() メソッド
//! - 宛先の履歴への追加、接続中なら直接配信、全スタッフへの通知
//!
//! ### なぜこのテストが必要か
//! - 宛先が不在でも返信は履歴に残り、次回接続時のスナップショットで届く
//! - 未知の宛先の扱いは UnknownTargetPolicy に従い、送信者にはエラーを返さない
//!
//! ### どのような状況を想定しているか
//! - 正常系：宛先が接続中
//! - 正常系：宛先が不在（配信なし、履歴のみ）
//! - エッジケース：未知の宛先（Create ならウェルカム付きで作成、Drop なら破棄）

use std::sync::Arc;

use madoguchi_shared::time::Clock;

use crate::domain::{
    ChatEvent, ConversationRepository, MessageContent, MessagePushError, MessagePusher,
    ParticipantId, RepositoryError, ServerEvent, Timestamp, UnknownTargetPolicy,
};

use super::{greeting::WelcomeGreeting, routing_lock::RoutingLock};

/// What happened to one staff reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub event: ChatEvent,
    /// New length of the target's history, or `None` if the reply was dropped.
    pub stored: Option<usize>,
    /// Whether the target's live endpoint received it.
    pub delivered: bool,
}

/// スタッフ返信のユースケース
pub struct ReplyToParticipantUseCase {
    repository: Arc<dyn ConversationRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    policy: UnknownTargetPolicy,
    greeting: WelcomeGreeting,
    routing: RoutingLock,
}

impl ReplyToParticipantUseCase {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        policy: UnknownTargetPolicy,
        greeting: WelcomeGreeting,
        routing: RoutingLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            policy,
            greeting,
            routing,
        }
    }

    /// Store the reply and deliver it while holding the routing lock.
    ///
    /// Under `Create`, a target without a conversation gets one opened with the
    /// welcome event, exactly as if it had connected first.
    pub async fn execute(
        &self,
        staff_id: &ParticipantId,
        target: &ParticipantId,
        content: MessageContent,
    ) -> ReplyOutcome {
        let _routing = self.routing.acquire().await;

        let event = ChatEvent::from_staff(
            staff_id.clone(),
            content,
            Timestamp::from_millis(self.clock.now_millis()),
        );

        if self.policy == UnknownTargetPolicy::Create
            && self
                .repository
                .ensure_initialized(target, self.greeting.event())
                .await
        {
            tracing::info!("Conversation for '{}' opened by a staff reply", target);
        }

        let stored = match self.repository.append(target, event.clone()).await {
            Ok(len) => Some(len),
            Err(RepositoryError::ConversationNotFound(_)) => None,
            Err(e) => {
                tracing::error!("Failed to store reply to '{}': {}", target, e);
                None
            }
        };

        let delivered = match self
            .message_pusher
            .push_to(target, ServerEvent::MessageDelivered(event.clone()))
            .await
        {
            Ok(()) => true,
            Err(MessagePushError::ParticipantNotFound(_)) => {
                tracing::info!("'{}' is offline; reply kept in history only", target);
                false
            }
            Err(e) => {
                tracing::warn!("Delivery to '{}' failed: {}", target, e);
                false
            }
        };

        self.message_pusher
            .broadcast_to_staff(ServerEvent::StaffNotification(event.clone()))
            .await;

        ReplyOutcome {
            event,
            stored,
            delivered,
        }
    }
}
