//! UseCase: クライアントからスタッフへのメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加、送信元へのエコー、全スタッフへの通知
//!
//! ### なぜこのテストが必要か
//! - 送信者は自分のメッセージを 1 回だけ受け取る
//! - 接続中の全スタッフ画面が 1 回ずつ通知を受け取る（宛先指定ではなくファンアウト）
//!
//! ### どのような状況を想定しているか
//! - 正常系：スタッフ 2 画面が接続中
//! - エッジケース：スタッフ不在（履歴とエコーのみ）

use std::sync::Arc;

use madoguchi_shared::time::Clock;

use crate::domain::{
    ChatEvent, ConversationRepository, Endpoint, MessageContent, MessagePusher, ParticipantId,
    ServerEvent, Timestamp,
};

use super::routing_lock::RoutingLock;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ConversationRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    routing: RoutingLock,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        routing: RoutingLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            routing,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `from` - 送信したクライアントの ID
    /// * `origin` - 送信元の接続（エコーの宛先）
    /// * `content` - 検証済みのメッセージ内容
    ///
    /// # Returns
    ///
    /// 保存したイベント
    pub async fn execute(
        &self,
        from: &ParticipantId,
        origin: &Endpoint,
        content: MessageContent,
    ) -> ChatEvent {
        let _routing = self.routing.acquire().await;

        let event = ChatEvent::from_client(
            from.clone(),
            content,
            Timestamp::from_millis(self.clock.now_millis()),
        );

        let len = self.repository.append_or_create(from, event.clone()).await;
        tracing::debug!("'{}' history now has {} events", from, len);

        if let Err(e) = origin.send(ServerEvent::MessageDelivered(event.clone())) {
            tracing::warn!("Echo to '{}' failed: {}", from, e);
        }

        let notified = self
            .message_pusher
            .broadcast_to_staff(ServerEvent::StaffNotification(event.clone()))
            .await;
        tracing::debug!("Message from '{}' notified to {} staff endpoints", from, notified);

        event
    }
}
