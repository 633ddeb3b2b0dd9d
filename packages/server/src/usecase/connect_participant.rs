//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - Presence 登録、初回接続時のウェルカム初期化、履歴スナップショット送信
//!
//! ### なぜこのテストが必要か
//! - 初期化は冪等でなければならない（ウェルカムは 1 件だけ）
//! - 再接続時に過去の履歴が元の順序のまま 1 回のスナップショットで届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回接続のクライアントはウェルカムのみのスナップショットを受け取る
//! - 正常系：再接続したクライアントは全履歴を受け取る
//! - エッジケース：スタッフは履歴初期化もスナップショットも行わない
//! - エッジケース：接続処理の途中に割り込んだスタッフ返信は、スナップショットの後に 1 回だけ届く
//! - 異常系：スナップショットを送れなければ Presence を取り消す

use std::sync::Arc;

use crate::domain::{ConversationRepository, Endpoint, MessagePushError, MessagePusher, ServerEvent};

use super::{
    greeting::WelcomeGreeting, resolve_identity::ResolvedIdentity, routing_lock::RoutingLock,
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    repository: Arc<dyn ConversationRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    greeting: WelcomeGreeting,
    routing: RoutingLock,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        greeting: WelcomeGreeting,
        routing: RoutingLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            greeting,
            routing,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - スナップショットとして送った件数（スタッフは 0）
    /// * `Err(MessagePushError)` - スナップショットを送れなかった（接続は既に閉じている）。
    ///   登録した Presence はこの時点で取り消されている
    pub async fn execute(
        &self,
        identity: &ResolvedIdentity,
        endpoint: Endpoint,
    ) -> Result<usize, MessagePushError> {
        let _routing = self.routing.acquire().await;

        self.message_pusher
            .register(identity.participant_id.clone(), identity.role, endpoint.clone())
            .await;

        if identity.role.is_staff() {
            tracing::info!(
                "Staff '{}' connected on endpoint {}",
                identity.participant_id,
                endpoint.id
            );
            return Ok(0);
        }

        if self
            .repository
            .ensure_initialized(&identity.participant_id, self.greeting.event())
            .await
        {
            tracing::info!(
                "Conversation created for '{}'",
                identity.participant_id
            );
        }

        let events = self.repository.get_events(&identity.participant_id).await;
        let count = events.len();
        if let Err(e) = endpoint.send(ServerEvent::HistorySnapshot(events)) {
            self.message_pusher
                .unregister(&identity.participant_id, endpoint.id)
                .await;
            return Err(e);
        }

        tracing::info!(
            "Client '{}' connected on endpoint {} ({} events in snapshot)",
            identity.participant_id,
            endpoint.id,
            count
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ChatEvent, Conversation, EndpointId, MessageContent, ParticipantId, ParticipantRole,
            RepositoryError, Timestamp, UnknownTargetPolicy,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryConversationRepository,
        },
        usecase::reply_to_participant::ReplyToParticipantUseCase,
    };
    use async_trait::async_trait;
    use madoguchi_shared::time::FixedClock;
    use std::time::Duration;
    use tokio::sync::{Notify, mpsc};

    fn create_test_usecase() -> (
        ConnectParticipantUseCase,
        Arc<InMemoryConversationRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemoryConversationRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let greeting = WelcomeGreeting::new(
            MessageContent::new("Welcome!".to_string()).unwrap(),
            Arc::new(FixedClock::new(0)),
        );
        let usecase = ConnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            greeting,
            RoutingLock::new(),
        );
        (usecase, repository, message_pusher)
    }

    fn client(id: &str) -> ResolvedIdentity {
        ResolvedIdentity {
            participant_id: ParticipantId::new(id.to_string()).unwrap(),
            role: ParticipantRole::Client,
        }
    }

    #[tokio::test]
    async fn test_first_connect_receives_welcome_snapshot() {
        // テスト項目: 初回接続のクライアントはウェルカムのみのスナップショットを受け取る
        // given (前提条件):
        let (usecase, _repository, message_pusher) = create_test_usecase();
        let alice = client("alice@example.com");
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let count = usecase
            .execute(&alice, Endpoint::new(EndpointId::generate(), tx))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(count, 1);
        match rx.recv().await.unwrap() {
            ServerEvent::HistorySnapshot(events) => {
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].participant_id.as_str(), "System");
                assert!(events[0].is_staff);
                assert!(events[0].client_visible_only);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(message_pusher.is_present(&alice.participant_id).await);
    }

    #[tokio::test]
    async fn test_reconnect_does_not_duplicate_welcome() {
        // テスト項目: 再接続してもウェルカムは 1 件のまま、履歴が順序通り届く
        // given (前提条件):
        let (usecase, repository, _message_pusher) = create_test_usecase();
        let alice = client("alice@example.com");
        let (tx1, _rx1) = mpsc::unbounded_channel();
        usecase
            .execute(&alice, Endpoint::new(EndpointId::generate(), tx1))
            .await
            .unwrap();
        for text in ["one", "two"] {
            repository
                .append(
                    &alice.participant_id,
                    ChatEvent::from_client(
                        alice.participant_id.clone(),
                        MessageContent::new(text.to_string()).unwrap(),
                        Timestamp::new("10:00:00".to_string()),
                    ),
                )
                .await
                .unwrap();
        }

        // when (操作):
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        usecase
            .execute(&alice, Endpoint::new(EndpointId::generate(), tx2))
            .await
            .unwrap();

        // then (期待する結果):
        let ServerEvent::HistorySnapshot(events) = rx2.recv().await.unwrap() else {
            panic!("expected a history snapshot");
        };
        let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Welcome!", "one", "two"]);
    }

    #[tokio::test]
    async fn test_staff_connect_has_no_history() {
        // テスト項目: スタッフの接続では履歴を作らず、スナップショットも送らない
        // given (前提条件):
        let (usecase, repository, message_pusher) = create_test_usecase();
        let staff = ResolvedIdentity {
            participant_id: ParticipantId::new("support".to_string()).unwrap(),
            role: ParticipantRole::Staff,
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let count = usecase
            .execute(&staff, Endpoint::new(EndpointId::generate(), tx))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(count, 0);
        assert_eq!(repository.count_conversations().await, 0);
        assert!(rx.try_recv().is_err());
        assert!(message_pusher.is_present(&staff.participant_id).await);
    }

    #[tokio::test]
    async fn test_closed_endpoint_is_unregistered() {
        // テスト項目: スナップショットを送れない接続は Presence に残らない
        // given (前提条件):
        let (usecase, _repository, message_pusher) = create_test_usecase();
        let alice = client("alice@example.com");
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase
            .execute(&alice, Endpoint::new(EndpointId::generate(), tx))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
        assert!(!message_pusher.is_present(&alice.participant_id).await);
    }

    /// Delegates to the in-memory store but parks inside `ensure_initialized`
    /// until released, so another routing step can be attempted mid-connect.
    struct ParkingRepository {
        inner: InMemoryConversationRepository,
        parked: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl ConversationRepository for ParkingRepository {
        async fn ensure_initialized(&self, participant_id: &ParticipantId, welcome: ChatEvent) -> bool {
            self.parked.notify_one();
            self.release.notified().await;
            self.inner.ensure_initialized(participant_id, welcome).await
        }

        async fn append(
            &self,
            participant_id: &ParticipantId,
            event: ChatEvent,
        ) -> Result<usize, RepositoryError> {
            self.inner.append(participant_id, event).await
        }

        async fn append_or_create(&self, participant_id: &ParticipantId, event: ChatEvent) -> usize {
            self.inner.append_or_create(participant_id, event).await
        }

        async fn get_events(&self, participant_id: &ParticipantId) -> Vec<ChatEvent> {
            self.inner.get_events(participant_id).await
        }

        async fn find(&self, participant_id: &ParticipantId) -> Option<Conversation> {
            self.inner.find(participant_id).await
        }

        async fn get_conversations(&self) -> Vec<Conversation> {
            self.inner.get_conversations().await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reply_during_connect_waits_for_snapshot() {
        // テスト項目: 接続処理の途中で送られたスタッフ返信は、ウェルカム入りの
        //             スナップショットの後に 1 回だけ届き、二重配信されない
        // given (前提条件):
        let parked = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let repository = Arc::new(ParkingRepository {
            inner: InMemoryConversationRepository::new(),
            parked: parked.clone(),
            release: release.clone(),
        });
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let clock = Arc::new(FixedClock::new(0));
        let greeting = WelcomeGreeting::new(
            MessageContent::new("Welcome!".to_string()).unwrap(),
            clock.clone(),
        );
        let routing = RoutingLock::new();
        let connect = Arc::new(ConnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            greeting.clone(),
            routing.clone(),
        ));
        let reply = Arc::new(ReplyToParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock,
            UnknownTargetPolicy::Create,
            greeting,
            routing,
        ));
        let alice = client("alice@example.com");
        let staff = ParticipantId::new("support".to_string()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let connect_task = {
            let connect = connect.clone();
            let alice = alice.clone();
            tokio::spawn(async move {
                connect
                    .execute(&alice, Endpoint::new(EndpointId::generate(), tx))
                    .await
            })
        };
        parked.notified().await;

        // when (操作):
        let reply_task = {
            let reply = reply.clone();
            let target = alice.participant_id.clone();
            tokio::spawn(async move {
                reply
                    .execute(&staff, &target, MessageContent::new("hi".to_string()).unwrap())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let reply_finished_early = reply_task.is_finished();
        release.notify_one();
        let count = connect_task.await.unwrap().unwrap();
        let outcome = reply_task.await.unwrap();

        // then (期待する結果):
        assert!(!reply_finished_early);
        assert_eq!(count, 1);
        assert!(outcome.delivered);
        assert_eq!(outcome.stored, Some(2));
        let Some(ServerEvent::HistorySnapshot(snapshot)) = rx.recv().await else {
            panic!("expected the history snapshot first");
        };
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].client_visible_only);
        assert_eq!(
            rx.recv().await,
            Some(ServerEvent::MessageDelivered(outcome.event.clone()))
        );
        assert!(rx.try_recv().is_err());
        let history = repository.get_events(&alice.participant_id).await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].message.as_str(), "Welcome!");
        assert_eq!(history[1], outcome.event);
    }
}
