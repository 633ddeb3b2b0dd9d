//! Role-specific chat sessions.
//!
//! The role is decided once at connect time; each session only accepts the
//! commands that make sense for it and drops the rest as malformed.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - open_session() と ClientSession / StaffSession の on_message
//!
//! ### どのような状況を想定しているか
//! - 正常系：クライアントの送信、スタッフの返信・一覧・履歴要求
//! - 異常系：役割に合わないコマンドは MalformedEvent
//! - エッジケース：未知の参加者の履歴要求には何も送らない

use std::sync::Arc;

use async_trait::async_trait;

use madoguchi_shared::time::Clock;

use crate::domain::{
    ConversationRepository, Endpoint, EndpointId, InboundCommand, MessagePushError, MessagePusher,
    ParticipantId, ParticipantRole, ServerEvent, UnknownTargetPolicy,
};

use super::{
    connect_participant::ConnectParticipantUseCase, disconnect_participant::DisconnectParticipantUseCase,
    error::RouteError, get_conversation_history::GetConversationHistoryUseCase,
    greeting::WelcomeGreeting, list_conversations::ListConversationsUseCase,
    reply_to_participant::ReplyToParticipantUseCase, resolve_identity::ResolvedIdentity,
    routing_lock::RoutingLock, send_message::SendMessageUseCase,
};

/// Use cases shared by every chat connection.
pub struct ChatUseCases {
    pub connect: ConnectParticipantUseCase,
    pub disconnect: DisconnectParticipantUseCase,
    pub send_message: SendMessageUseCase,
    pub reply: ReplyToParticipantUseCase,
    pub list_conversations: ListConversationsUseCase,
    pub get_history: GetConversationHistoryUseCase,
}

impl ChatUseCases {
    /// Wire every chat use case over the same stores and one routing lock.
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        greeting: WelcomeGreeting,
        policy: UnknownTargetPolicy,
    ) -> Self {
        let routing = RoutingLock::new();
        Self {
            connect: ConnectParticipantUseCase::new(
                conversations.clone(),
                message_pusher.clone(),
                greeting.clone(),
                routing.clone(),
            ),
            disconnect: DisconnectParticipantUseCase::new(message_pusher.clone(), routing.clone()),
            send_message: SendMessageUseCase::new(
                conversations.clone(),
                message_pusher.clone(),
                clock.clone(),
                routing.clone(),
            ),
            reply: ReplyToParticipantUseCase::new(
                conversations.clone(),
                message_pusher.clone(),
                clock,
                policy,
                greeting,
                routing.clone(),
            ),
            list_conversations: ListConversationsUseCase::new(
                conversations.clone(),
                message_pusher,
                routing,
            ),
            get_history: GetConversationHistoryUseCase::new(conversations),
        }
    }
}

#[async_trait]
pub trait ChatSession: Send + Sync {
    fn participant_id(&self) -> &ParticipantId;

    fn endpoint_id(&self) -> EndpointId;

    /// Handle one validated inbound command.
    ///
    /// An `Err` means the command was dropped; it is never reported to the sender.
    async fn on_message(&self, command: InboundCommand) -> Result<(), RouteError>;

    async fn on_disconnect(&self);
}

/// Register the endpoint and pick the session variant for the resolved role.
pub async fn open_session(
    usecases: Arc<ChatUseCases>,
    identity: ResolvedIdentity,
    endpoint: Endpoint,
) -> Result<Arc<dyn ChatSession>, MessagePushError> {
    usecases.connect.execute(&identity, endpoint.clone()).await?;

    let session: Arc<dyn ChatSession> = match identity.role {
        ParticipantRole::Client => Arc::new(ClientSession {
            participant_id: identity.participant_id,
            endpoint,
            usecases,
        }),
        ParticipantRole::Staff => Arc::new(StaffSession {
            participant_id: identity.participant_id,
            endpoint,
            usecases,
        }),
    };
    Ok(session)
}

fn not_allowed(role: &str, command: &InboundCommand) -> RouteError {
    RouteError::MalformedEvent(format!("'{}' is not accepted from {}", command.kind(), role))
}

pub struct ClientSession {
    participant_id: ParticipantId,
    endpoint: Endpoint,
    usecases: Arc<ChatUseCases>,
}

#[async_trait]
impl ChatSession for ClientSession {
    fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    fn endpoint_id(&self) -> EndpointId {
        self.endpoint.id
    }

    async fn on_message(&self, command: InboundCommand) -> Result<(), RouteError> {
        match command {
            InboundCommand::ClientMessage { content } => {
                self.usecases
                    .send_message
                    .execute(&self.participant_id, &self.endpoint, content)
                    .await;
                Ok(())
            }
            other => Err(not_allowed("a client", &other)),
        }
    }

    async fn on_disconnect(&self) {
        self.usecases
            .disconnect
            .execute(&self.participant_id, self.endpoint.id)
            .await;
    }
}

pub struct StaffSession {
    participant_id: ParticipantId,
    endpoint: Endpoint,
    usecases: Arc<ChatUseCases>,
}

impl StaffSession {
    fn reply_to_requester(&self, event: ServerEvent) {
        if let Err(e) = self.endpoint.send(event) {
            tracing::warn!("Reply to staff endpoint {} failed: {}", self.endpoint.id, e);
        }
    }
}

#[async_trait]
impl ChatSession for StaffSession {
    fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    fn endpoint_id(&self) -> EndpointId {
        self.endpoint.id
    }

    async fn on_message(&self, command: InboundCommand) -> Result<(), RouteError> {
        match command {
            InboundCommand::StaffReply { target, content } => {
                let outcome = self
                    .usecases
                    .reply
                    .execute(&self.participant_id, &target, content)
                    .await;
                match outcome.stored {
                    Some(_) => Ok(()),
                    None => Err(RouteError::UnknownTarget(target.into_string())),
                }
            }
            InboundCommand::RequestParticipantList => {
                let summaries = self.usecases.list_conversations.execute().await;
                self.reply_to_requester(ServerEvent::ParticipantList(summaries));
                Ok(())
            }
            InboundCommand::RequestParticipantHistory { participant_id } => {
                match self.usecases.get_history.execute(&participant_id).await {
                    Some(events) => self.reply_to_requester(ServerEvent::ParticipantHistory {
                        participant_id,
                        events,
                    }),
                    None => tracing::debug!("No history for '{}'", participant_id),
                }
                Ok(())
            }
            other => Err(not_allowed("staff", &other)),
        }
    }

    async fn on_disconnect(&self) {
        self.usecases
            .disconnect
            .execute(&self.participant_id, self.endpoint.id)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MessageContent,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryConversationRepository,
        },
    };
    use madoguchi_shared::time::FixedClock;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Fixture {
        usecases: Arc<ChatUseCases>,
        repository: Arc<InMemoryConversationRepository>,
        message_pusher: Arc<WebSocketMessagePusher>,
    }

    fn fixture(policy: UnknownTargetPolicy) -> Fixture {
        let repository = Arc::new(InMemoryConversationRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let clock = Arc::new(FixedClock::new(0));
        let greeting = WelcomeGreeting::new(
            MessageContent::new("Welcome!".to_string()).unwrap(),
            clock.clone(),
        );
        let usecases = Arc::new(ChatUseCases::new(
            repository.clone(),
            message_pusher.clone(),
            clock,
            greeting,
            policy,
        ));
        Fixture {
            usecases,
            repository,
            message_pusher,
        }
    }

    async fn open(
        fixture: &Fixture,
        id: &str,
        role: ParticipantRole,
    ) -> (Arc<dyn ChatSession>, UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let identity = ResolvedIdentity {
            participant_id: ParticipantId::new(id.to_string()).unwrap(),
            role,
        };
        let session = open_session(
            fixture.usecases.clone(),
            identity,
            Endpoint::new(EndpointId::generate(), tx),
        )
        .await
        .unwrap();
        (session, rx)
    }

    fn content(text: &str) -> MessageContent {
        MessageContent::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_client_and_staff_conversation() {
        // テスト項目: クライアントの送信とスタッフの返信が双方に届き、履歴が 3 件になる
        // given (前提条件):
        let fixture = fixture(UnknownTargetPolicy::Create);
        let (staff, mut staff_rx) = open(&fixture, "support", ParticipantRole::Staff).await;
        let (alice, mut alice_rx) =
            open(&fixture, "alice@example.com", ParticipantRole::Client).await;
        assert!(matches!(
            alice_rx.recv().await,
            Some(ServerEvent::HistorySnapshot(_))
        ));

        // when (操作):
        alice
            .on_message(InboundCommand::ClientMessage {
                content: content("help"),
            })
            .await
            .unwrap();
        staff
            .on_message(InboundCommand::StaffReply {
                target: alice.participant_id().clone(),
                content: content("hi"),
            })
            .await
            .unwrap();

        // then (期待する結果):
        let Some(ServerEvent::MessageDelivered(echo)) = alice_rx.recv().await else {
            panic!("expected echo");
        };
        assert_eq!(echo.message.as_str(), "help");
        let Some(ServerEvent::MessageDelivered(reply)) = alice_rx.recv().await else {
            panic!("expected reply");
        };
        assert_eq!(reply.participant_id.as_str(), "support");
        assert!(reply.is_staff);
        assert!(matches!(
            staff_rx.recv().await,
            Some(ServerEvent::StaffNotification(_))
        ));
        assert!(matches!(
            staff_rx.recv().await,
            Some(ServerEvent::StaffNotification(_))
        ));
        assert_eq!(
            fixture
                .repository
                .get_events(alice.participant_id())
                .await
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_commands_outside_role_are_malformed() {
        // テスト項目: 役割に合わないコマンドは MalformedEvent で捨てられる
        // given (前提条件):
        let fixture = fixture(UnknownTargetPolicy::Create);
        let (staff, _staff_rx) = open(&fixture, "support", ParticipantRole::Staff).await;
        let (alice, _alice_rx) =
            open(&fixture, "alice@example.com", ParticipantRole::Client).await;

        // when (操作):
        let from_client = alice
            .on_message(InboundCommand::RequestParticipantList)
            .await;
        let from_staff = staff
            .on_message(InboundCommand::ClientMessage {
                content: content("hello"),
            })
            .await;

        // then (期待する結果):
        assert!(matches!(from_client, Err(RouteError::MalformedEvent(_))));
        assert!(matches!(from_staff, Err(RouteError::MalformedEvent(_))));
        assert_eq!(fixture.repository.get_events(alice.participant_id()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_staff_list_and_history_go_to_requester_only() {
        // テスト項目: 一覧・履歴の応答は要求したスタッフ画面にのみ届く
        // given (前提条件):
        let fixture = fixture(UnknownTargetPolicy::Create);
        let (staff, mut staff_rx) = open(&fixture, "support", ParticipantRole::Staff).await;
        let (_other, mut other_rx) = open(&fixture, "support", ParticipantRole::Staff).await;
        let (alice, _alice_rx) =
            open(&fixture, "alice@example.com", ParticipantRole::Client).await;

        // when (操作):
        staff
            .on_message(InboundCommand::RequestParticipantList)
            .await
            .unwrap();
        staff
            .on_message(InboundCommand::RequestParticipantHistory {
                participant_id: alice.participant_id().clone(),
            })
            .await
            .unwrap();
        staff
            .on_message(InboundCommand::RequestParticipantHistory {
                participant_id: ParticipantId::new("nobody".to_string()).unwrap(),
            })
            .await
            .unwrap();

        // then (期待する結果):
        let Some(ServerEvent::ParticipantList(list)) = staff_rx.recv().await else {
            panic!("expected participant list");
        };
        assert_eq!(list.len(), 1);
        assert!(list[0].is_active);
        let Some(ServerEvent::ParticipantHistory { participant_id, events }) =
            staff_rx.recv().await
        else {
            panic!("expected participant history");
        };
        assert_eq!(&participant_id, alice.participant_id());
        assert_eq!(events.len(), 1);
        assert!(staff_rx.try_recv().is_err());
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reply_to_unknown_target_with_drop_policy() {
        // テスト項目: Drop ポリシーでは未知の宛先への返信が UnknownTarget として捨てられる
        // given (前提条件):
        let fixture = fixture(UnknownTargetPolicy::Drop);
        let (staff, _staff_rx) = open(&fixture, "support", ParticipantRole::Staff).await;

        // when (操作):
        let result = staff
            .on_message(InboundCommand::StaffReply {
                target: ParticipantId::new("bob@example.com".to_string()).unwrap(),
                content: content("hello"),
            })
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RouteError::UnknownTarget("bob@example.com".to_string()))
        );
        assert_eq!(fixture.repository.count_conversations().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_removes_presence() {
        // テスト項目: 切断で Presence から消え、履歴は残る
        // given (前提条件):
        let fixture = fixture(UnknownTargetPolicy::Create);
        let (alice, _alice_rx) =
            open(&fixture, "alice@example.com", ParticipantRole::Client).await;

        // when (操作):
        alice.on_disconnect().await;

        // then (期待する結果):
        assert!(!fixture.message_pusher.is_present(alice.participant_id()).await);
        assert_eq!(fixture.repository.count_conversations().await, 1);
    }
}
