//! UseCase layer
//!
//! One struct per operation. Each depends only on the domain traits it needs,
//! injected as `Arc<dyn ...>`.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_conversation_history;
pub mod greeting;
pub mod list_conversations;
pub mod login;
pub mod profile;
pub mod reply_to_participant;
pub mod resolve_identity;
pub mod routing_lock;
pub mod send_message;
pub mod session;
pub mod signup;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{IdentityError, LoginError, ProfileError, RouteError, SignupError};
pub use get_conversation_history::GetConversationHistoryUseCase;
pub use greeting::{DEFAULT_WELCOME_MESSAGE, WelcomeGreeting};
pub use list_conversations::ListConversationsUseCase;
pub use login::LoginUseCase;
pub use profile::{GetProfileUseCase, MIN_PASSWORD_CHARS, UpdateProfileUseCase};
pub use reply_to_participant::{ReplyOutcome, ReplyToParticipantUseCase};
pub use resolve_identity::{Handshake, ResolveIdentityUseCase, ResolvedIdentity};
pub use routing_lock::RoutingLock;
pub use send_message::SendMessageUseCase;
pub use session::{ChatSession, ChatUseCases, ClientSession, StaffSession, open_session};
pub use signup::{SIGNUP_BONUS, SignupInput, SignupUseCase};
