//! Domain layer for the support chat.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod credential;
pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod policy;
pub mod presence;
pub mod repository;
pub mod value_object;

pub use credential::{CredentialService, PasswordHasher, VerifiedIdentity};
pub use entity::{Account, ChatEvent, Conversation, ConversationSummary, ProfileUpdate};
pub use error::{
    CredentialError, MessagePushError, PasswordHashError, RepositoryError, ValueObjectError,
};
pub use event::{InboundCommand, ServerEvent};
pub use message_pusher::MessagePusher;
pub use policy::UnknownTargetPolicy;
pub use presence::{Endpoint, PresenceTable, PusherChannel};
pub use repository::{AccountRepository, ConversationRepository};
pub use value_object::{
    EmailAddress, EndpointId, MessageContent, ParticipantId, ParticipantRole, Timestamp,
};
