//! Composition root: wires repositories, the pusher and use cases into `AppState`.

use std::sync::Arc;

use madoguchi_shared::time::{Clock, SystemClock};
use thiserror::Error;

use crate::{
    config::{DEV_JWT_SECRET, DEV_STAFF_PASSWORD, ServerConfig},
    domain::{
        Account, AccountRepository, CredentialService, MessageContent, ParticipantId,
        PasswordHasher,
    },
    infrastructure::{
        credential::{Argon2PasswordHasher, JwtCredentialService},
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryAccountRepository, InMemoryConversationRepository},
    },
    ui::state::AppState,
    usecase::{
        ChatUseCases, GetProfileUseCase, LoginUseCase, ResolveIdentityUseCase, SignupUseCase,
        UpdateProfileUseCase, WelcomeGreeting,
    },
};

/// Balance of the seeded staff account.
pub const STAFF_BALANCE: i64 = 999_999;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to seed the staff account: {0}")]
    Seed(String),
}

pub async fn build_state(config: &ServerConfig) -> Result<Arc<AppState>, StartupError> {
    build_state_with_clock(config, Arc::new(SystemClock)).await
}

pub async fn build_state_with_clock(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<AppState>, StartupError> {
    if config.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("Using the development JWT secret; set JWT_SECRET in production");
    }
    if config.staff_password == DEV_STAFF_PASSWORD {
        tracing::warn!("Using the development staff password; set STAFF_PASSWORD in production");
    }

    let staff_id = ParticipantId::new(config.staff_id.clone())
        .map_err(|e| StartupError::InvalidConfig(format!("staff id: {}", e)))?;
    let welcome = MessageContent::new(config.welcome_message.clone())
        .map_err(|e| StartupError::InvalidConfig(format!("welcome message: {}", e)))?;

    // 1. Repositories and MessagePusher
    let conversations = Arc::new(InMemoryConversationRepository::new());
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. Credentials
    let credentials: Arc<dyn CredentialService> =
        Arc::new(JwtCredentialService::new(&config.jwt_secret).with_duration(config.token_ttl));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());

    // 3. Staff account
    let password_hash = hasher
        .hash(&config.staff_password)
        .map_err(|e| StartupError::Seed(e.to_string()))?;
    accounts
        .insert(Account {
            id: staff_id.clone(),
            name: config.staff_name.clone(),
            email: staff_id.as_str().to_string(),
            address: String::new(),
            balance: STAFF_BALANCE,
            is_staff: true,
            password_hash,
        })
        .await
        .map_err(|e| StartupError::Seed(e.to_string()))?;
    tracing::info!("Staff account '{}' ready", staff_id);

    // 4. UseCases
    let greeting = WelcomeGreeting::new(welcome, clock.clone());
    let chat = Arc::new(ChatUseCases::new(
        conversations.clone(),
        message_pusher,
        clock,
        greeting.clone(),
        config.unknown_target,
    ));

    Ok(Arc::new(AppState {
        chat,
        resolve_identity: ResolveIdentityUseCase::new(
            credentials.clone(),
            staff_id,
            config.anonymous_staff,
        ),
        signup: SignupUseCase::new(accounts.clone(), conversations, hasher.clone(), greeting),
        login: LoginUseCase::new(accounts.clone(), hasher.clone(), credentials.clone()),
        get_profile: GetProfileUseCase::new(accounts.clone()),
        update_profile: UpdateProfileUseCase::new(accounts, hasher),
        credentials,
    }))
}
