//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::CredentialService,
    usecase::{
        ChatUseCases, GetProfileUseCase, LoginUseCase, ResolveIdentityUseCase, SignupUseCase,
        UpdateProfileUseCase,
    },
};

pub struct AppState {
    /// Chat use cases shared by every WebSocket session
    pub chat: Arc<ChatUseCases>,
    /// ResolveIdentityUseCase（接続時の識別子解決）
    pub resolve_identity: ResolveIdentityUseCase,
    pub signup: SignupUseCase,
    pub login: LoginUseCase,
    pub get_profile: GetProfileUseCase,
    pub update_profile: UpdateProfileUseCase,
    /// Bearer verification for the profile endpoints
    pub credentials: Arc<dyn CredentialService>,
}
