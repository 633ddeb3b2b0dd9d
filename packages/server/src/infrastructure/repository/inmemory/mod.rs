//! インメモリ Repository 実装（プロセス終了で消える）

mod account;
mod conversation;

pub use account::InMemoryAccountRepository;
pub use conversation::InMemoryConversationRepository;
