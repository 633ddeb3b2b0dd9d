//! The greeting that opens every client conversation.

use std::sync::Arc;

use madoguchi_shared::time::Clock;

use crate::domain::{ChatEvent, MessageContent, Timestamp};

pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to Live Support. How can we help you?";

#[derive(Clone)]
pub struct WelcomeGreeting {
    content: MessageContent,
    clock: Arc<dyn Clock>,
}

impl WelcomeGreeting {
    pub fn new(content: MessageContent, clock: Arc<dyn Clock>) -> Self {
        Self { content, clock }
    }

    /// A fresh welcome event stamped with the current time.
    pub fn event(&self) -> ChatEvent {
        ChatEvent::welcome(
            self.content.clone(),
            Timestamp::from_millis(self.clock.now_millis()),
        )
    }
}
