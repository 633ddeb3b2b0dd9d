//! Serializes chat operations that touch presence and history together.
//!
//! The presence table and the history store each guard their own state, but a
//! connect (register, initialize, snapshot) or a reply (append, deliver) spans
//! both. Every such operation holds this lock for its whole duration so no
//! other routing step can observe or change the stores halfway through.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct RoutingLock {
    inner: Arc<Mutex<()>>,
}

impl RoutingLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
