//! Routing policies chosen at startup.

/// What a staff reply does when the target has no conversation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTargetPolicy {
    /// Lazily create the target's conversation and store the reply.
    #[default]
    Create,
    /// Discard the reply from history (it is still delivered if the target is online).
    Drop,
}
