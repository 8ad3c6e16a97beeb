//! Command identifiers and the generators that mint them.
//!
//! A [`CommandId`] correlates a submitted command with its response and may be
//! used by the replicated state machine as a deduplication key. Ids are never
//! derived from command content: two logically identical commands built by
//! two calls get two different ids.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Unique identifier of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    /// Get the string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for CommandId {
    fn from(s: String) -> Self {
        CommandId(s)
    }
}

impl From<&str> for CommandId {
    fn from(s: &str) -> Self {
        CommandId(s.to_string())
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh command ids.
///
/// Implementations must never block, never fail, and be safe to call from
/// many tasks at once without external locking.
pub trait IdGenerator: Send + Sync {
    /// Produce an id that has not been produced before.
    fn next_id(&self) -> CommandId;
}

/// Random 128-bit (UUID v4) ids. Collision-free across processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> CommandId {
        CommandId(Uuid::new_v4().to_string())
    }
}

/// Deterministic `"<prefix>-<n>"` ids, starting at 1.
///
/// Unique within one generator only. Intended for tests that need to
/// predict ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator producing `prefix-1`, `prefix-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("cmd")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> CommandId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        CommandId(format!("{}-{}", self.prefix, n))
    }
}
