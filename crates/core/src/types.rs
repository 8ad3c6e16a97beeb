//! Per-item request and outcome types carried inside batch commands.
//!
//! All types are serializable: they travel inside a [`Command`](crate::Command)
//! argument and come back inside a [`Payload`](crate::Payload).

use serde::{Deserialize, Serialize};

use crate::Value;

// =============================================================================
// Versioned Types
// =============================================================================

/// A value with the version it was committed at.
///
/// Versions are per key. The first committed write of a key produces
/// version 1 and every later committed write increments it by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedValue {
    pub value: Value,
    pub version: u64,
}

impl VersionedValue {
    /// Create a versioned value.
    pub fn new(value: impl Into<Value>, version: u64) -> Self {
        VersionedValue {
            value: value.into(),
            version,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Read a single key from a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadRequest {
    pub table: String,
    pub key: String,
}

impl ReadRequest {
    /// Create a read request for `key` in `table`.
    pub fn new(table: impl Into<String>, key: impl Into<String>) -> Self {
        ReadRequest {
            table: table.into(),
            key: key.into(),
        }
    }
}

/// What a write request does to its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    /// Unconditional upsert.
    Put { value: Value },
    /// Write only if the key does not exist.
    PutIfAbsent { value: Value },
    /// Write only if the current version equals `version`.
    PutIfVersion { value: Value, version: u64 },
    /// Write only if the current value equals `expected`.
    PutIfValue { value: Value, expected: Value },
    /// Unconditional delete.
    Remove,
    /// Delete only if the current version equals `version`.
    RemoveIfVersion { version: u64 },
    /// Delete only if the current value equals `expected`.
    RemoveIfValue { expected: Value },
}

impl WriteKind {
    /// Whether this write deletes the key when applied.
    pub fn is_remove(&self) -> bool {
        matches!(
            self,
            WriteKind::Remove | WriteKind::RemoveIfVersion { .. } | WriteKind::RemoveIfValue { .. }
        )
    }
}

/// Write a single key in a table.
///
/// # Example
///
/// ```
/// use replicadb_core::WriteRequest;
///
/// let put = WriteRequest::put("users", "alice", 1);
/// let cas = WriteRequest::put_if_version("users", "alice", 2, 1);
/// let del = WriteRequest::remove("users", "alice");
/// assert!(del.kind.is_remove());
/// # let _ = (put, cas);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub table: String,
    pub key: String,
    pub kind: WriteKind,
}

impl WriteRequest {
    fn with_kind(table: impl Into<String>, key: impl Into<String>, kind: WriteKind) -> Self {
        WriteRequest {
            table: table.into(),
            key: key.into(),
            kind,
        }
    }

    /// Unconditional upsert.
    pub fn put(table: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_kind(table, key, WriteKind::Put { value: value.into() })
    }

    /// Insert only if the key is absent.
    pub fn put_if_absent(
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::with_kind(table, key, WriteKind::PutIfAbsent { value: value.into() })
    }

    /// Compare-and-set on the current version.
    pub fn put_if_version(
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
        version: u64,
    ) -> Self {
        Self::with_kind(
            table,
            key,
            WriteKind::PutIfVersion {
                value: value.into(),
                version,
            },
        )
    }

    /// Compare-and-set on the current value.
    pub fn put_if_value(
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
        expected: impl Into<Value>,
    ) -> Self {
        Self::with_kind(
            table,
            key,
            WriteKind::PutIfValue {
                value: value.into(),
                expected: expected.into(),
            },
        )
    }

    /// Unconditional delete.
    pub fn remove(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_kind(table, key, WriteKind::Remove)
    }

    /// Delete only at the given version.
    pub fn remove_if_version(
        table: impl Into<String>,
        key: impl Into<String>,
        version: u64,
    ) -> Self {
        Self::with_kind(table, key, WriteKind::RemoveIfVersion { version })
    }

    /// Delete only if the value matches.
    pub fn remove_if_value(
        table: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<Value>,
    ) -> Self {
        Self::with_kind(
            table,
            key,
            WriteKind::RemoveIfValue {
                expected: expected.into(),
            },
        )
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of one read inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOutcome {
    /// The key exists.
    Found(VersionedValue),
    /// The table exists but the key does not.
    NotFound,
    /// The table does not exist.
    NoSuchTable,
    /// The request itself was refused (bad table name or key).
    Invalid { reason: String },
}

impl ReadOutcome {
    /// Whether the key was found.
    pub fn is_found(&self) -> bool {
        matches!(self, ReadOutcome::Found(_))
    }

    /// The retrieved value, if any.
    pub fn value(&self) -> Option<&VersionedValue> {
        match self {
            ReadOutcome::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Why a single write inside a batch was not applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteRejection {
    /// Version precondition failed. `actual` is `None` when the key is absent.
    VersionConflict { expected: u64, actual: Option<u64> },
    /// Value precondition failed.
    ValueMismatch,
    /// `PutIfAbsent` on a key that exists at `version`.
    AlreadyExists { version: u64 },
    /// The table does not exist.
    NoSuchTable,
    /// The request itself was refused (bad table name or key).
    Invalid { reason: String },
}

/// Result of one write inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// A put was applied; `version` is the key's new version.
    Committed {
        version: u64,
        previous: Option<VersionedValue>,
    },
    /// A remove was applied; `previous` is `None` if the key was already absent.
    Removed { previous: Option<VersionedValue> },
    /// The write was not applied.
    Rejected(WriteRejection),
}

impl WriteOutcome {
    /// Whether the write was applied.
    pub fn is_applied(&self) -> bool {
        !matches!(self, WriteOutcome::Rejected(_))
    }

    /// The rejection reason, if the write was not applied.
    pub fn rejection(&self) -> Option<&WriteRejection> {
        match self {
            WriteOutcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}
