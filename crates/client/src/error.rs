//! Error types for client operations.
//!
//! Every failure of a facade call is one [`Error`] variant. The split that
//! matters most to callers:
//! - **Connectivity**: the command may never have reached the state machine
//!   (channel closed, no leader, no quorum). Retrying with a fresh command
//!   is the caller's decision.
//! - **Operation**: the state machine processed the command and said no.
//!   The server's diagnostic is carried verbatim.
//! - **Timeout**: the caller stopped waiting. The command may still commit.
//!
//! Per-item failures inside a batch are never errors; they are data in the
//! outcome list.

use serde::{Deserialize, Serialize};

use replicadb_core::{LimitError, Operation};

/// Client operation errors.
///
/// # Categories
///
/// | Category | Variants | Retry with a new command? |
/// |----------|----------|---------------------------|
/// | Connectivity | `Connectivity` | Caller decides |
/// | Application | `Operation` | Only after fixing the cause |
/// | Unknown outcome | `Timeout` | Check state first |
/// | Client bug / bad input | `InvalidInput`, `UnexpectedResult` | No |
///
/// # Example
///
/// ```ignore
/// match client.drop_table("events").await {
///     Ok(()) => {}
///     Err(Error::Operation { diagnostic, .. }) => println!("rejected: {}", diagnostic),
///     Err(e) if e.is_connectivity() => println!("cluster unavailable: {}", e),
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// The submission channel could not deliver or resolve the command.
    #[error("connectivity failure: {reason}")]
    Connectivity { reason: String },

    /// The state machine processed the command and rejected it.
    #[error("{operation} failed: {diagnostic}")]
    Operation {
        operation: Operation,
        diagnostic: String,
    },

    /// The caller-side timeout elapsed before the response arrived.
    #[error("{operation} timed out waiting for {request_id}; outcome unknown")]
    Timeout {
        operation: Operation,
        request_id: String,
    },

    /// The call was rejected before submission.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An ok response carried a payload of the wrong shape.
    #[error("unexpected result for {operation}: expected {expected}, got {actual}")]
    UnexpectedResult {
        operation: Operation,
        expected: String,
        actual: String,
    },
}

impl Error {
    /// Whether the failure happened before the state machine applied the command.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity { .. })
    }

    /// Whether the state machine rejected the command.
    pub fn is_operation(&self) -> bool {
        matches!(self, Error::Operation { .. })
    }

    /// Whether the command may or may not have been applied.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

impl From<LimitError> for Error {
    fn from(e: LimitError) -> Self {
        Error::InvalidInput {
            reason: e.to_string(),
        }
    }
}
