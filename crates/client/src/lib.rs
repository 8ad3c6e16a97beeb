//! # ReplicaDB Client
//!
//! Issues table operations against a replicated state machine. Nothing runs
//! locally: each call becomes one uniquely identified [`Command`], submitted
//! through a consensus-backed [`SubmissionChannel`] and resolved into a typed
//! result or a typed [`Error`].
//!
//! ## Operations
//!
//! | Method | Result | Fails with |
//! |--------|--------|------------|
//! | `create_table` | `bool` (false if it existed) | Connectivity, Operation |
//! | `drop_table` | `()` | Connectivity, Operation |
//! | `drop_all_tables` | `()` | Connectivity, Operation |
//! | `list_tables` | `Vec<String>` | Connectivity, Operation |
//! | `batch_read` | one `ReadOutcome` per request | Connectivity, Operation |
//! | `batch_write` | one `WriteOutcome` per request | Connectivity, Operation |
//!
//! ## Call path
//!
//! ```text
//! facade call -> Command (fresh id) -> channel.submit -> await -> ResponseDecoder -> T
//!                      \-> BatchCoordinator (read / write) -/
//! ```

#![warn(missing_docs)]

mod batch;
mod blocking;
mod channel;
mod client;
mod config;
mod decode;
#[allow(missing_docs)]
mod error;
pub mod testing;

pub use batch::{BatchCoordinator, BatchItem};
pub use blocking::BlockingClient;
pub use channel::{ChannelError, SubmissionChannel};
pub use client::{DatabaseClient, DatabaseClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use decode::{Decoded, ResponseDecoder};
pub use error::Error;

// Re-export core types so users don't need replicadb-core directly
pub use replicadb_core::{
    Argument, Command, CommandId, IdGenerator, LimitError, Limits, Operation, Payload,
    RandomIdGenerator, ReadOutcome, ReadRequest, Response, SequentialIdGenerator, Status, Value,
    VersionedValue, WriteKind, WriteOutcome, WriteRejection, WriteRequest,
};

// Implementors of SubmissionChannel need the same attribute macro
pub use async_trait::async_trait;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;
