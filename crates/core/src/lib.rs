//! Core types for ReplicaDB
//!
//! This crate defines the data exchanged with the replicated state machine:
//! - Value, VersionedValue: stored data
//! - ReadRequest, WriteRequest, ReadOutcome, WriteOutcome: per-item batch types
//! - Operation, Command: what gets submitted
//! - CommandId, IdGenerator: unique, replay-safe command identifiers
//! - Status, Payload, Response: what comes back
//! - Limits: client-side input checks
//!
//! Nothing here performs I/O. Submission lives in `replicadb-client`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod id;
pub mod limits;
pub mod response;
#[allow(missing_docs)]
pub mod types;
pub mod value;

pub use command::{Argument, Command, Operation, UnknownOperation};
pub use id::{CommandId, IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use limits::{LimitError, Limits};
pub use response::{Payload, Response, Status};
pub use types::{
    ReadOutcome, ReadRequest, VersionedValue, WriteKind, WriteOutcome, WriteRejection,
    WriteRequest,
};
pub use value::Value;
