//! ReplicaDB - table operations on a consensus-replicated store
//!
//! Every operation is serialized into a uniquely identified command,
//! submitted through a consensus-backed channel, and resolved asynchronously
//! into a typed result or a typed failure.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use replicadb::{DatabaseClient, ReadRequest, WriteRequest};
//!
//! let client = DatabaseClient::new(Arc::new(channel));
//!
//! client.create_table("t1").await?;
//! client.batch_write(vec![WriteRequest::put("t1", "a", 1)]).await?;
//! let outcomes = client.batch_read(vec![ReadRequest::new("t1", "a")]).await?;
//! ```
//!
//! # Architecture
//!
//! The channel (leader election, replication, retries) is supplied by the
//! caller through [`SubmissionChannel`]. This crate owns only the
//! submission/response lifecycle: id generation, decoding, batch
//! packing and failure classification.

// Re-export the public API from replicadb-client
pub use replicadb_client::*;
