//! Client Layer Tests
//!
//! End-to-end tests of the public client API against an in-process
//! state machine:
//! - Table lifecycle (create / drop / list)
//! - Batch reads and writes (ordering, per-item outcomes)
//! - Failure classification (connectivity vs operation vs timeout)
//! - Concurrent callers

mod common;

mod batch_operations;
mod failures;
mod table_operations;
