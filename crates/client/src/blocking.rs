//! Synchronous wrapper around [`DatabaseClient`].
//!
//! Each call blocks the calling thread until the underlying submission
//! resolves. Do not use from inside an async runtime; use
//! [`DatabaseClient`] directly there.

use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

use replicadb_core::{ReadOutcome, ReadRequest, Value, WriteOutcome, WriteRequest};

use crate::{DatabaseClient, Result};

/// Blocking client owning a single-threaded runtime.
#[derive(Debug)]
pub struct BlockingClient {
    inner: DatabaseClient,
    runtime: Runtime,
}

impl BlockingClient {
    /// Wrap `client`, starting a current-thread runtime to drive it.
    pub fn new(client: DatabaseClient) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: client,
            runtime,
        })
    }

    /// The wrapped async client.
    pub fn inner(&self) -> &DatabaseClient {
        &self.inner
    }

    /// Set a caller-side timeout for every later call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.inner = self.inner.with_timeout(timeout);
    }

    /// See [`DatabaseClient::create_table`].
    pub fn create_table(&self, name: &str) -> Result<bool> {
        self.runtime.block_on(self.inner.create_table(name))
    }

    /// See [`DatabaseClient::drop_table`].
    pub fn drop_table(&self, name: &str) -> Result<()> {
        self.runtime.block_on(self.inner.drop_table(name))
    }

    /// See [`DatabaseClient::drop_all_tables`].
    pub fn drop_all_tables(&self) -> Result<()> {
        self.runtime.block_on(self.inner.drop_all_tables())
    }

    /// See [`DatabaseClient::list_tables`].
    pub fn list_tables(&self) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.list_tables())
    }

    /// See [`DatabaseClient::batch_read`].
    pub fn batch_read(&self, requests: Vec<ReadRequest>) -> Result<Vec<ReadOutcome>> {
        self.runtime.block_on(self.inner.batch_read(requests))
    }

    /// See [`DatabaseClient::batch_write`].
    pub fn batch_write(&self, requests: Vec<WriteRequest>) -> Result<Vec<WriteOutcome>> {
        self.runtime.block_on(self.inner.batch_write(requests))
    }

    /// See [`DatabaseClient::get`].
    pub fn get(&self, table: &str, key: &str) -> Result<ReadOutcome> {
        self.runtime.block_on(self.inner.get(table, key))
    }

    /// See [`DatabaseClient::put`].
    pub fn put(&self, table: &str, key: &str, value: impl Into<Value>) -> Result<WriteOutcome> {
        self.runtime.block_on(self.inner.put(table, key, value))
    }

    /// See [`DatabaseClient::remove`].
    pub fn remove(&self, table: &str, key: &str) -> Result<WriteOutcome> {
        self.runtime.block_on(self.inner.remove(table, key))
    }
}
