//! The database client facade.
//!
//! Every operation follows the same path: check input, build a command
//! with a fresh id, submit it, await the single response, decode it. The
//! client holds no per-call state, so concurrent calls on clones of one
//! client never interfere; each is correlated only by its own command id.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use replicadb_core::{
    Command, IdGenerator, LimitError, Operation, RandomIdGenerator, ReadOutcome, ReadRequest,
    Response, Value, WriteOutcome, WriteRequest,
};

use crate::batch::{BatchCoordinator, BatchItem};
use crate::channel::{SubmissionChannel, Submitter};
use crate::config::{ClientConfig, ConfigError};
use crate::decode::ResponseDecoder;
use crate::{Error, Result};

/// Client for table operations on a replicated store.
///
/// `DatabaseClient` is cheap to clone and `Send + Sync`. Clones share the
/// channel and id generator.
///
/// # Example
///
/// ```ignore
/// use replicadb::{DatabaseClient, ReadRequest, WriteRequest};
///
/// let client = DatabaseClient::new(channel);
///
/// assert!(client.create_table("users").await?);
/// let written = client
///     .batch_write(vec![WriteRequest::put("users", "alice", 1)])
///     .await?;
/// let read = client
///     .batch_read(vec![ReadRequest::new("users", "alice")])
///     .await?;
/// ```
#[derive(Clone)]
pub struct DatabaseClient {
    submitter: Submitter,
    ids: Arc<dyn IdGenerator>,
    batches: BatchCoordinator,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for DatabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseClient")
            .field("batches", &self.batches)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DatabaseClient`].
pub struct DatabaseClientBuilder {
    channel: Arc<dyn SubmissionChannel>,
    ids: Arc<dyn IdGenerator>,
    config: ClientConfig,
}

impl DatabaseClientBuilder {
    /// Use a specific id generator (e.g. deterministic ids in tests).
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Use the given configuration. It is validated by [`build`](Self::build).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> std::result::Result<DatabaseClient, ConfigError> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> DatabaseClient {
        DatabaseClient {
            submitter: Submitter::new(self.channel),
            ids: self.ids,
            batches: BatchCoordinator::new(self.config.limits()),
            timeout: self.config.request_timeout(),
        }
    }
}

impl DatabaseClient {
    /// Create a client with random command ids and the default config.
    pub fn new(channel: Arc<dyn SubmissionChannel>) -> Self {
        // the default config is always valid
        Self::builder(channel).assemble()
    }

    /// Start building a client on `channel`.
    pub fn builder(channel: Arc<dyn SubmissionChannel>) -> DatabaseClientBuilder {
        DatabaseClientBuilder {
            channel,
            ids: Arc::new(RandomIdGenerator),
            config: ClientConfig::default(),
        }
    }

    /// A clone of this client that abandons each wait after `timeout`.
    ///
    /// An elapsed timeout yields [`Error::Timeout`]: the command may still
    /// commit, so treat it as "unknown outcome", not as failure.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// The caller-side timeout in effect, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    // =========================================================================
    // Table Operations
    // =========================================================================

    /// Create a table.
    ///
    /// Returns `true` if the table was created, `false` if it already
    /// existed. An existing table is a normal outcome, not an error.
    pub async fn create_table(&self, name: &str) -> Result<bool> {
        require_table_name(name)?;
        let command = Command::create_table(self.ids.next_id(), name);
        let response = self.submit(command).await?;
        logged(Operation::CreateTable, ResponseDecoder::created(response))
    }

    /// Drop a table.
    ///
    /// Fails with [`Error::Operation`] if the state machine rejects the drop,
    /// e.g. because the table does not exist.
    pub async fn drop_table(&self, name: &str) -> Result<()> {
        require_table_name(name)?;
        let command = Command::drop_table(self.ids.next_id(), name);
        let response = self.submit(command).await?;
        logged(
            Operation::DropTable,
            ResponseDecoder::dropped(Operation::DropTable, response),
        )
    }

    /// Drop every table.
    pub async fn drop_all_tables(&self) -> Result<()> {
        let command = Command::drop_all_tables(self.ids.next_id());
        let response = self.submit(command).await?;
        logged(
            Operation::DropAllTables,
            ResponseDecoder::dropped(Operation::DropAllTables, response),
        )
    }

    /// List table names, in the order the state machine returns them.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let command = Command::list_tables(self.ids.next_id());
        let response = self.submit(command).await?;
        logged(Operation::ListTables, ResponseDecoder::table_names(response))
    }

    // =========================================================================
    // Batch Operations
    // =========================================================================

    /// Read many keys in one command.
    ///
    /// Returns exactly one outcome per request, in request order. Missing
    /// keys, missing tables and malformed requests are outcomes, not errors.
    pub async fn batch_read(&self, requests: Vec<ReadRequest>) -> Result<Vec<ReadOutcome>> {
        self.batch(requests).await
    }

    /// Write many keys in one command.
    ///
    /// Returns exactly one outcome per request, in request order. A rejected
    /// item (e.g. a version conflict) does not abort its siblings.
    pub async fn batch_write(&self, requests: Vec<WriteRequest>) -> Result<Vec<WriteOutcome>> {
        self.batch(requests).await
    }

    // =========================================================================
    // Single-item helpers
    // =========================================================================

    /// Read one key.
    pub async fn get(&self, table: &str, key: &str) -> Result<ReadOutcome> {
        let outcomes = self.batch_read(vec![ReadRequest::new(table, key)]).await?;
        single(Operation::Read, outcomes)
    }

    /// Unconditionally write one key.
    pub async fn put(&self, table: &str, key: &str, value: impl Into<Value>) -> Result<WriteOutcome> {
        let outcomes = self
            .batch_write(vec![WriteRequest::put(table, key, value)])
            .await?;
        single(Operation::Write, outcomes)
    }

    /// Unconditionally remove one key.
    pub async fn remove(&self, table: &str, key: &str) -> Result<WriteOutcome> {
        let outcomes = self
            .batch_write(vec![WriteRequest::remove(table, key)])
            .await?;
        single(Operation::Write, outcomes)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn batch<T: BatchItem>(&self, requests: Vec<T>) -> Result<Vec<T::Outcome>> {
        let expected = requests.len();
        let command = self.batches.build(self.ids.next_id(), requests)?;
        let response = self.submit(command).await?;
        logged(T::OPERATION, self.batches.unpack::<T>(expected, response))
    }

    async fn submit(&self, command: Command) -> Result<Response> {
        self.submitter.submit(command, self.timeout).await
    }
}

fn require_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LimitError::EmptyTableName.into());
    }
    Ok(())
}

fn logged<T>(operation: Operation, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!(operation = %operation, error = %e, "operation failed");
    }
    result
}

fn single<T>(operation: Operation, outcomes: Vec<T>) -> Result<T> {
    let count = outcomes.len();
    let mut iter = outcomes.into_iter();
    match (iter.next(), iter.next()) {
        (Some(outcome), None) => Ok(outcome),
        _ => Err(crate::decode::unexpected(
            operation,
            format!("{} outcomes for 1 request", count),
        )),
    }
}
