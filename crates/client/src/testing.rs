//! Local channels for tests and examples.
//!
//! [`InMemoryChannel`] applies commands to a single-node, in-process table
//! store with the same semantics the replicated state machine exposes. It
//! involves no consensus, so every submission resolves immediately unless a
//! failure was injected. Table names and keys are checked against its
//! [`Limits`]: a bad table name rejects createTable, a bad item becomes that
//! item's `Invalid` outcome. [`UnreachableChannel`] fails every submission.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use replicadb_core::{
    Command, CommandId, Limits, Operation, Payload, ReadOutcome, ReadRequest, Response, Status,
    Value, VersionedValue, WriteKind, WriteOutcome, WriteRejection, WriteRequest,
};

use crate::channel::{ChannelError, SubmissionChannel};

/// A key's latest state. Removed keys keep their version so a later put
/// continues the sequence.
#[derive(Debug, Clone)]
struct Entry {
    value: Option<Value>,
    version: u64,
}

impl Entry {
    fn live(&self) -> Option<VersionedValue> {
        self.value
            .clone()
            .map(|value| VersionedValue::new(value, self.version))
    }
}

type Table = BTreeMap<String, Entry>;

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<String, Table>,
    submitted: Vec<CommandId>,
    faults: VecDeque<(Status, String)>,
    closed: bool,
}

/// In-process state machine behind the [`SubmissionChannel`] interface.
///
/// # Example
///
/// ```ignore
/// let channel = Arc::new(InMemoryChannel::new());
/// let client = DatabaseClient::new(channel.clone());
///
/// channel.inject_failure(Status::NoLeader, "election in progress");
/// assert!(client.list_tables().await.unwrap_err().is_connectivity());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryChannel {
    state: Mutex<State>,
    limits: Limits,
}

impl InMemoryChannel {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store enforcing `limits` on names and keys.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            state: Mutex::default(),
            limits,
        }
    }

    /// Ids of every command submitted so far, in arrival order.
    pub fn submitted(&self) -> Vec<CommandId> {
        self.state.lock().submitted.clone()
    }

    /// Answer the next submission with `status` instead of applying it.
    ///
    /// Faults queue up and are consumed one per submission.
    pub fn inject_failure(&self, status: Status, diagnostic: impl Into<String>) {
        self.state
            .lock()
            .faults
            .push_back((status, diagnostic.into()));
    }

    /// Fail every later submission with [`ChannelError::Closed`].
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    fn apply(&self, state: &mut State, command: &Command) -> Response {
        let id = command.id().clone();
        let table = command.table_name().unwrap_or_default().to_string();

        match command.operation() {
            Operation::CreateTable => {
                if let Err(e) = self.limits.validate_table_name(&table) {
                    return Response::failed(id, Status::Rejected, e.to_string());
                }
                let created = !state.tables.contains_key(&table);
                if created {
                    state.tables.insert(table, Table::new());
                }
                Response::ok(id, Payload::Bool(created))
            }
            Operation::DropTable => match state.tables.remove(&table) {
                Some(_) => Response::ok(id, Payload::Unit),
                None => Response::failed(id, Status::Rejected, format!("no such table: {}", table)),
            },
            Operation::DropAllTables => {
                state.tables.clear();
                Response::ok(id, Payload::Unit)
            }
            Operation::ListTables => {
                let names = state.tables.keys().cloned().collect();
                Response::ok(id, Payload::TableNames(names))
            }
            Operation::Read => {
                let outcomes = command
                    .reads()
                    .unwrap_or_default()
                    .iter()
                    .map(|req| match self.limits.validate_item(&req.table, &req.key) {
                        Ok(()) => read(&state.tables, req),
                        Err(e) => ReadOutcome::Invalid {
                            reason: e.to_string(),
                        },
                    })
                    .collect();
                Response::ok(id, Payload::ReadOutcomes(outcomes))
            }
            Operation::Write => {
                let outcomes = command
                    .writes()
                    .unwrap_or_default()
                    .iter()
                    .map(|req| match self.limits.validate_item(&req.table, &req.key) {
                        Ok(()) => write(&mut state.tables, req),
                        Err(e) => WriteOutcome::Rejected(WriteRejection::Invalid {
                            reason: e.to_string(),
                        }),
                    })
                    .collect();
                Response::ok(id, Payload::WriteOutcomes(outcomes))
            }
        }
    }
}

fn read(tables: &BTreeMap<String, Table>, req: &ReadRequest) -> ReadOutcome {
    match tables.get(&req.table) {
        None => ReadOutcome::NoSuchTable,
        Some(table) => match table.get(&req.key).and_then(Entry::live) {
            Some(found) => ReadOutcome::Found(found),
            None => ReadOutcome::NotFound,
        },
    }
}

fn write(tables: &mut BTreeMap<String, Table>, req: &WriteRequest) -> WriteOutcome {
    let Some(table) = tables.get_mut(&req.table) else {
        return WriteOutcome::Rejected(WriteRejection::NoSuchTable);
    };

    let current = table.get(&req.key).and_then(Entry::live);
    let current_version = current.as_ref().map(|c| c.version);

    let check = match &req.kind {
        WriteKind::Put { .. } | WriteKind::Remove => Ok(()),
        WriteKind::PutIfAbsent { .. } => match current_version {
            Some(version) => Err(WriteRejection::AlreadyExists { version }),
            None => Ok(()),
        },
        WriteKind::PutIfVersion { version, .. } | WriteKind::RemoveIfVersion { version } => {
            if current_version == Some(*version) {
                Ok(())
            } else {
                Err(WriteRejection::VersionConflict {
                    expected: *version,
                    actual: current_version,
                })
            }
        }
        WriteKind::PutIfValue { expected, .. } | WriteKind::RemoveIfValue { expected } => {
            match &current {
                Some(c) if c.value == *expected => Ok(()),
                _ => Err(WriteRejection::ValueMismatch),
            }
        }
    };
    if let Err(rejection) = check {
        return WriteOutcome::Rejected(rejection);
    }

    let last_version = table.get(&req.key).map(|e| e.version).unwrap_or(0);
    match &req.kind {
        WriteKind::Put { value }
        | WriteKind::PutIfAbsent { value }
        | WriteKind::PutIfVersion { value, .. }
        | WriteKind::PutIfValue { value, .. } => {
            let version = last_version + 1;
            table.insert(
                req.key.clone(),
                Entry {
                    value: Some(value.clone()),
                    version,
                },
            );
            WriteOutcome::Committed {
                version,
                previous: current,
            }
        }
        WriteKind::Remove | WriteKind::RemoveIfVersion { .. } | WriteKind::RemoveIfValue { .. } => {
            if let Some(entry) = table.get_mut(&req.key) {
                entry.value = None;
            }
            WriteOutcome::Removed { previous: current }
        }
    }
}

#[async_trait]
impl SubmissionChannel for InMemoryChannel {
    async fn submit(&self, command: Command) -> Result<Response, ChannelError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.submitted.push(command.id().clone());

        if let Some((status, diagnostic)) = state.faults.pop_front() {
            return Ok(Response::failed(command.id().clone(), status, diagnostic));
        }
        Ok(self.apply(&mut state, &command))
    }
}

/// A channel whose cluster can never be reached.
#[derive(Debug, Clone)]
pub struct UnreachableChannel {
    reason: String,
}

impl UnreachableChannel {
    /// Fail every submission with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnreachableChannel {
    fn default() -> Self {
        Self::new("no route to leader")
    }
}

#[async_trait]
impl SubmissionChannel for UnreachableChannel {
    async fn submit(&self, _command: Command) -> Result<Response, ChannelError> {
        Err(ChannelError::Unavailable {
            reason: self.reason.clone(),
        })
    }
}
