//! Commands submitted to the replicated state machine.
//!
//! A command is a uniquely identified, immutable description of one
//! operation. It is built per call, submitted once, and dropped once its
//! response has been decoded.
//!
//! Commands are:
//! - **Tagged**: [`Operation`] is a stable string tag on the wire
//! - **Ordered**: arguments keep the order they were supplied in
//! - **Pure data**: no closures, no handles, safe to log

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::{ReadRequest, WriteRequest};
use crate::CommandId;

/// The operation a command asks the state machine to perform.
///
/// The operation alone determines the argument list and the result shape:
///
/// | Operation | Arguments | Result payload |
/// |-----------|-----------|----------------|
/// | `createTable` | `[TableName]` | `Bool` |
/// | `dropTable` | `[TableName]` | `Unit` |
/// | `dropAllTables` | `[]` | `Unit` |
/// | `listTables` | `[]` | `TableNames` |
/// | `read` | `[Reads]` | `ReadOutcomes` |
/// | `write` | `[Writes]` | `WriteOutcomes` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Create a table
    #[serde(rename = "createTable")]
    CreateTable,
    /// Drop one table
    #[serde(rename = "dropTable")]
    DropTable,
    /// Drop every table
    #[serde(rename = "dropAllTables")]
    DropAllTables,
    /// List table names
    #[serde(rename = "listTables")]
    ListTables,
    /// Batched reads
    #[serde(rename = "read")]
    Read,
    /// Batched writes
    #[serde(rename = "write")]
    Write,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 6] = [
        Operation::CreateTable,
        Operation::DropTable,
        Operation::DropAllTables,
        Operation::ListTables,
        Operation::Read,
        Operation::Write,
    ];

    /// The wire tag of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateTable => "createTable",
            Operation::DropTable => "dropTable",
            Operation::DropAllTables => "dropAllTables",
            Operation::ListTables => "listTables",
            Operation::Read => "read",
            Operation::Write => "write",
        }
    }

    /// Whether this operation carries a batch of per-item requests.
    pub fn is_batch(&self) -> bool {
        matches!(self, Operation::Read | Operation::Write)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operation tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// One typed argument of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    /// Name of the table the operation targets.
    TableName(String),
    /// Ordered per-item read requests.
    Reads(Vec<ReadRequest>),
    /// Ordered per-item write requests.
    Writes(Vec<WriteRequest>),
}

/// A uniquely identified operation, ready for submission.
///
/// Fields are private: a command cannot be changed after construction and
/// its id is assigned exactly once. Use the per-operation constructors,
/// which also guarantee the argument list matches the operation.
///
/// # Example
///
/// ```
/// use replicadb_core::{Command, CommandId, Operation};
///
/// let cmd = Command::create_table(CommandId::from("id-1"), "users");
/// assert_eq!(cmd.operation(), Operation::CreateTable);
/// assert_eq!(cmd.table_name(), Some("users"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    id: CommandId,
    operation: Operation,
    arguments: Vec<Argument>,
}

impl Command {
    fn new(id: CommandId, operation: Operation, arguments: Vec<Argument>) -> Self {
        Command {
            id,
            operation,
            arguments,
        }
    }

    /// Build a `createTable` command.
    pub fn create_table(id: CommandId, table: impl Into<String>) -> Self {
        Self::new(
            id,
            Operation::CreateTable,
            vec![Argument::TableName(table.into())],
        )
    }

    /// Build a `dropTable` command.
    pub fn drop_table(id: CommandId, table: impl Into<String>) -> Self {
        Self::new(
            id,
            Operation::DropTable,
            vec![Argument::TableName(table.into())],
        )
    }

    /// Build a `dropAllTables` command.
    pub fn drop_all_tables(id: CommandId) -> Self {
        Self::new(id, Operation::DropAllTables, Vec::new())
    }

    /// Build a `listTables` command.
    pub fn list_tables(id: CommandId) -> Self {
        Self::new(id, Operation::ListTables, Vec::new())
    }

    /// Build a `read` command wrapping the ordered request list.
    pub fn read(id: CommandId, requests: Vec<ReadRequest>) -> Self {
        Self::new(id, Operation::Read, vec![Argument::Reads(requests)])
    }

    /// Build a `write` command wrapping the ordered request list.
    pub fn write(id: CommandId, requests: Vec<WriteRequest>) -> Self {
        Self::new(id, Operation::Write, vec![Argument::Writes(requests)])
    }

    /// The command's unique id.
    pub fn id(&self) -> &CommandId {
        &self.id
    }

    /// The operation tag.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The ordered argument list.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The target table, for table-scoped operations.
    pub fn table_name(&self) -> Option<&str> {
        self.arguments.iter().find_map(|arg| match arg {
            Argument::TableName(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The read requests, for `read` commands.
    pub fn reads(&self) -> Option<&[ReadRequest]> {
        self.arguments.iter().find_map(|arg| match arg {
            Argument::Reads(reads) => Some(reads.as_slice()),
            _ => None,
        })
    }

    /// The write requests, for `write` commands.
    pub fn writes(&self) -> Option<&[WriteRequest]> {
        self.arguments.iter().find_map(|arg| match arg {
            Argument::Writes(writes) => Some(writes.as_slice()),
            _ => None,
        })
    }

    /// Number of per-item requests carried, zero for non-batch commands.
    pub fn item_count(&self) -> usize {
        self.reads()
            .map(<[ReadRequest]>::len)
            .or_else(|| self.writes().map(<[WriteRequest]>::len))
            .unwrap_or(0)
    }
}
