//! Response envelope returned by a submission channel.
//!
//! Wire shape: `{request_id, status, result, error}`. A single envelope
//! carries both protocol-level failures (no leader, no quorum) and
//! application-level rejections, distinguished only by [`Status`].

use serde::{Deserialize, Serialize};

use crate::types::{ReadOutcome, WriteOutcome};
use crate::CommandId;

/// Completion status of a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The command was replicated and applied.
    Ok,
    /// The state machine applied the command and rejected it.
    Rejected,
    /// No leader could be reached to accept the command.
    NoLeader,
    /// The leader could not replicate to a quorum.
    NoQuorum,
    /// The protocol gave up waiting for the command to commit.
    Timeout,
}

impl Status {
    /// Whether the command was applied successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Whether the failure happened in the consensus layer, before the state
    /// machine saw the command.
    pub fn is_protocol_failure(&self) -> bool {
        matches!(self, Status::NoLeader | Status::NoQuorum | Status::Timeout)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::Rejected => "rejected",
            Status::NoLeader => "no_leader",
            Status::NoQuorum => "no_quorum",
            Status::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Operation-shaped result carried by a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// No result (drop operations, failed responses)
    Unit,
    /// Boolean result (createTable)
    Bool(bool),
    /// Ordered table names (listTables)
    TableNames(Vec<String>),
    /// Ordered per-item read outcomes (read)
    ReadOutcomes(Vec<ReadOutcome>),
    /// Ordered per-item write outcomes (write)
    WriteOutcomes(Vec<WriteOutcome>),
}

impl Payload {
    /// Name of the payload shape, used in decode errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Unit => "Unit",
            Payload::Bool(_) => "Bool",
            Payload::TableNames(_) => "TableNames",
            Payload::ReadOutcomes(_) => "ReadOutcomes",
            Payload::WriteOutcomes(_) => "WriteOutcomes",
        }
    }
}

/// The response to exactly one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Id of the command this response answers
    pub request_id: CommandId,
    /// Success or failure kind
    pub status: Status,
    /// Result payload (`Unit` unless status is `Ok`)
    pub result: Payload,
    /// Diagnostic text from the server or protocol, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Create a success response.
    pub fn ok(request_id: CommandId, result: Payload) -> Self {
        Response {
            request_id,
            status: Status::Ok,
            result,
            error: None,
        }
    }

    /// Create a failure response with a diagnostic.
    pub fn failed(request_id: CommandId, status: Status, error: impl Into<String>) -> Self {
        Response {
            request_id,
            status,
            result: Payload::Unit,
            error: Some(error.into()),
        }
    }

    /// The diagnostic text, or the status name if the server sent none.
    pub fn diagnostic(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| format!("status {}", self.status))
    }
}
