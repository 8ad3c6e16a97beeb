//! Response decoding.
//!
//! The operation of the originating command alone decides which payload
//! shape an ok response must carry. Each operation has one typed decoder;
//! any other payload surfaces as [`Error::UnexpectedResult`] instead of
//! being misread.
//!
//! Status handling is uniform across operations:
//! - `Ok` decodes the payload
//! - `Rejected` becomes [`Error::Operation`] with the server diagnostic
//! - protocol statuses (`NoLeader`, `NoQuorum`, `Timeout`) become
//!   [`Error::Connectivity`]

use replicadb_core::{Operation, Payload, ReadOutcome, Response, Status, WriteOutcome};

use crate::{Error, Result};

/// A decoded result, one variant per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// createTable: true if the table was newly created
    Created(bool),
    /// dropTable / dropAllTables
    Dropped,
    /// listTables
    Tables(Vec<String>),
    /// read
    Reads(Vec<ReadOutcome>),
    /// write
    Writes(Vec<WriteOutcome>),
}

/// Maps raw responses to typed results for a given operation.
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Payload shape an ok response to `operation` must carry.
    pub fn expected_kind(operation: Operation) -> &'static str {
        match operation {
            Operation::CreateTable => "Bool",
            Operation::DropTable | Operation::DropAllTables => "Unit",
            Operation::ListTables => "TableNames",
            Operation::Read => "ReadOutcomes",
            Operation::Write => "WriteOutcomes",
        }
    }

    /// Fail unless the response status is `Ok`.
    pub fn check_status(operation: Operation, response: &Response) -> Result<()> {
        match response.status {
            Status::Ok => Ok(()),
            Status::Rejected => Err(Error::Operation {
                operation,
                diagnostic: response.diagnostic(),
            }),
            Status::NoLeader | Status::NoQuorum | Status::Timeout => Err(Error::Connectivity {
                reason: format!(
                    "{} not committed ({}): {}",
                    operation,
                    response.status,
                    response.diagnostic()
                ),
            }),
        }
    }

    /// Decode `response` as the answer to `operation`.
    pub fn decode(operation: Operation, response: Response) -> Result<Decoded> {
        match operation {
            Operation::CreateTable => Self::created(response).map(Decoded::Created),
            Operation::DropTable | Operation::DropAllTables => {
                Self::dropped(operation, response).map(|()| Decoded::Dropped)
            }
            Operation::ListTables => Self::table_names(response).map(Decoded::Tables),
            Operation::Read => Self::read_outcomes(response).map(Decoded::Reads),
            Operation::Write => Self::write_outcomes(response).map(Decoded::Writes),
        }
    }

    /// Decode a createTable response.
    pub fn created(response: Response) -> Result<bool> {
        Self::check_status(Operation::CreateTable, &response)?;
        match response.result {
            Payload::Bool(created) => Ok(created),
            other => Err(unexpected(Operation::CreateTable, other.kind())),
        }
    }

    /// Decode a dropTable or dropAllTables response.
    pub fn dropped(operation: Operation, response: Response) -> Result<()> {
        Self::check_status(operation, &response)?;
        match response.result {
            Payload::Unit => Ok(()),
            other => Err(unexpected(operation, other.kind())),
        }
    }

    /// Decode a listTables response.
    pub fn table_names(response: Response) -> Result<Vec<String>> {
        Self::check_status(Operation::ListTables, &response)?;
        match response.result {
            Payload::TableNames(names) => Ok(names),
            other => Err(unexpected(Operation::ListTables, other.kind())),
        }
    }

    /// Decode a batch read response.
    pub fn read_outcomes(response: Response) -> Result<Vec<ReadOutcome>> {
        Self::check_status(Operation::Read, &response)?;
        match response.result {
            Payload::ReadOutcomes(outcomes) => Ok(outcomes),
            other => Err(unexpected(Operation::Read, other.kind())),
        }
    }

    /// Decode a batch write response.
    pub fn write_outcomes(response: Response) -> Result<Vec<WriteOutcome>> {
        Self::check_status(Operation::Write, &response)?;
        match response.result {
            Payload::WriteOutcomes(outcomes) => Ok(outcomes),
            other => Err(unexpected(Operation::Write, other.kind())),
        }
    }
}

pub(crate) fn unexpected(operation: Operation, actual: impl Into<String>) -> Error {
    Error::UnexpectedResult {
        operation,
        expected: ResponseDecoder::expected_kind(operation).to_string(),
        actual: actual.into(),
    }
}
