//! Batch packing and unpacking.
//!
//! A batch is one command wrapping many independent per-item requests. The
//! aggregate response comes back as one ordered outcome list: the n-th
//! outcome always answers the n-th request. The coordinator never reorders,
//! filters or coalesces, and refuses an outcome list whose length differs
//! from the request list.
//!
//! Per-item failures (a version conflict, a missing table, a malformed key)
//! stay in the outcome list. Only a failed submission or a non-ok aggregate
//! status fails the batch as a whole; the client itself checks nothing but
//! the batch size.

use replicadb_core::{
    Command, CommandId, Limits, Operation, ReadOutcome, ReadRequest, Response, WriteOutcome,
    WriteRequest,
};

use crate::decode::{unexpected, ResponseDecoder};
use crate::Result;

/// A per-item request that can be batched into one command.
pub trait BatchItem: Sized {
    /// Per-item result type.
    type Outcome;

    /// Operation tag of the batch command.
    const OPERATION: Operation;

    /// Wrap the ordered request list into a command.
    fn into_command(id: CommandId, items: Vec<Self>) -> Command;

    /// Decode the outcome list of a response to this batch.
    fn outcomes(response: Response) -> Result<Vec<Self::Outcome>>;
}

impl BatchItem for ReadRequest {
    type Outcome = ReadOutcome;
    const OPERATION: Operation = Operation::Read;

    fn into_command(id: CommandId, items: Vec<Self>) -> Command {
        Command::read(id, items)
    }

    fn outcomes(response: Response) -> Result<Vec<ReadOutcome>> {
        ResponseDecoder::read_outcomes(response)
    }
}

impl BatchItem for WriteRequest {
    type Outcome = WriteOutcome;
    const OPERATION: Operation = Operation::Write;

    fn into_command(id: CommandId, items: Vec<Self>) -> Command {
        Command::write(id, items)
    }

    fn outcomes(response: Response) -> Result<Vec<WriteOutcome>> {
        ResponseDecoder::write_outcomes(response)
    }
}

/// Packs request lists into batch commands and unpacks their responses.
#[derive(Debug, Clone, Default)]
pub struct BatchCoordinator {
    limits: Limits,
}

impl BatchCoordinator {
    /// Create a coordinator enforcing the batch size bound of `limits`.
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Check the batch size and pack `items`, in order, into one command.
    pub fn build<T: BatchItem>(&self, id: CommandId, items: Vec<T>) -> Result<Command> {
        self.limits.validate_batch_size(items.len())?;
        Ok(T::into_command(id, items))
    }

    /// Extract the ordered outcome list for a batch of `expected` requests.
    pub fn unpack<T: BatchItem>(
        &self,
        expected: usize,
        response: Response,
    ) -> Result<Vec<T::Outcome>> {
        let outcomes = T::outcomes(response)?;
        if outcomes.len() != expected {
            return Err(unexpected(
                T::OPERATION,
                format!("{} outcomes for {} requests", outcomes.len(), expected),
            ));
        }
        Ok(outcomes)
    }
}
