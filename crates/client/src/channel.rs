//! The submission channel seam.
//!
//! A [`SubmissionChannel`] forwards a command through leader election and log
//! replication and resolves once the replicated state machine has answered.
//! Retries, leader redirection and protocol timeouts all live behind this
//! trait. The client adds nothing but the single await point in
//! [`Submitter::submit`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use replicadb_core::{Command, Response};

use crate::{Error, Result};

/// Consensus-backed transport for commands.
///
/// Implementations must be safe to share between tasks: many facade calls
/// may submit through the same channel concurrently, each awaiting its own
/// response correlated by command id.
#[async_trait]
pub trait SubmissionChannel: Send + Sync {
    /// Submit one command and wait for its response.
    ///
    /// Returns `Err` only for terminal channel failures. A response with a
    /// non-ok status is still `Ok` at this level.
    async fn submit(&self, command: Command) -> std::result::Result<Response, ChannelError>;
}

/// Terminal failures reported by a channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// The channel was shut down.
    #[error("submission channel closed")]
    Closed,

    /// The cluster could not be reached within the channel's own bounds.
    #[error("cluster unavailable: {reason}")]
    Unavailable { reason: String },

    /// The wait for a response was interrupted.
    #[error("interrupted while awaiting response")]
    Interrupted,
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Error::Connectivity {
            reason: e.to_string(),
        }
    }
}

/// Submits commands and surfaces channel failures as [`Error::Connectivity`].
#[derive(Clone)]
pub(crate) struct Submitter {
    channel: Arc<dyn SubmissionChannel>,
}

impl Submitter {
    pub(crate) fn new(channel: Arc<dyn SubmissionChannel>) -> Self {
        Self { channel }
    }

    /// Submit `command` and await its response, at most `timeout` if given.
    ///
    /// A response whose `request_id` does not echo the command id is treated
    /// as a connectivity failure: the channel broke its correlation contract.
    pub(crate) async fn submit(
        &self,
        command: Command,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        let request_id = command.id().clone();
        let operation = command.operation();
        debug!(
            request_id = %request_id,
            operation = %operation,
            items = command.item_count(),
            "submitting command"
        );

        let pending = self.channel.submit(command);
        let resolved = match timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(resolved) => resolved,
                Err(_) => {
                    warn!(
                        request_id = %request_id,
                        operation = %operation,
                        timeout_ms = limit.as_millis() as u64,
                        "gave up waiting for response, outcome unknown"
                    );
                    return Err(Error::Timeout {
                        operation,
                        request_id: request_id.into_string(),
                    });
                }
            },
            None => pending.await,
        };

        let response = resolved.map_err(|e| {
            warn!(request_id = %request_id, operation = %operation, error = %e, "submission failed");
            Error::from(e)
        })?;

        if response.request_id != request_id {
            warn!(
                request_id = %request_id,
                received = %response.request_id,
                "response correlated to a different command"
            );
            return Err(Error::Connectivity {
                reason: format!(
                    "received response for {} while awaiting {}",
                    response.request_id, request_id
                ),
            });
        }

        debug!(request_id = %request_id, status = %response.status, "command resolved");
        Ok(response)
    }
}
