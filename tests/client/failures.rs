//! Failure Classification Tests
//!
//! Protocol-level failures (channel down, no leader, no quorum) must surface
//! as connectivity failures; application-level rejections as operation
//! failures. The two never mix.

use std::sync::Arc;
use std::time::Duration;

use crate::common::*;
use replicadb::testing::UnreachableChannel;
use replicadb::{
    async_trait, ChannelError, Command, DatabaseClient, Error, Payload, ReadRequest, Response,
    Status, SubmissionChannel, WriteRequest,
};

#[tokio::test]
async fn unreachable_channel_fails_every_call_as_connectivity() {
    let client = DatabaseClient::new(Arc::new(UnreachableChannel::default()));

    let results = vec![
        client.create_table("t1").await.map(|_| ()),
        client.drop_table("t1").await,
        client.drop_all_tables().await,
        client.list_tables().await.map(|_| ()),
        client
            .batch_read(vec![ReadRequest::new("t1", "a")])
            .await
            .map(|_| ()),
        client
            .batch_write(vec![WriteRequest::put("t1", "a", 1)])
            .await
            .map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_connectivity(), "expected connectivity, got {:?}", err);
        assert!(!err.is_operation());
    }
}

#[tokio::test]
async fn closed_channel_is_connectivity() {
    let (client, channel) = create_client();
    channel.close();
    assert_eq!(
        client.list_tables().await,
        Err(Error::Connectivity {
            reason: "submission channel closed".into()
        })
    );
}

#[tokio::test]
async fn protocol_statuses_are_connectivity_not_operation() {
    let (client, channel) = create_client();
    for status in [Status::NoLeader, Status::NoQuorum, Status::Timeout] {
        channel.inject_failure(status, "leader lease expired");
        let err = client.create_table("t").await.unwrap_err();
        assert!(err.is_connectivity(), "{} gave {:?}", status, err);
    }
}

#[tokio::test]
async fn rejected_batch_fails_as_a_whole() {
    let client = client_with_table("t").await;

    let (rejecting, channel) = create_client();
    channel.inject_failure(Status::Rejected, "write quota exceeded");
    let err = rejecting
        .batch_write(vec![WriteRequest::put("t", "a", 1), WriteRequest::put("t", "b", 2)])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::Operation {
            operation: replicadb::Operation::Write,
            diagnostic: "write quota exceeded".into()
        }
    );

    // an unrelated store is unaffected
    assert!(client.put("t", "a", 1).await.unwrap().is_applied());
}

/// Answers every command with the same canned response.
struct Canned(Response);

#[async_trait]
impl SubmissionChannel for Canned {
    async fn submit(&self, command: Command) -> Result<Response, ChannelError> {
        Ok(Response {
            request_id: command.id().clone(),
            ..self.0.clone()
        })
    }
}

#[tokio::test]
async fn mismatched_payload_is_unexpected_result() {
    let canned = Response::ok("ignored".into(), Payload::TableNames(vec![]));
    let client = DatabaseClient::new(Arc::new(Canned(canned)));
    assert!(matches!(
        client.create_table("t").await,
        Err(Error::UnexpectedResult { .. })
    ));
}

#[tokio::test]
async fn short_outcome_list_is_never_returned() {
    let canned = Response::ok("ignored".into(), Payload::ReadOutcomes(vec![]));
    let client = DatabaseClient::new(Arc::new(Canned(canned)));
    let err = client
        .batch_read(vec![ReadRequest::new("t", "a")])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedResult { .. }));
}

/// Never resolves.
struct Stalled;

#[async_trait]
impl SubmissionChannel for Stalled {
    async fn submit(&self, _command: Command) -> Result<Response, ChannelError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn caller_timeout_means_unknown_outcome() {
    let client = DatabaseClient::new(Arc::new(Stalled)).with_timeout(Duration::from_millis(25));
    let err = client.list_tables().await.unwrap_err();
    assert!(err.is_outcome_unknown());
    assert!(!err.is_connectivity());
    assert!(!err.is_operation());
}
