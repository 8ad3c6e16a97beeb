//! Batch Read / Write Tests
//!
//! The n-th outcome always answers the n-th request, and per-item
//! failures never abort sibling items.

use crate::common::*;
use proptest::prelude::*;
use replicadb::{
    Error, ReadOutcome, ReadRequest, Value, VersionedValue, WriteOutcome, WriteRejection,
    WriteRequest,
};

#[tokio::test]
async fn write_then_read_single_key() {
    let client = client_with_table("t1").await;

    let written = client
        .batch_write(vec![WriteRequest::put("t1", "a", 1)])
        .await
        .unwrap();
    assert_eq!(
        written,
        vec![WriteOutcome::Committed {
            version: 1,
            previous: None
        }]
    );

    let read = client
        .batch_read(vec![ReadRequest::new("t1", "a")])
        .await
        .unwrap();
    assert_eq!(read, vec![ReadOutcome::Found(VersionedValue::new(1, 1))]);
}

#[tokio::test]
async fn read_outcomes_follow_request_order() {
    let client = client_with_table("t").await;
    client
        .batch_write(vec![
            WriteRequest::put("t", "k1", 1),
            WriteRequest::put("t", "k2", 2),
            WriteRequest::put("t", "k3", 3),
        ])
        .await
        .unwrap();

    let outcomes = client
        .batch_read(vec![
            ReadRequest::new("t", "k3"),
            ReadRequest::new("t", "missing"),
            ReadRequest::new("t", "k1"),
            ReadRequest::new("other", "k1"),
            ReadRequest::new("t", "k2"),
        ])
        .await
        .unwrap();

    let values: Vec<Option<Value>> = outcomes
        .iter()
        .map(|o| o.value().map(|v| v.value.clone()))
        .collect();
    assert_eq!(
        values,
        vec![Some(Value::Int(3)), None, Some(Value::Int(1)), None, Some(Value::Int(2))]
    );
    assert_eq!(outcomes[1], ReadOutcome::NotFound);
    assert_eq!(outcomes[3], ReadOutcome::NoSuchTable);
}

#[tokio::test]
async fn version_conflict_does_not_abort_siblings() {
    let client = client_with_table("t").await;
    client.put("t", "a", "v1").await.unwrap();

    let outcomes = client
        .batch_write(vec![
            WriteRequest::put("t", "b", "x"),
            WriteRequest::put_if_version("t", "a", "v2", 7),
            WriteRequest::put("t", "c", "y"),
        ])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_applied());
    assert_eq!(
        outcomes[1],
        WriteOutcome::Rejected(WriteRejection::VersionConflict {
            expected: 7,
            actual: Some(1)
        })
    );
    assert!(outcomes[2].is_applied());

    // the rejected item left the key untouched
    assert_eq!(
        client.get("t", "a").await.unwrap(),
        ReadOutcome::Found(VersionedValue::new("v1", 1))
    );
}

#[tokio::test]
async fn malformed_items_do_not_abort_siblings() {
    let client = client_with_table("t").await;
    client.put("t", "a", "v1").await.unwrap();

    let read = client
        .batch_read(vec![
            ReadRequest::new("t", "a"),
            ReadRequest::new("t", "bad\0key"),
            ReadRequest::new("", "a"),
        ])
        .await
        .unwrap();
    assert_eq!(read[0], ReadOutcome::Found(VersionedValue::new("v1", 1)));
    assert!(matches!(read[1], ReadOutcome::Invalid { .. }));
    assert!(matches!(read[2], ReadOutcome::Invalid { .. }));

    let written = client
        .batch_write(vec![
            WriteRequest::put("t", "k".repeat(2000), 1),
            WriteRequest::put("t", "b", 2),
        ])
        .await
        .unwrap();
    assert!(matches!(
        written[0],
        WriteOutcome::Rejected(WriteRejection::Invalid { .. })
    ));
    assert!(written[1].is_applied());
}

#[tokio::test]
async fn items_in_one_batch_apply_in_order() {
    let client = client_with_table("t").await;
    let outcomes = client
        .batch_write(vec![
            WriteRequest::put("t", "k", 1),
            WriteRequest::put_if_version("t", "k", 2, 1),
            WriteRequest::remove_if_value("t", "k", 2),
        ])
        .await
        .unwrap();

    assert_eq!(
        outcomes,
        vec![
            WriteOutcome::Committed {
                version: 1,
                previous: None
            },
            WriteOutcome::Committed {
                version: 2,
                previous: Some(VersionedValue::new(1, 1))
            },
            WriteOutcome::Removed {
                previous: Some(VersionedValue::new(2, 2))
            },
        ]
    );
}

#[tokio::test]
async fn empty_batch_is_invalid_input() {
    let (client, channel) = create_client();
    assert!(matches!(
        client.batch_write(vec![]).await,
        Err(Error::InvalidInput { .. })
    ));
    assert!(channel.submitted().is_empty());
}

#[tokio::test]
async fn one_batch_is_one_submission() {
    let (client, channel) = create_client();
    client.create_table("t").await.unwrap();
    let requests: Vec<_> = (0..50)
        .map(|i| WriteRequest::put("t", format!("k{}", i), i))
        .collect();
    client.batch_write(requests).await.unwrap();
    assert_eq!(channel.submitted().len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn batch_write_returns_n_outcomes_in_order(n in 1usize..100) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let client = client_with_table("t").await;
            // each key is written twice in a row, so the second write of a
            // key must see version 1 as previous
            let requests: Vec<_> = (0..n)
                .map(|i| WriteRequest::put("t", format!("k{}", i / 2), i as i64))
                .collect();
            let outcomes = client.batch_write(requests).await.unwrap();
            prop_assert_eq!(outcomes.len(), n);
            for (i, outcome) in outcomes.iter().enumerate() {
                let expected_version = if i % 2 == 0 { 1 } else { 2 };
                match outcome {
                    WriteOutcome::Committed { version, .. } => {
                        prop_assert_eq!(*version, expected_version)
                    }
                    other => {
                        prop_assert!(false, "item {} not committed: {:?}", i, other)
                    }
                }
            }
            Ok(())
        })?;
    }

    #[test]
    fn batch_read_finds_exactly_the_existing_keys(
        present in prop::collection::vec(any::<bool>(), 1..64)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let client = client_with_table("t").await;
            let writes: Vec<_> = present
                .iter()
                .enumerate()
                .filter(|(_, exists)| **exists)
                .map(|(i, _)| WriteRequest::put("t", format!("k{}", i), i as i64))
                .collect();
            if !writes.is_empty() {
                client.batch_write(writes).await.unwrap();
            }

            let reads: Vec<_> = (0..present.len())
                .map(|i| ReadRequest::new("t", format!("k{}", i)))
                .collect();
            let outcomes = client.batch_read(reads).await.unwrap();

            prop_assert_eq!(outcomes.len(), present.len());
            for (i, (outcome, exists)) in outcomes.iter().zip(&present).enumerate() {
                if *exists {
                    prop_assert_eq!(
                        outcome,
                        &ReadOutcome::Found(VersionedValue::new(i as i64, 1))
                    );
                } else {
                    prop_assert_eq!(outcome, &ReadOutcome::NotFound);
                }
            }
            Ok(())
        })?;
    }
}
