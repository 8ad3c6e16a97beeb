//! Table Lifecycle Tests

use crate::common::*;
use proptest::prelude::*;
use replicadb::Error;

#[tokio::test]
async fn create_then_list_contains_name_once() {
    let (client, _) = create_client();
    assert!(client.create_table("t1").await.unwrap());
    assert!(!client.create_table("t1").await.unwrap());

    let tables = client.list_tables().await.unwrap();
    assert_eq!(tables.iter().filter(|t| *t == "t1").count(), 1);
}

#[tokio::test]
async fn create_existing_table_is_false_not_error() {
    let (client, _) = create_client();
    assert_eq!(client.create_table("t1").await, Ok(true));
    assert_eq!(client.create_table("t1").await, Ok(false));
}

#[tokio::test]
async fn drop_missing_table_is_operation_failure() {
    let (client, _) = create_client();
    match client.drop_table("ghost").await {
        Err(Error::Operation { diagnostic, .. }) => {
            assert!(diagnostic.contains("ghost"), "got: {}", diagnostic);
        }
        other => panic!("Expected Operation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn drop_existing_table_succeeds_and_removes_it() {
    let client = client_with_table("t1").await;
    client.drop_table("t1").await.unwrap();
    assert!(client.list_tables().await.unwrap().is_empty());

    // re-drop is a typed failure even though nothing bad happened
    assert!(client.drop_table("t1").await.unwrap_err().is_operation());
}

#[tokio::test]
async fn drop_all_then_list_is_empty() {
    let (client, _) = create_client();
    for name in ["a", "b", "c"] {
        client.create_table(name).await.unwrap();
    }
    client.drop_all_tables().await.unwrap();
    assert!(client.list_tables().await.unwrap().is_empty());

    // also fine on an empty store
    client.drop_all_tables().await.unwrap();
}

#[tokio::test]
async fn empty_table_name_is_invalid_input() {
    let (client, channel) = create_client();
    assert!(matches!(
        client.create_table("").await,
        Err(Error::InvalidInput { .. })
    ));
    assert!(channel.submitted().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn created_tables_are_listed_exactly_once(
        names in prop::collection::btree_set("[a-z][a-z0-9_]{0,15}", 1..12)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let (client, _) = create_client();
            for name in &names {
                prop_assert!(client.create_table(name).await.unwrap());
            }
            let listed = client.list_tables().await.unwrap();
            prop_assert_eq!(listed.len(), names.len());
            for name in &names {
                prop_assert_eq!(listed.iter().filter(|t| *t == name).count(), 1);
            }

            client.drop_all_tables().await.unwrap();
            prop_assert!(client.list_tables().await.unwrap().is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn dropping_an_absent_table_is_operation_failure(
        name in "[a-zA-Z0-9_.-]{1,300}"
    ) {
        prop_assume!(name != "present");
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let client = client_with_table("present").await;
            match client.drop_table(&name).await {
                Err(Error::Operation { diagnostic, .. }) => {
                    prop_assert!(diagnostic.contains(&name));
                }
                other => {
                    prop_assert!(false, "expected Operation failure, got {:?}", other);
                }
            }
            prop_assert_eq!(client.list_tables().await.unwrap(), vec!["present".to_string()]);
            Ok(())
        })?;
    }
}
