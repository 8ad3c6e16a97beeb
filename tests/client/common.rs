//! Common test utilities for client tests

use std::sync::Arc;

use replicadb::testing::InMemoryChannel;
use replicadb::{DatabaseClient, SequentialIdGenerator};

/// Create a client on a fresh in-memory store, returning both.
pub fn create_client() -> (DatabaseClient, Arc<InMemoryChannel>) {
    let channel = Arc::new(InMemoryChannel::new());
    let client = DatabaseClient::builder(channel.clone())
        .id_generator(Arc::new(SequentialIdGenerator::new("it")))
        .build()
        .unwrap();
    (client, channel)
}

/// Create a client with one empty table already in place.
pub async fn client_with_table(table: &str) -> DatabaseClient {
    let (client, _) = create_client();
    assert!(client.create_table(table).await.unwrap());
    client
}
