//! Integration tests for [`StoreClient`] against the in-process mock
//! platform: full HTTP round-trips including auth headers, query encoding,
//! status mapping, and header-borne metadata.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use serde_json::json;
use storescope_gateway::mock::{MockCloudServer, MOCK_API_KEY, MOCK_UNIVERSE_ID};
use storescope_gateway::{
    ErrorKind, GatewayConfig, ListContainersOpts, ListEntriesOpts, ListVersionsOpts, SetEntryOpts,
    StoreClient, StoreGateway,
};
use storescope_types::{EntryIdentity, SortOrder};

async fn start() -> (MockCloudServer, StoreClient) {
    let server = MockCloudServer::start().await.unwrap();
    let client = client_with_key(&server, MOCK_API_KEY);
    (server, client)
}

fn client_with_key(server: &MockCloudServer, api_key: &str) -> StoreClient {
    let config = GatewayConfig::builder()
        .base_url(server.endpoint())
        .api_key(api_key)
        .universe_id(MOCK_UNIVERSE_ID)
        .build()
        .unwrap();
    StoreClient::new(config).unwrap()
}

#[tokio::test]
async fn test_validate_key_accepts_good_key() {
    let (_server, client) = start().await;
    client.validate_key().await.unwrap();
}

#[tokio::test]
async fn test_validate_key_classifies_bad_key() {
    let (server, _) = start().await;
    let client = client_with_key(&server, "wrong-key");
    let err = client.validate_key().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn test_wrong_universe_is_authorization_error() {
    let server = MockCloudServer::start().await.unwrap();
    let config = GatewayConfig::builder()
        .base_url(server.endpoint())
        .api_key(MOCK_API_KEY)
        .universe_id("999999")
        .build()
        .unwrap();
    let client = StoreClient::new(config).unwrap();
    let err = client.validate_key().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[tokio::test]
async fn test_list_entries_orders_and_paginates() {
    let (server, client) = start().await;
    for key in ["U_1", "U_2", "U_3"] {
        server.seed_entry("Players", None, key, json!({"coins": 1}));
    }
    server.set_page_size(2);

    let first = client.list_entries("Players", ListEntriesOpts::default()).await.unwrap();
    assert_eq!(first.keys.iter().map(|k| k.key.as_str()).collect::<Vec<_>>(), ["U_1", "U_2"]);
    let cursor = first.next_cursor.clone().expect("more pages");

    let second = client
        .list_entries("Players", ListEntriesOpts { cursor: Some(cursor), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(second.keys.iter().map(|k| k.key.as_str()).collect::<Vec<_>>(), ["U_3"]);
    assert!(second.next_cursor.is_none());
}

#[tokio::test]
async fn test_list_entries_scope_partitioning() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "G_1", json!(1));
    server.seed_entry("Players", Some("season2"), "S_1", json!(2));

    let global = client.list_entries("Players", ListEntriesOpts::default()).await.unwrap();
    assert_eq!(global.keys.len(), 1);
    assert_eq!(global.keys[0].key, "G_1");

    let scoped = client
        .list_entries(
            "Players",
            ListEntriesOpts { scope: Some("season2".into()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(scoped.keys.len(), 1);
    assert_eq!(scoped.keys[0].key, "S_1");
}

#[tokio::test]
async fn test_get_entry_round_trip_with_metadata() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!({"coins": 10, "level": 3}));

    let identity = EntryIdentity::global("Players", "U_100");
    let payload = client.get_entry(&identity).await.unwrap();
    assert_eq!(payload.data, json!({"coins": 10, "level": 3}));
    assert!(payload.metadata.created_time.is_some());
    assert!(payload.metadata.updated_time.is_some());
}

#[tokio::test]
async fn test_get_entry_missing_is_not_found() {
    let (_server, client) = start().await;
    let err = client
        .get_entry(&EntryIdentity::global("Players", "missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Entry not found"));
}

#[tokio::test]
async fn test_get_entry_after_delete_is_not_found() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!(1));
    let identity = EntryIdentity::global("Players", "U_100");

    client.delete_entry(&identity).await.unwrap();
    let err = client.get_entry(&identity).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_set_entry_creates_new_version() {
    let (server, client) = start().await;
    let identity = EntryIdentity::global("Players", "U_100");

    let v1 = client.set_entry(&identity, &json!({"coins": 1}), SetEntryOpts::default()).await.unwrap();
    let v2 = client.set_entry(&identity, &json!({"coins": 2}), SetEntryOpts::default()).await.unwrap();
    assert_ne!(v1, v2);
    assert_eq!(server.current_value("Players", None, "U_100"), Some(json!({"coins": 2})));

    let history = client.list_versions(&identity, ListVersionsOpts::default()).await.unwrap();
    assert_eq!(history.versions.len(), 2);
    // Descending by default: newest first.
    assert_eq!(history.versions[0].version_id, v2);
    assert_eq!(history.versions[1].version_id, v1);
}

#[tokio::test]
async fn test_set_entry_metadata_round_trips_through_headers() {
    let (_server, client) = start().await;
    let identity = EntryIdentity::global("Players", "U_100");
    let opts = SetEntryOpts {
        user_ids: vec![100, 200],
        attributes: Some(json!({"source": "editor"})),
    };
    let version = client.set_entry(&identity, &json!({"coins": 1}), opts).await.unwrap();

    let stored = client.get_version(&identity, &version).await.unwrap();
    assert_eq!(stored.metadata.user_ids, vec![100, 200]);
    assert_eq!(stored.metadata.attributes, Some(json!({"source": "editor"})));
}

#[tokio::test]
async fn test_delete_then_probe_latest_version_deleted() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!({"coins": 10}));
    let identity = EntryIdentity::global("Players", "U_100");

    client.delete_entry(&identity).await.unwrap();

    let probe = client.list_versions(&identity, ListVersionsOpts::latest_only()).await.unwrap();
    assert_eq!(probe.versions.len(), 1);
    assert!(probe.versions[0].deleted);

    let full = client
        .list_versions(
            &identity,
            ListVersionsOpts { order: SortOrder::Ascending, ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(full.versions.len(), 2);
    assert!(!full.versions[0].deleted);
    assert!(full.versions[1].deleted);
}

#[tokio::test]
async fn test_get_version_returns_historical_payload() {
    let (server, client) = start().await;
    let v1 = server.seed_entry("Players", None, "U_100", json!({"coins": 1}));
    let identity = EntryIdentity::global("Players", "U_100");
    client.set_entry(&identity, &json!({"coins": 2}), SetEntryOpts::default()).await.unwrap();

    let old = client.get_version(&identity, &v1).await.unwrap();
    assert_eq!(old.data, json!({"coins": 1}));
    assert!(!old.metadata.deleted);
}

#[tokio::test]
async fn test_get_version_deleted_flag_from_header() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!(1));
    server.seed_deletion("Players", None, "U_100");
    let identity = EntryIdentity::global("Players", "U_100");

    let history = client.list_versions(&identity, ListVersionsOpts::latest_only()).await.unwrap();
    let tombstone = client.get_version(&identity, &history.versions[0].version_id).await.unwrap();
    assert!(tombstone.metadata.deleted);
}

#[tokio::test]
async fn test_list_containers_show_deleted_filter() {
    let (server, client) = start().await;
    server.seed_container("Players");
    server.seed_deleted_container("Legacy");

    let visible = client.list_containers(ListContainersOpts::default()).await.unwrap();
    assert_eq!(visible.containers.len(), 1);
    assert_eq!(visible.containers[0].id, "Players");

    let all = client
        .list_containers(ListContainersOpts { show_deleted: true, ..Default::default() })
        .await
        .unwrap();
    assert_eq!(all.containers.len(), 2);
    let legacy = all.containers.iter().find(|c| c.id == "Legacy").unwrap();
    assert!(legacy.state.is_deleted());
    assert!(legacy.expire_time.is_some());
}

#[tokio::test]
async fn test_container_delete_undelete_cycle() {
    let (server, client) = start().await;
    server.seed_container("Players");

    let deleted = client.delete_container("Players").await.unwrap();
    assert!(deleted.state.is_deleted());
    assert!(deleted.expire_time.is_some());

    let restored = client.undelete_container("Players").await.unwrap();
    assert!(!restored.state.is_deleted());
    assert!(restored.expire_time.is_none());
}

#[tokio::test]
async fn test_snapshot_containers() {
    let (_server, client) = start().await;
    let result = client.snapshot_containers().await.unwrap();
    assert!(result.new_snapshot_taken);
    assert!(result.latest_snapshot_time.is_some());
}

#[tokio::test]
async fn test_publish_message_round_trip() {
    let (server, client) = start().await;
    client.publish_message("ServerEvents", "reload").await.unwrap();
    assert_eq!(server.published(), vec![("ServerEvents".to_owned(), "reload".to_owned())]);
}

#[tokio::test]
async fn test_publish_rejects_oversized_message_locally() {
    let (server, client) = start().await;
    let err = client.publish_message("ServerEvents", &"x".repeat(1025)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    // Never reached the wire.
    assert!(server.published().is_empty());
}

#[tokio::test]
async fn test_publish_rejects_oversized_topic_locally() {
    let (server, client) = start().await;
    let err = client.publish_message(&"t".repeat(81), "hi").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.published().is_empty());
}

#[tokio::test]
async fn test_injected_unavailable_surfaces_as_remote_error() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!(1));
    server.inject_unavailable(1);

    let err = client
        .list_entries("Players", ListEntriesOpts::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);

    // Recovery is immediate; no retry machinery exists in the client.
    let page = client.list_entries("Players", ListEntriesOpts::default()).await.unwrap();
    assert_eq!(page.keys.len(), 1);
}

#[tokio::test]
async fn test_request_counters() {
    let (server, client) = start().await;
    server.seed_entry("Players", None, "U_100", json!(1));
    let identity = EntryIdentity::global("Players", "U_100");

    client.list_entries("Players", ListEntriesOpts::default()).await.unwrap();
    client.list_versions(&identity, ListVersionsOpts::latest_only()).await.unwrap();
    client.list_versions(&identity, ListVersionsOpts::latest_only()).await.unwrap();

    assert_eq!(server.entry_list_count(), 1);
    assert_eq!(server.version_list_count(), 2);
}
