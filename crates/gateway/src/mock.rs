//! Mock cloud platform for gateway integration testing.
//!
//! An in-process HTTP server implementing the endpoint shapes the real
//! platform exposes, over controllable in-memory state, so [`StoreClient`]
//! can be exercised end to end without network access or credentials.
//!
//! # Features
//!
//! - **Seeded entries and versions**: each write appends an immutable
//!   version; deletes append a version marked deleted, like the real store
//! - **Failure injection**: serve the next N requests as 503, or delay every
//!   request by a fixed duration
//! - **Listing behavior knobs**: optionally hide soft-deleted keys from the
//!   entry listing, mimicking the remote's eventual exclusion of deleted keys
//! - **Request counting**: per-operation counters for verification
//!
//! [`StoreClient`]: crate::StoreClient

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::error::{GatewayError, Result};

/// API key the mock accepts.
pub const MOCK_API_KEY: &str = "mock-api-key";

/// Universe identifier the mock serves.
pub const MOCK_UNIVERSE_ID: &str = "3044";

/// Entry key in mock storage: (container, scope, key).
type StorageKey = (String, String, String);

#[derive(Debug, Clone)]
struct StoredVersion {
    id: String,
    value: Value,
    deleted: bool,
    created: DateTime<Utc>,
    user_ids: Vec<u64>,
    attributes: Option<Value>,
}

#[derive(Debug, Clone)]
struct StoredContainer {
    deleted: bool,
    create_time: DateTime<Utc>,
    expire_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Versions per entry, oldest first.
    entries: RwLock<BTreeMap<StorageKey, Vec<StoredVersion>>>,
    containers: RwLock<BTreeMap<String, StoredContainer>>,
    published: RwLock<Vec<(String, String)>>,

    /// Number of 503 responses to serve before resuming normal operation.
    unavailable_count: AtomicUsize,
    /// Artificial delay applied to every request (milliseconds).
    delay_ms: AtomicU64,
    /// When set, soft-deleted keys disappear from the entry listing.
    listing_excludes_deleted: AtomicBool,
    /// Page size for entry listings; 0 honors the client's `limit`.
    page_size: AtomicUsize,

    version_counter: AtomicU64,
    entry_list_count: AtomicUsize,
    version_list_count: AtomicUsize,
    set_count: AtomicUsize,
    delete_count: AtomicUsize,
}

impl MockState {
    fn next_version_id(&self) -> String {
        let n = self.version_counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{n:010}")
    }

    fn latest<'v>(versions: &'v [StoredVersion]) -> Option<&'v StoredVersion> {
        versions.last()
    }
}

fn storage_key(container: &str, scope: Option<&str>, key: &str) -> StorageKey {
    (
        container.to_owned(),
        storescope_types::normalize_scope(scope),
        key.to_owned(),
    )
}

/// In-process mock of the remote cloud platform.
///
/// # Example
///
/// ```no_run
/// use storescope_gateway::mock::{MockCloudServer, MOCK_API_KEY, MOCK_UNIVERSE_ID};
/// use storescope_gateway::{GatewayConfig, StoreClient};
///
/// # async fn example() -> storescope_gateway::Result<()> {
/// let server = MockCloudServer::start().await?;
/// server.seed_entry("Players", None, "U_100", serde_json::json!({"coins": 10}));
///
/// let config = GatewayConfig::builder()
///     .base_url(server.endpoint())
///     .api_key(MOCK_API_KEY)
///     .universe_id(MOCK_UNIVERSE_ID)
///     .build()?;
/// let client = StoreClient::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct MockCloudServer {
    state: Arc<MockState>,
    endpoint: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCloudServer {
    /// Starts the mock on an ephemeral localhost port.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the listener cannot be bound.
    pub async fn start() -> Result<Self> {
        let state = Arc::new(MockState::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| GatewayError::Config { message: format!("failed to bind: {e}") })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Config { message: format!("failed to get addr: {e}") })?;
        let endpoint = format!("http://{local_addr}");

        let router = Router::new()
            .route("/datastores/v1/universes/:universe/standard-datastores", get(list_v1))
            .route(
                "/datastores/v1/universes/:universe/standard-datastores/datastore/entries",
                get(list_entries),
            )
            .route(
                "/datastores/v1/universes/:universe/standard-datastores/datastore/entries/entry",
                get(get_entry).post(set_entry).delete(delete_entry),
            )
            .route(
                "/datastores/v1/universes/:universe/standard-datastores/datastore/entries/entry/versions",
                get(list_versions),
            )
            .route(
                "/datastores/v1/universes/:universe/standard-datastores/datastore/entries/entry/versions/version",
                get(get_version),
            )
            .route("/cloud/v2/universes/:universe/data-stores", get(list_v2))
            .route("/cloud/v2/universes/:universe/data-stores/:target", delete(delete_container).post(undelete_container))
            .route("/cloud/v2/universes/:universe/:action", post(snapshot_containers))
            .route("/messaging-service/v1/universes/:universe/topics/:topic", post(publish))
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!("mock server error: {e}");
            }
        });

        Ok(Self { state, endpoint, shutdown_tx: Some(shutdown_tx) })
    }

    /// Base URL for pointing a [`StoreClient`](crate::StoreClient) at this mock.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Seeds an entry with one live version and returns the version id.
    pub fn seed_entry(
        &self,
        container: &str,
        scope: Option<&str>,
        key: &str,
        value: Value,
    ) -> String {
        let id = self.state.next_version_id();
        let version = StoredVersion {
            id: id.clone(),
            value,
            deleted: false,
            created: Utc::now(),
            user_ids: Vec::new(),
            attributes: None,
        };
        self.state
            .entries
            .write()
            .entry(storage_key(container, scope, key))
            .or_default()
            .push(version);
        id
    }

    /// Marks an entry deleted by appending a deleted version, as the real
    /// store does on delete.
    pub fn seed_deletion(&self, container: &str, scope: Option<&str>, key: &str) {
        let id = self.state.next_version_id();
        let mut entries = self.state.entries.write();
        let versions = entries.entry(storage_key(container, scope, key)).or_default();
        let value = MockState::latest(versions).map(|v| v.value.clone()).unwrap_or(Value::Null);
        versions.push(StoredVersion {
            id,
            value,
            deleted: true,
            created: Utc::now(),
            user_ids: Vec::new(),
            attributes: None,
        });
    }

    /// Registers a container for the v2 management listing.
    pub fn seed_container(&self, id: &str) {
        self.state.containers.write().insert(
            id.to_owned(),
            StoredContainer { deleted: false, create_time: Utc::now(), expire_time: None },
        );
    }

    /// Registers a soft-deleted container with a 30-day expiry.
    pub fn seed_deleted_container(&self, id: &str) {
        self.state.containers.write().insert(
            id.to_owned(),
            StoredContainer {
                deleted: true,
                create_time: Utc::now(),
                expire_time: Some(Utc::now() + chrono::Duration::days(30)),
            },
        );
    }

    /// Serves the next `count` requests as HTTP 503.
    pub fn inject_unavailable(&self, count: usize) {
        self.state.unavailable_count.store(count, Ordering::SeqCst);
    }

    /// Delays every request by `millis` milliseconds.
    pub fn inject_delay(&self, millis: u64) {
        self.state.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// When enabled, soft-deleted keys are omitted from the entry listing,
    /// like the remote eventually does after a delete propagates.
    pub fn set_listing_excludes_deleted(&self, exclude: bool) {
        self.state.listing_excludes_deleted.store(exclude, Ordering::SeqCst);
    }

    /// Caps entry-listing pages at `size` keys (0 honors the client limit).
    pub fn set_page_size(&self, size: usize) {
        self.state.page_size.store(size, Ordering::SeqCst);
    }

    /// Number of entry-listing requests served.
    #[must_use]
    pub fn entry_list_count(&self) -> usize {
        self.state.entry_list_count.load(Ordering::SeqCst)
    }

    /// Number of version-listing requests served.
    #[must_use]
    pub fn version_list_count(&self) -> usize {
        self.state.version_list_count.load(Ordering::SeqCst)
    }

    /// Number of set-entry requests served.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.state.set_count.load(Ordering::SeqCst)
    }

    /// Number of delete-entry requests served.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.state.delete_count.load(Ordering::SeqCst)
    }

    /// Messages published so far, as (topic, message) pairs.
    #[must_use]
    pub fn published(&self) -> Vec<(String, String)> {
        self.state.published.read().clone()
    }

    /// Latest stored value for an entry, if any.
    #[must_use]
    pub fn current_value(&self, container: &str, scope: Option<&str>, key: &str) -> Option<Value> {
        self.state
            .entries
            .read()
            .get(&storage_key(container, scope, key))
            .and_then(|versions| MockState::latest(versions))
            .map(|v| v.value.clone())
    }

    /// Shuts the server down.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCloudServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Auth + failure-injection gate shared by every handler.
async fn gate(state: &MockState, universe: &str, headers: &HeaderMap) -> std::result::Result<(), Response> {
    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if state
        .unavailable_count
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
    {
        return Err(error_body(StatusCode::SERVICE_UNAVAILABLE, "service unavailable"));
    }
    match headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        Some(MOCK_API_KEY) => {}
        _ => return Err(error_body(StatusCode::UNAUTHORIZED, "Invalid API key")),
    }
    if universe != MOCK_UNIVERSE_ID {
        return Err(error_body(
            StatusCode::FORBIDDEN,
            "API key does not have permission for this universe",
        ));
    }
    Ok(())
}

type Params = Query<BTreeMap<String, String>>;

async fn list_v1(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let names: Vec<Value> = state
        .containers
        .read()
        .iter()
        .filter(|(_, c)| !c.deleted)
        .map(|(name, c)| json!({ "name": name, "createdTime": c.create_time.to_rfc3339() }))
        .collect();
    Json(json!({ "datastores": names, "nextPageCursor": null })).into_response()
}

async fn list_v2(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let show_deleted = params.get("showDeleted").map(String::as_str) == Some("true");
    let stores: Vec<Value> = state
        .containers
        .read()
        .iter()
        .filter(|(_, c)| show_deleted || !c.deleted)
        .map(|(name, c)| container_json(name, c))
        .collect();
    Json(json!({ "dataStores": stores, "nextPageToken": null })).into_response()
}

fn container_json(name: &str, c: &StoredContainer) -> Value {
    json!({
        "id": name,
        "state": if c.deleted { "DELETED" } else { "ACTIVE" },
        "createTime": c.create_time.to_rfc3339(),
        "expireTime": c.expire_time.map(|t| t.to_rfc3339()),
    })
}

async fn delete_container(
    State(state): State<Arc<MockState>>,
    Path((universe, target)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let mut containers = state.containers.write();
    match containers.get_mut(&target) {
        Some(c) => {
            c.deleted = true;
            c.expire_time = Some(Utc::now() + chrono::Duration::days(30));
            Json(container_json(&target, c)).into_response()
        }
        None => error_body(StatusCode::NOT_FOUND, "datastore not found"),
    }
}

async fn undelete_container(
    State(state): State<Arc<MockState>>,
    Path((universe, target)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let Some(id) = target.strip_suffix(":undelete") else {
        return error_body(StatusCode::NOT_FOUND, "unknown action");
    };
    let mut containers = state.containers.write();
    match containers.get_mut(id) {
        Some(c) => {
            c.deleted = false;
            c.expire_time = None;
            Json(container_json(id, c)).into_response()
        }
        None => error_body(StatusCode::NOT_FOUND, "datastore not found"),
    }
}

async fn snapshot_containers(
    State(state): State<Arc<MockState>>,
    Path((universe, action)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    if action != "data-stores:snapshot" {
        return error_body(StatusCode::NOT_FOUND, "unknown action");
    }
    Json(json!({
        "newSnapshotTaken": true,
        "latestSnapshotTime": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

async fn list_entries(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    state.entry_list_count.fetch_add(1, Ordering::SeqCst);
    let Some(container) = params.get("datastoreName") else {
        return error_body(StatusCode::BAD_REQUEST, "datastoreName is required");
    };
    let scope = storescope_types::normalize_scope(params.get("scope").map(String::as_str));
    let prefix = params.get("prefix").cloned().unwrap_or_default();
    let exclude_deleted = state.listing_excludes_deleted.load(Ordering::SeqCst);

    let all: Vec<String> = state
        .entries
        .read()
        .iter()
        .filter(|((c, s, k), versions)| {
            c == container
                && *s == scope
                && k.starts_with(&prefix)
                && !(exclude_deleted && MockState::latest(versions).is_some_and(|v| v.deleted))
        })
        .map(|((_, _, k), _)| k.clone())
        .collect();

    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50);
    let page_size = match state.page_size.load(Ordering::SeqCst) {
        0 => limit,
        n => n.min(limit),
    };
    let offset: usize = params.get("cursor").and_then(|c| c.parse().ok()).unwrap_or(0);
    let page: Vec<Value> = all
        .iter()
        .skip(offset)
        .take(page_size)
        .map(|k| json!({ "key": k }))
        .collect();
    let next_cursor = if offset + page.len() < all.len() {
        Some((offset + page.len()).to_string())
    } else {
        None
    };
    Json(json!({ "keys": page, "nextPageCursor": next_cursor })).into_response()
}

/// Pulls the entry addressed by the common query parameters, or a 404.
fn lookup<'e>(
    entries: &'e BTreeMap<StorageKey, Vec<StoredVersion>>,
    params: &BTreeMap<String, String>,
) -> std::result::Result<(&'e StorageKey, &'e Vec<StoredVersion>), Response> {
    let (Some(container), Some(key)) = (params.get("datastoreName"), params.get("entryKey")) else {
        return Err(error_body(StatusCode::BAD_REQUEST, "datastoreName and entryKey are required"));
    };
    let storage = storage_key(container, params.get("scope").map(String::as_str), key);
    entries
        .get_key_value(&storage)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Entry not found"))
}

fn version_headers(first: &StoredVersion, version: &StoredVersion) -> [(String, String); 3] {
    [
        ("roblox-entry-created-time".to_owned(), first.created.to_rfc3339()),
        ("roblox-entry-version-created-time".to_owned(), version.created.to_rfc3339()),
        ("roblox-entry-deleted".to_owned(), version.deleted.to_string()),
    ]
}

async fn get_entry(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let entries = state.entries.read();
    let (_, versions) = match lookup(&entries, &params) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let (Some(first), Some(latest)) = (versions.first(), MockState::latest(versions)) else {
        return error_body(StatusCode::NOT_FOUND, "Entry not found");
    };
    if latest.deleted {
        return error_body(StatusCode::NOT_FOUND, "Entry not found");
    }
    let mut response_headers = HeaderMap::new();
    for (name, value) in version_headers(first, latest) {
        if let (Ok(n), Ok(v)) = (name.parse::<axum::http::HeaderName>(), value.parse()) {
            response_headers.insert(n, v);
        }
    }
    (response_headers, Json(latest.value.clone())).into_response()
}

async fn set_entry(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
    Json(value): Json<Value>,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    state.set_count.fetch_add(1, Ordering::SeqCst);
    let (Some(container), Some(key)) = (params.get("datastoreName"), params.get("entryKey")) else {
        return error_body(StatusCode::BAD_REQUEST, "datastoreName and entryKey are required");
    };
    let user_ids = headers
        .get("roblox-entry-userids")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    let attributes = headers
        .get("roblox-entry-attributes")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| serde_json::from_str(raw).ok());
    let id = state.next_version_id();
    state
        .entries
        .write()
        .entry(storage_key(container, params.get("scope").map(String::as_str), key))
        .or_default()
        .push(StoredVersion {
            id: id.clone(),
            value,
            deleted: false,
            created: Utc::now(),
            user_ids,
            attributes,
        });
    Json(json!({ "version": id, "createdTime": Utc::now().to_rfc3339() })).into_response()
}

async fn delete_entry(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    state.delete_count.fetch_add(1, Ordering::SeqCst);
    let mut entries = state.entries.write();
    let (Some(container), Some(key)) = (params.get("datastoreName"), params.get("entryKey")) else {
        return error_body(StatusCode::BAD_REQUEST, "datastoreName and entryKey are required");
    };
    let storage = storage_key(container, params.get("scope").map(String::as_str), key);
    let id = state.next_version_id();
    match entries.get_mut(&storage) {
        Some(versions) if MockState::latest(versions).is_some_and(|v| !v.deleted) => {
            let value = MockState::latest(versions).map(|v| v.value.clone()).unwrap_or(Value::Null);
            versions.push(StoredVersion {
                id,
                value,
                deleted: true,
                created: Utc::now(),
                user_ids: Vec::new(),
                attributes: None,
            });
            StatusCode::NO_CONTENT.into_response()
        }
        _ => error_body(StatusCode::NOT_FOUND, "Entry not found"),
    }
}

async fn list_versions(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    state.version_list_count.fetch_add(1, Ordering::SeqCst);
    let entries = state.entries.read();
    let (_, versions) = match lookup(&entries, &params) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let descending = params.get("sortOrder").map(String::as_str) != Some("Ascending");
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50);

    let mut ordered: Vec<&StoredVersion> = versions.iter().collect();
    if descending {
        ordered.reverse();
    }
    let page: Vec<Value> = ordered
        .into_iter()
        .take(limit)
        .map(|v| {
            json!({
                "version": v.id,
                "deleted": v.deleted,
                "contentLength": v.value.to_string().len(),
                "createdTime": v.created.to_rfc3339(),
                "objectCreatedTime": versions.first().map(|f| f.created.to_rfc3339()),
            })
        })
        .collect();
    Json(json!({ "versions": page, "nextPageCursor": null })).into_response()
}

async fn get_version(
    State(state): State<Arc<MockState>>,
    Path(universe): Path<String>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let entries = state.entries.read();
    let (_, versions) = match lookup(&entries, &params) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let Some(version_id) = params.get("versionId") else {
        return error_body(StatusCode::BAD_REQUEST, "versionId is required");
    };
    let (Some(first), Some(version)) =
        (versions.first(), versions.iter().find(|v| &v.id == version_id))
    else {
        return error_body(StatusCode::NOT_FOUND, "version not found");
    };
    let mut response_headers = HeaderMap::new();
    for (name, value) in version_headers(first, version) {
        if let (Ok(n), Ok(v)) = (name.parse::<axum::http::HeaderName>(), value.parse()) {
            response_headers.insert(n, v);
        }
    }
    if !version.user_ids.is_empty() {
        if let (Ok(n), Ok(v)) = (
            "roblox-entry-userids".parse::<axum::http::HeaderName>(),
            serde_json::to_string(&version.user_ids).unwrap_or_default().parse(),
        ) {
            response_headers.insert(n, v);
        }
    }
    if let Some(attributes) = &version.attributes {
        if let (Ok(n), Ok(v)) = (
            "roblox-entry-attributes".parse::<axum::http::HeaderName>(),
            attributes.to_string().parse(),
        ) {
            response_headers.insert(n, v);
        }
    }
    (response_headers, Json(version.value.clone())).into_response()
}

async fn publish(
    State(state): State<Arc<MockState>>,
    Path((universe, topic)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = gate(&state, &universe, &headers).await {
        return resp;
    }
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    state.published.write().push((topic, message));
    StatusCode::OK.into_response()
}
