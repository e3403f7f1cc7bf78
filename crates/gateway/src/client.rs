//! HTTPS client for the remote datastore and messaging platform.
//!
//! One method per remote endpoint, authenticated with the `x-api-key`
//! header. Entry operations live behind the [`StoreGateway`] trait; container
//! management, key validation, and messaging are inherent methods. No retry
//! or backoff: a failed call surfaces immediately as a [`GatewayError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use snafu::ResultExt;
use storescope_types::{
    validate_message, validate_topic, ContainerRecord, EntryIdentity, EntryMetadata,
    VersionMetadata, VersionRecord,
};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, HttpSnafu, Result};
use crate::gateway::{
    EntryKey, EntryPayload, KeyPage, ListEntriesOpts, ListVersionsOpts, SetEntryOpts,
    StoreGateway, VersionPage, VersionPayload,
};

/// Options for [`StoreClient::list_containers`].
#[derive(Debug, Clone, Default)]
pub struct ListContainersOpts {
    /// Include soft-deleted containers in the listing.
    pub show_deleted: bool,
    /// Opaque token from a previous page.
    pub page_token: Option<String>,
}

/// One page of a container listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerPage {
    /// Containers in remote-listing order.
    pub containers: Vec<ContainerRecord>,
    /// Opaque token for the next page, if any.
    pub next_page_token: Option<String>,
}

/// Result of a snapshot request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotResult {
    /// Whether a new snapshot was actually taken.
    #[serde(rename = "newSnapshotTaken")]
    pub new_snapshot_taken: bool,
    /// Time of the most recent snapshot.
    #[serde(rename = "latestSnapshotTime", default)]
    pub latest_snapshot_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct KeyPageWire {
    #[serde(default)]
    keys: Vec<EntryKey>,
    #[serde(rename = "nextPageCursor", default)]
    next_page_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VersionPageWire {
    #[serde(default)]
    versions: Vec<VersionRecord>,
    #[serde(rename = "nextPageCursor", default)]
    next_page_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContainerPageWire {
    #[serde(rename = "dataStores", default)]
    data_stores: Vec<ContainerRecord>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SetEntryWire {
    version: String,
}

/// HTTPS implementation of the remote store gateway.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl StoreClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| GatewayError::Config { message: format!("http client: {e}") })?;
        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    fn v1_path(&self, suffix: &str) -> String {
        self.url(&format!(
            "/datastores/v1/universes/{}/standard-datastores{suffix}",
            self.config.universe_id
        ))
    }

    fn v2_path(&self, suffix: &str) -> String {
        self.url(&format!(
            "/cloud/v2/universes/{}/data-stores{suffix}",
            self.config.universe_id
        ))
    }

    /// Turns a non-success response into the matching [`GatewayError`],
    /// preferring the remote's own `message` field when the body carries one.
    async fn check(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| default_status_message(status, body)),
            Err(_) => default_status_message(status, String::new()),
        };
        Err(GatewayError::from_status(status.as_u16(), message))
    }

    /// Verifies the API key against the target universe by listing one
    /// container.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Authentication`] for a rejected key,
    /// [`GatewayError::Authorization`] when the key has no access to the
    /// universe, and [`GatewayError::NotFound`] for an unknown universe.
    pub async fn validate_key(&self) -> Result<()> {
        let response = self
            .http
            .get(self.v1_path(""))
            .header("x-api-key", &self.config.api_key)
            .query(&[("limit", "1")])
            .send()
            .await
            .context(HttpSnafu)?;
        self.check(response).await?;
        Ok(())
    }

    /// Lists one page of containers, optionally including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on any remote or transport failure.
    pub async fn list_containers(&self, opts: ListContainersOpts) -> Result<ContainerPage> {
        let mut query: Vec<(&str, String)> = vec![("maxPageSize", "100".to_owned())];
        if opts.show_deleted {
            query.push(("showDeleted", "true".to_owned()));
        }
        if let Some(token) = opts.page_token {
            query.push(("pageToken", token));
        }
        let response = self
            .http
            .get(self.v2_path(""))
            .header("x-api-key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .context(HttpSnafu)?;
        let wire: ContainerPageWire = decode(self.check(response).await?, "list-containers").await?;
        Ok(ContainerPage {
            containers: wire.data_stores,
            next_page_token: none_if_empty(wire.next_page_token),
        })
    }

    /// Soft-deletes a container; it remains recoverable for the remote's
    /// grace period.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on any remote or transport failure.
    pub async fn delete_container(&self, container_id: &str) -> Result<ContainerRecord> {
        debug!(container = container_id, "deleting container");
        let response = self
            .http
            .delete(self.v2_path(&format!("/{}", encode_segment(container_id))))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .context(HttpSnafu)?;
        decode(self.check(response).await?, "delete-container").await
    }

    /// Restores a container from pending deletion.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on any remote or transport failure.
    pub async fn undelete_container(&self, container_id: &str) -> Result<ContainerRecord> {
        debug!(container = container_id, "undeleting container");
        let response = self
            .http
            .post(self.v2_path(&format!("/{}:undelete", encode_segment(container_id))))
            .header("x-api-key", &self.config.api_key)
            .json(&Value::Object(Default::default()))
            .send()
            .await
            .context(HttpSnafu)?;
        decode(self.check(response).await?, "undelete-container").await
    }

    /// Requests a datastore snapshot for the universe.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on any remote or transport failure.
    pub async fn snapshot_containers(&self) -> Result<SnapshotResult> {
        let response = self
            .http
            .post(self.url(&format!(
                "/cloud/v2/universes/{}/data-stores:snapshot",
                self.config.universe_id
            )))
            .header("x-api-key", &self.config.api_key)
            .json(&Value::Object(Default::default()))
            .send()
            .await
            .context(HttpSnafu)?;
        decode(self.check(response).await?, "snapshot").await
    }

    /// Publishes a message to a pub/sub topic.
    ///
    /// Topic and message limits are enforced locally; an oversized payload
    /// never reaches the wire.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an empty/oversized topic or
    /// message, otherwise a [`GatewayError`] on remote or transport failure.
    pub async fn publish_message(&self, topic: &str, message: &str) -> Result<()> {
        validate_topic(topic)?;
        validate_message(message)?;
        let response = self
            .http
            .post(self.url(&format!(
                "/messaging-service/v1/universes/{}/topics/{}",
                self.config.universe_id,
                encode_segment(topic)
            )))
            .header("x-api-key", &self.config.api_key)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .context(HttpSnafu)?;
        self.check(response).await?;
        Ok(())
    }

    fn entry_query(identity: &EntryIdentity) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("datastoreName", identity.container.clone()),
            ("entryKey", identity.key.clone()),
        ];
        if let Some(scope) = identity.wire_scope() {
            query.push(("scope", scope.to_owned()));
        }
        query
    }
}

#[async_trait]
impl StoreGateway for StoreClient {
    async fn list_entries(&self, container: &str, opts: ListEntriesOpts) -> Result<KeyPage> {
        let mut query: Vec<(&str, String)> =
            vec![("datastoreName", container.to_owned()), ("limit", "50".to_owned())];
        if let Some(scope) = opts.scope {
            query.push(("scope", scope));
        }
        if let Some(cursor) = opts.cursor {
            query.push(("cursor", cursor));
        }
        if let Some(prefix) = opts.prefix {
            query.push(("prefix", prefix));
        }
        let response = self
            .http
            .get(self.v1_path("/datastore/entries"))
            .header("x-api-key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .context(HttpSnafu)?;
        let wire: KeyPageWire = decode(self.check(response).await?, "list-entries").await?;
        Ok(KeyPage { keys: wire.keys, next_cursor: none_if_empty(wire.next_page_cursor) })
    }

    async fn get_entry(&self, identity: &EntryIdentity) -> Result<EntryPayload> {
        let response = self
            .http
            .get(self.v1_path("/datastore/entries/entry"))
            .header("x-api-key", &self.config.api_key)
            .query(&Self::entry_query(identity))
            .send()
            .await
            .context(HttpSnafu)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound { message: "Entry not found".to_owned() });
        }
        let response = self.check(response).await?;
        let metadata = parse_entry_metadata(response.headers());
        let data: Value = response.json().await.context(HttpSnafu)?;
        Ok(EntryPayload { data, metadata })
    }

    async fn set_entry(
        &self,
        identity: &EntryIdentity,
        value: &Value,
        opts: SetEntryOpts,
    ) -> Result<String> {
        debug!(entry = %identity, "setting entry");
        let mut request = self
            .http
            .post(self.v1_path("/datastore/entries/entry"))
            .header("x-api-key", &self.config.api_key)
            .query(&Self::entry_query(identity))
            .json(value);
        if !opts.user_ids.is_empty() {
            request = request.header(
                "roblox-entry-userids",
                serde_json::to_string(&opts.user_ids).unwrap_or_default(),
            );
        }
        if let Some(attributes) = &opts.attributes {
            request = request.header("roblox-entry-attributes", attributes.to_string());
        }
        let response = request.send().await.context(HttpSnafu)?;
        let wire: SetEntryWire = decode(self.check(response).await?, "set-entry").await?;
        Ok(wire.version)
    }

    async fn delete_entry(&self, identity: &EntryIdentity) -> Result<()> {
        debug!(entry = %identity, "deleting entry");
        let response = self
            .http
            .delete(self.v1_path("/datastore/entries/entry"))
            .header("x-api-key", &self.config.api_key)
            .query(&Self::entry_query(identity))
            .send()
            .await
            .context(HttpSnafu)?;
        self.check(response).await?;
        Ok(())
    }

    async fn list_versions(
        &self,
        identity: &EntryIdentity,
        opts: ListVersionsOpts,
    ) -> Result<VersionPage> {
        let mut query = Self::entry_query(identity);
        query.push(("limit", opts.limit.unwrap_or(50).to_string()));
        query.push(("sortOrder", opts.order.as_wire().to_owned()));
        if let Some(cursor) = opts.cursor {
            query.push(("cursor", cursor));
        }
        if let Some(start) = opts.start_time {
            query.push(("startTime", start.to_rfc3339()));
        }
        if let Some(end) = opts.end_time {
            query.push(("endTime", end.to_rfc3339()));
        }
        let response = self
            .http
            .get(self.v1_path("/datastore/entries/entry/versions"))
            .header("x-api-key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .context(HttpSnafu)?;
        let wire: VersionPageWire = decode(self.check(response).await?, "list-versions").await?;
        Ok(VersionPage { versions: wire.versions, next_cursor: none_if_empty(wire.next_page_cursor) })
    }

    async fn get_version(
        &self,
        identity: &EntryIdentity,
        version_id: &str,
    ) -> Result<VersionPayload> {
        let mut query = Self::entry_query(identity);
        query.push(("versionId", version_id.to_owned()));
        let response = self
            .http
            .get(self.v1_path("/datastore/entries/entry/versions/version"))
            .header("x-api-key", &self.config.api_key)
            .query(&query)
            .send()
            .await
            .context(HttpSnafu)?;
        let response = self.check(response).await?;
        let metadata = parse_version_metadata(response.headers());
        let data: Value = response.json().await.context(HttpSnafu)?;
        Ok(VersionPayload { data, metadata })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response, what: &'static str) -> Result<T> {
    let body = response.text().await.context(HttpSnafu)?;
    serde_json::from_str(&body)
        .map_err(|e| GatewayError::Decode { what, message: e.to_string() })
}

fn default_status_message(status: StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    } else {
        body
    }
}

fn none_if_empty(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.is_empty())
}

fn encode_segment(raw: &str) -> String {
    // Only the separator needs escaping in a path segment here; container
    // ids and topic names are otherwise plain strings.
    raw.replace('%', "%25").replace('/', "%2F").replace('?', "%3F").replace('#', "%23")
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_time(headers: &HeaderMap, name: &str) -> Option<DateTime<Utc>> {
    header_str(headers, name)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn header_user_ids(headers: &HeaderMap) -> Vec<u64> {
    header_str(headers, "roblox-entry-userids")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}

fn header_attributes(headers: &HeaderMap) -> Option<Value> {
    header_str(headers, "roblox-entry-attributes").and_then(|raw| serde_json::from_str(raw).ok())
}

fn parse_entry_metadata(headers: &HeaderMap) -> EntryMetadata {
    EntryMetadata {
        content_hash: header_str(headers, "content-md5").map(str::to_owned),
        etag: header_str(headers, "etag").map(str::to_owned),
        last_modified: header_str(headers, "last-modified").map(str::to_owned),
        created_time: header_time(headers, "roblox-entry-created-time"),
        updated_time: header_time(headers, "roblox-entry-version-created-time"),
        user_ids: header_user_ids(headers),
        attributes: header_attributes(headers),
    }
}

fn parse_version_metadata(headers: &HeaderMap) -> VersionMetadata {
    VersionMetadata {
        content_hash: header_str(headers, "content-md5").map(str::to_owned),
        created_time: header_time(headers, "roblox-entry-created-time"),
        version_created_time: header_time(headers, "roblox-entry-version-created-time"),
        user_ids: header_user_ids(headers),
        attributes: header_attributes(headers),
        deleted: header_str(headers, "roblox-entry-deleted") == Some("true"),
    }
}
