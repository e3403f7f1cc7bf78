//! The [`StoreGateway`] trait and the request/response types of the wire
//! operations.
//!
//! The reconciliation engine consumes the remote platform exclusively through
//! this trait, so tests can substitute a scripted implementation and the
//! HTTP client stays swappable. Each operation has an explicit typed result;
//! pagination cursors are opaque strings passed through unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use storescope_types::{EntryIdentity, EntryMetadata, SortOrder, VersionMetadata, VersionRecord};

use crate::error::Result;

/// One key returned by an entry listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct EntryKey {
    /// Key name.
    pub key: String,
    /// Scope the key was listed under, when the remote reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl EntryKey {
    /// A bare key with no scope annotation.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), scope: None }
    }
}

/// One page of an entry listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPage {
    /// Keys in remote-listing order.
    pub keys: Vec<EntryKey>,
    /// Opaque cursor for the next page, if any.
    pub next_cursor: Option<String>,
}

/// Options for [`StoreGateway::list_entries`].
#[derive(Debug, Clone, Default)]
pub struct ListEntriesOpts {
    /// Scope to list; `None` lists the global scope.
    pub scope: Option<String>,
    /// Opaque cursor from a previous page.
    pub cursor: Option<String>,
    /// Remote-side key prefix filter.
    pub prefix: Option<String>,
}

/// Options for [`StoreGateway::list_versions`].
#[derive(Debug, Clone, Default)]
pub struct ListVersionsOpts {
    /// Opaque cursor from a previous page.
    pub cursor: Option<String>,
    /// Listing order; defaults to newest first.
    pub order: SortOrder,
    /// Maximum number of versions to return; `None` uses the remote default.
    pub limit: Option<u32>,
    /// Only versions created at or after this time.
    pub start_time: Option<DateTime<Utc>>,
    /// Only versions created at or before this time.
    pub end_time: Option<DateTime<Utc>>,
}

impl ListVersionsOpts {
    /// Options for the newest-version deletion probe: descending, limit 1.
    #[must_use]
    pub fn latest_only() -> Self {
        Self { order: SortOrder::Descending, limit: Some(1), ..Self::default() }
    }
}

/// One page of an entry's version history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPage {
    /// Versions in the requested order; never re-sorted locally.
    pub versions: Vec<VersionRecord>,
    /// Opaque cursor for the next page, if any.
    pub next_cursor: Option<String>,
}

/// Current value of an entry plus header-borne metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPayload {
    /// The stored JSON document.
    pub data: Value,
    /// Metadata parsed from response headers.
    pub metadata: EntryMetadata,
}

/// One historical version's value plus metadata (including its deleted flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPayload {
    /// The version's JSON document.
    pub data: Value,
    /// Metadata parsed from response headers.
    pub metadata: VersionMetadata,
}

/// Options for [`StoreGateway::set_entry`].
#[derive(Debug, Clone, Default)]
pub struct SetEntryOpts {
    /// User ids to attach to the new version.
    pub user_ids: Vec<u64>,
    /// JSON attributes to attach to the new version.
    pub attributes: Option<Value>,
}

/// Typed access to the per-entry operations of the remote platform.
///
/// Implemented by [`StoreClient`](crate::StoreClient) over HTTPS and by test
/// fakes. Container management, key validation, and messaging are inherent
/// to the HTTP client only; the engine does not consume them.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Lists one page of keys in a container.
    async fn list_entries(&self, container: &str, opts: ListEntriesOpts) -> Result<KeyPage>;

    /// Fetches the current value of an entry. Fails with a not-found error
    /// when the entry is absent or its latest version is deleted.
    async fn get_entry(&self, identity: &EntryIdentity) -> Result<EntryPayload>;

    /// Writes a value as the entry's new current version and returns the new
    /// version id. The remote has no in-place update; every write creates a
    /// version.
    async fn set_entry(
        &self,
        identity: &EntryIdentity,
        value: &Value,
        opts: SetEntryOpts,
    ) -> Result<String>;

    /// Soft-deletes an entry (marks its latest version deleted).
    async fn delete_entry(&self, identity: &EntryIdentity) -> Result<()>;

    /// Lists one page of an entry's version history.
    async fn list_versions(
        &self,
        identity: &EntryIdentity,
        opts: ListVersionsOpts,
    ) -> Result<VersionPage>;

    /// Fetches one historical version's payload and metadata.
    async fn get_version(
        &self,
        identity: &EntryIdentity,
        version_id: &str,
    ) -> Result<VersionPayload>;
}
