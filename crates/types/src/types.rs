//! Data model for containers, entries, versions, and the deletion ledger.
//!
//! Identity semantics: an entry is addressed by the `(container, key, scope)`
//! triple, with the scope normalized before any comparison. The remote
//! platform treats a missing or empty scope as the literal scope `"global"`,
//! and so does every type in this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The scope every entry belongs to when none is given.
pub const GLOBAL_SCOPE: &str = "global";

/// Normalizes a scope string: `None` or empty becomes [`GLOBAL_SCOPE`].
///
/// This is the single normalization point for the whole workspace. Every
/// ledger and engine boundary goes through it; call sites must not
/// reimplement the empty-string check.
#[must_use]
pub fn normalize_scope(scope: Option<&str>) -> String {
    match scope {
        Some(s) if !s.trim().is_empty() => s.to_owned(),
        _ => GLOBAL_SCOPE.to_owned(),
    }
}

/// Identity of a single entry: `(container, key, scope)`, scope normalized.
///
/// Two identities refer to the same entry iff all three normalized fields
/// match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryIdentity {
    /// Container (datastore) name.
    pub container: String,
    /// Entry key within the container.
    pub key: String,
    /// Normalized scope; never empty.
    pub scope: String,
}

impl EntryIdentity {
    /// Creates an identity, normalizing the scope.
    #[must_use]
    pub fn new(
        container: impl Into<String>,
        key: impl Into<String>,
        scope: Option<&str>,
    ) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
            scope: normalize_scope(scope),
        }
    }

    /// Creates an identity in the global scope.
    #[must_use]
    pub fn global(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(container, key, None)
    }

    /// Returns the scope to send on the wire: `None` for the global scope.
    ///
    /// The remote API treats an omitted scope parameter as global; sending
    /// the literal `"global"` is equivalent, but the original client omits
    /// it and the gateway follows suit.
    #[must_use]
    pub fn wire_scope(&self) -> Option<&str> {
        if self.scope == GLOBAL_SCOPE {
            None
        } else {
            Some(&self.scope)
        }
    }
}

impl std::fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.container, self.scope, self.key)
    }
}

/// A single row of a reconciled entry listing.
///
/// Transient: rebuilt from the remote listing plus the deletion ledger on
/// every page load. The ledger, not this record, is the source of truth for
/// deletion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Normalized identity.
    pub identity: EntryIdentity,
    /// Whether the latest version of this entry is known to be deleted.
    pub is_deleted: bool,
    /// When the deletion was observed, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl EntryRecord {
    /// A live (non-deleted) record for the given identity.
    #[must_use]
    pub fn live(identity: EntryIdentity) -> Self {
        Self { identity, is_deleted: false, deleted_at: None }
    }

    /// A deleted record observed at the given time.
    #[must_use]
    pub fn deleted(identity: EntryIdentity, deleted_at: DateTime<Utc>) -> Self {
        Self { identity, is_deleted: true, deleted_at: Some(deleted_at) }
    }
}

/// A persisted deletion-ledger record: one identity believed soft-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Normalized identity of the deleted entry.
    pub identity: EntryIdentity,
    /// When the deletion was performed or first discovered locally.
    pub deleted_at: DateTime<Utc>,
}

/// One immutable historical version of an entry, as listed by the remote.
///
/// Ordering is remote-controlled (requested descending = newest first);
/// nothing in this workspace re-sorts version lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Opaque version identifier.
    #[serde(rename = "version")]
    pub version_id: String,
    /// When this version was created.
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    /// Payload size in bytes.
    #[serde(rename = "contentLength", default)]
    pub content_length: u64,
    /// Whether the entry was marked deleted as of this version.
    #[serde(default)]
    pub deleted: bool,
}

/// Sort order for version listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Wire form accepted by the versions endpoint.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

/// Lifecycle state of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerState {
    /// Normal, usable container.
    Active,
    /// Soft-deleted; recoverable until `expire_time`.
    Deleted,
}

/// A container (datastore) as returned by the management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container identifier (its name).
    pub id: String,
    /// Lifecycle state.
    #[serde(default = "ContainerState::active")]
    pub state: ContainerState,
    /// Creation time, if reported.
    #[serde(rename = "createTime", default)]
    pub create_time: Option<DateTime<Utc>>,
    /// Permanent-removal deadline; only meaningful when `state` is
    /// [`ContainerState::Deleted`] (30-day grace period).
    #[serde(rename = "expireTime", default)]
    pub expire_time: Option<DateTime<Utc>>,
}

impl ContainerState {
    fn active() -> Self {
        Self::Active
    }

    /// Whether this state represents a pending deletion.
    #[must_use]
    pub fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Metadata for the current value of an entry, parsed from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Base64 MD5 of the payload (`content-md5`).
    pub content_hash: Option<String>,
    /// Entity tag for the current value.
    pub etag: Option<String>,
    /// `last-modified` header, verbatim.
    pub last_modified: Option<String>,
    /// When the entry was first created.
    pub created_time: Option<DateTime<Utc>>,
    /// When the current version was created.
    pub updated_time: Option<DateTime<Utc>>,
    /// Associated user ids, if the writer attached any.
    pub user_ids: Vec<u64>,
    /// Arbitrary JSON attributes attached by the writer.
    pub attributes: Option<serde_json::Value>,
}

/// Metadata for one historical version, parsed from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Base64 MD5 of the payload.
    pub content_hash: Option<String>,
    /// When the entry was first created.
    pub created_time: Option<DateTime<Utc>>,
    /// When this specific version was created.
    pub version_created_time: Option<DateTime<Utc>>,
    /// Associated user ids.
    pub user_ids: Vec<u64>,
    /// Arbitrary JSON attributes.
    pub attributes: Option<serde_json::Value>,
    /// Whether the entry was marked deleted as of this version.
    pub deleted: bool,
}
