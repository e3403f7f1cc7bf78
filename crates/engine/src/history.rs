//! Version history: listing, previewing, and restoring entry versions.
//!
//! The remote platform has no revert primitive; a restore reads the old
//! version's payload and writes it back as a brand-new current version. A
//! successful restore evicts the identity from the deletion ledger — a
//! restored entry is live no matter how its deletion was observed.

use std::sync::Arc;

use serde_json::Value;
use snafu::ResultExt;
use storescope_gateway::{ListVersionsOpts, SetEntryOpts, StoreGateway, VersionPage, VersionPayload};
use storescope_types::{EntryIdentity, SortOrder};
use tracing::info;

use crate::error::{GatewaySnafu, LedgerSnafu, Result};
use crate::ledger::SharedLedger;

/// Lists, previews, and restores historical versions of single entries.
pub struct VersionHistory {
    gateway: Arc<dyn StoreGateway>,
    ledger: Arc<SharedLedger>,
}

impl VersionHistory {
    /// Creates a controller over a gateway and a shared ledger.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>, ledger: Arc<SharedLedger>) -> Self {
        Self { gateway, ledger }
    }

    /// Lists one page of an entry's version history. Thin pass-through; the
    /// remote controls ordering and this layer keeps it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub async fn list_versions(
        &self,
        identity: &EntryIdentity,
        order: SortOrder,
        cursor: Option<String>,
    ) -> Result<VersionPage> {
        self.gateway
            .list_versions(identity, ListVersionsOpts { order, cursor, ..Default::default() })
            .await
            .context(GatewaySnafu)
    }

    /// Fetches one version's payload and metadata. Mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub async fn preview_version(
        &self,
        identity: &EntryIdentity,
        version_id: &str,
    ) -> Result<VersionPayload> {
        self.gateway.get_version(identity, version_id).await.context(GatewaySnafu)
    }

    /// Restores an entry to a historical version and returns the id of the
    /// new current version.
    ///
    /// A payload the caller already holds (from a preview) is reused to
    /// avoid a duplicate remote read; otherwise the version is fetched.
    /// On success the identity is evicted from the deletion ledger and the
    /// ledger is persisted immediately. On failure at any step the ledger is
    /// untouched; every step is idempotent, so retrying is safe.
    ///
    /// # Errors
    ///
    /// Returns the gateway error from the fetch or write step, or
    /// [`EngineError::Ledger`](crate::EngineError::Ledger) if persisting the
    /// eviction fails.
    pub async fn restore_version(
        &self,
        identity: &EntryIdentity,
        version_id: &str,
        payload: Option<Value>,
    ) -> Result<String> {
        let data = match payload {
            Some(data) => data,
            None => {
                self.gateway
                    .get_version(identity, version_id)
                    .await
                    .context(GatewaySnafu)?
                    .data
            }
        };

        let new_version = self
            .gateway
            .set_entry(identity, &data, SetEntryOpts::default())
            .await
            .context(GatewaySnafu)?;

        self.ledger.remove(identity).context(LedgerSnafu)?;
        info!(entry = %identity, from = version_id, to = %new_version, "version restored");
        Ok(new_version)
    }
}

impl std::fmt::Debug for VersionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionHistory").finish()
    }
}
