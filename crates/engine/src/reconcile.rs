//! Entry-state reconciliation.
//!
//! The remote listing says which keys exist; it does not say which are
//! soft-deleted. [`ReconcileEngine`] merges three sources into one
//! render-ready page: the raw key listing, a per-key newest-version probe,
//! and the local deletion ledger. Deletions discovered by probe (including
//! ones performed by other tools) are written through to the ledger so they
//! survive restarts.
//!
//! Probing is fail-open on status and fail-closed on visibility: a key whose
//! probe errors or returns no versions is shown as live, never hidden.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::future;
use snafu::ResultExt;
use storescope_gateway::{ListEntriesOpts, ListVersionsOpts, StoreGateway};
use storescope_types::{normalize_scope, EntryIdentity, EntryRecord, LedgerEntry, GLOBAL_SCOPE};
use tracing::{debug, info};

use crate::error::{EngineError, GatewaySnafu, LedgerSnafu, Result};
use crate::ledger::SharedLedger;

/// Options for [`ReconcileEngine::list_reconciled_entries`].
#[derive(Debug, Clone, Default)]
pub struct ReconcileOpts {
    /// Scope to list; `None` or empty means the global scope.
    pub scope: Option<String>,
    /// Case-insensitive substring filter on key names, applied locally.
    pub search_text: Option<String>,
    /// Opaque pagination cursor from a previous page, passed through to the
    /// remote unchanged.
    pub cursor: Option<String>,
    /// Include deleted entries (including ledger-only synthetic records) in
    /// the returned page.
    pub show_deleted: bool,
}

/// One reconciled page: records in remote-listing order, synthetic
/// ledger-only records appended after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledPage {
    /// Render-ready records.
    pub entries: Vec<EntryRecord>,
    /// Cursor for the next page, exactly as the remote returned it.
    pub next_cursor: Option<String>,
}

/// Reconciles remote listings with the deletion ledger.
pub struct ReconcileEngine {
    gateway: Arc<dyn StoreGateway>,
    ledger: Arc<SharedLedger>,
    /// Request generation for ignore-on-arrival staleness: a reconciliation
    /// whose generation is no longer current when its fan-out settles is
    /// discarded instead of returned.
    generation: AtomicU64,
}

impl ReconcileEngine {
    /// Creates an engine over a gateway and a shared ledger.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>, ledger: Arc<SharedLedger>) -> Self {
        Self { gateway, ledger, generation: AtomicU64::new(0) }
    }

    /// Lists one reconciled page of entries for a container.
    ///
    /// Contract:
    /// 1. Remote key listing (cursor passed through; remote page size is a
    ///    remote constant).
    /// 2. Local case-insensitive substring filter when `search_text` is set.
    ///    The remote prefix filter is deliberately unused: substring
    ///    matching is a strict superset and the two must not be combined.
    /// 3. Concurrent newest-version probe per surviving key; the merge runs
    ///    only after the whole batch settles.
    /// 4. Probe-discovered deletions are upserted into the ledger with
    ///    `deleted_at = now`, persisted immediately.
    /// 5. Ledger state wins the merge; `show_deleted` appends ledger-only
    ///    records the listing omitted, or filters deleted records out of
    ///    the returned page. Either way the ledger keeps them.
    ///
    /// # Errors
    ///
    /// - The initial listing failure is the only remote error surfaced;
    ///   per-key probe failures degrade classification, never visibility.
    /// - [`EngineError::Superseded`] when a newer reconciliation started
    ///   before this one finished; discard the result silently.
    /// - [`EngineError::Ledger`] when a write-through persist fails.
    pub async fn list_reconciled_entries(
        &self,
        container: &str,
        opts: ReconcileOpts,
    ) -> Result<ReconciledPage> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let scope = normalize_scope(opts.scope.as_deref());

        let listing = self
            .gateway
            .list_entries(
                container,
                ListEntriesOpts {
                    scope: (scope != GLOBAL_SCOPE).then(|| scope.clone()),
                    cursor: opts.cursor.clone(),
                    prefix: None,
                },
            )
            .await
            .context(GatewaySnafu)?;

        let needle = opts
            .search_text
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let identities: Vec<EntryIdentity> = listing
            .keys
            .iter()
            .filter(|k| match &needle {
                Some(needle) => k.key.to_lowercase().contains(needle),
                None => true,
            })
            .map(|k| {
                EntryIdentity::new(
                    container,
                    &k.key,
                    Some(k.scope.as_deref().unwrap_or(&scope)),
                )
            })
            .collect();

        // Fan out deletion probes concurrently; completion order is not
        // observable in the output because the merge waits for the batch.
        let probes = identities.iter().map(|identity| self.probe_deleted(identity));
        let probe_results = future::join_all(probes).await;

        // Write discovered deletions through to the ledger even if this
        // request turns out to be stale: a discovered deletion is a valid
        // fact regardless of which request observed it.
        let now = Utc::now();
        for (identity, deleted) in identities.iter().zip(&probe_results) {
            if *deleted {
                self.ledger
                    .upsert(LedgerEntry { identity: identity.clone(), deleted_at: now })
                    .context(LedgerSnafu)?;
            }
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(container, generation, "discarding superseded reconciliation");
            return Err(EngineError::Superseded);
        }

        // Merge: the ledger is authoritative for deletion state and keeps
        // the original discovery timestamp across calls.
        let mut entries: Vec<EntryRecord> = identities
            .into_iter()
            .map(|identity| match self.ledger.get(&identity) {
                Some(tracked) => EntryRecord::deleted(identity, tracked.deleted_at),
                None => EntryRecord::live(identity),
            })
            .collect();

        if opts.show_deleted {
            // Ledger-only records: keys the remote listing omitted, e.g. a
            // freshly-deleted key the listing already excludes.
            for tracked in self.ledger.for_container(container) {
                if !entries.iter().any(|e| e.identity == tracked.identity) {
                    entries.push(EntryRecord::deleted(tracked.identity, tracked.deleted_at));
                }
            }
        } else {
            entries.retain(|e| !e.is_deleted);
        }

        Ok(ReconciledPage { entries, next_cursor: listing.next_cursor })
    }

    /// Soft-deletes an entry remotely and tracks it in the ledger.
    ///
    /// The ledger insert happens immediately on remote success; no version
    /// probe is needed to remember an explicit delete.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the remote delete fails (the ledger is
    /// left untouched), or [`EngineError::Ledger`] if the write-through
    /// persist fails afterwards.
    pub async fn delete_entry(&self, identity: &EntryIdentity) -> Result<()> {
        self.gateway.delete_entry(identity).await.context(GatewaySnafu)?;
        info!(entry = %identity, "entry deleted");
        self.ledger
            .upsert(LedgerEntry { identity: identity.clone(), deleted_at: Utc::now() })
            .context(LedgerSnafu)?;
        Ok(())
    }

    /// Probes whether the newest version of an entry is marked deleted.
    ///
    /// Fail-open: an erroring probe or an empty history classifies the key
    /// as not deleted. Absence of version info must never hide a key.
    async fn probe_deleted(&self, identity: &EntryIdentity) -> bool {
        match self.gateway.list_versions(identity, ListVersionsOpts::latest_only()).await {
            Ok(page) => page.versions.first().is_some_and(|v| v.deleted),
            Err(e) => {
                debug!(entry = %identity, error = %e, "deletion probe failed; treating as live");
                false
            }
        }
    }
}

impl std::fmt::Debug for ReconcileEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileEngine")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
