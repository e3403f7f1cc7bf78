//! The local deletion ledger.
//!
//! A persisted, ordered collection of entry identities believed to be
//! soft-deleted, compensating for the remote API's lack of a direct
//! "is this key deleted" query. The ledger is a convenience cache, not a
//! source of remote truth: losing it is recoverable by re-probing version
//! history, which is why corrupt persisted data resets to empty instead of
//! failing.
//!
//! Dedup is enforced here, not by the storage format: the collection is a
//! flat list, and [`DeletionLedger::upsert`] refuses to insert a second
//! record for an identity already present (and never overwrites an existing
//! `deleted_at`).

use std::sync::Arc;

use parking_lot::RwLock;
use storescope_types::{normalize_scope, EntryIdentity, LedgerEntry};

use crate::repo::{LedgerRepository, RepoError};

/// In-memory form of the deletion ledger: an append-mostly flat list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionLedger {
    entries: Vec<LedgerEntry>,
}

/// Compares two identities on the normalized triple.
///
/// Identities built through [`EntryIdentity::new`] are already normalized;
/// this guards against denormalized data deserialized from older persisted
/// ledgers.
fn same_identity(a: &EntryIdentity, b: &EntryIdentity) -> bool {
    a.container == b.container
        && a.key == b.key
        && normalize_scope(Some(&a.scope)) == normalize_scope(Some(&b.scope))
}

impl DeletionLedger {
    /// A ledger over an existing list of records (as loaded from storage).
    #[must_use]
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Whether an identity is tracked as deleted.
    #[must_use]
    pub fn has(&self, identity: &EntryIdentity) -> bool {
        self.get(identity).is_some()
    }

    /// The ledger record for an identity, if tracked.
    #[must_use]
    pub fn get(&self, identity: &EntryIdentity) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| same_identity(&e.identity, identity))
    }

    /// Adds a record if its identity is absent. Returns whether the ledger
    /// changed; an already-tracked identity is a no-op and keeps its
    /// original `deleted_at`.
    pub fn upsert(&mut self, entry: LedgerEntry) -> bool {
        if self.has(&entry.identity) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes the record for an identity. Returns whether one was removed.
    pub fn remove(&mut self, identity: &EntryIdentity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !same_identity(&e.identity, identity));
        self.entries.len() != before
    }

    /// All records for one container, in insertion order.
    #[must_use]
    pub fn for_container(&self, container: &str) -> Vec<LedgerEntry> {
        self.entries.iter().filter(|e| e.identity.container == container).cloned().collect()
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Number of tracked identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Thread-safe ledger with write-through persistence.
///
/// Every successful mutation persists the whole collection immediately; a
/// persistence failure surfaces to the caller and leaves the in-memory state
/// already mutated (the next successful mutation re-persists everything,
/// since saves are whole-collection replaces).
pub struct SharedLedger {
    inner: RwLock<DeletionLedger>,
    repo: Arc<dyn LedgerRepository>,
}

impl SharedLedger {
    /// Loads the ledger from the repository. Unreadable data comes back as
    /// an empty ledger (the repository logs the reset).
    #[must_use]
    pub fn load(repo: Arc<dyn LedgerRepository>) -> Self {
        let inner = RwLock::new(repo.load());
        Self { inner, repo }
    }

    /// Whether an identity is tracked as deleted.
    #[must_use]
    pub fn has(&self, identity: &EntryIdentity) -> bool {
        self.inner.read().has(identity)
    }

    /// The ledger record for an identity, if tracked.
    #[must_use]
    pub fn get(&self, identity: &EntryIdentity) -> Option<LedgerEntry> {
        self.inner.read().get(identity).cloned()
    }

    /// Inserts a record unless the identity is already tracked, persisting
    /// write-through. Returns whether the ledger changed.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if persisting the updated collection fails.
    pub fn upsert(&self, entry: LedgerEntry) -> Result<bool, RepoError> {
        let changed = self.inner.write().upsert(entry);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Removes the record for an identity, persisting write-through.
    /// Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError`] if persisting the updated collection fails.
    pub fn remove(&self, identity: &EntryIdentity) -> Result<bool, RepoError> {
        let changed = self.inner.write().remove(identity);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// All records for one container.
    #[must_use]
    pub fn for_container(&self, container: &str) -> Vec<LedgerEntry> {
        self.inner.read().for_container(container)
    }

    /// Number of tracked identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    fn persist(&self) -> Result<(), RepoError> {
        let snapshot = self.inner.read().clone();
        self.repo.save(&snapshot)
    }
}

impl std::fmt::Debug for SharedLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLedger").field("len", &self.len()).finish()
    }
}
