//! Ledger persistence behind a small repository interface.
//!
//! The engine depends only on [`LedgerRepository`]; the default
//! implementation stores the whole collection as one JSON document under a
//! fixed key in an embedded redb database, replaced atomically on every
//! save. Loading tolerates anything: a missing table, a missing key, or a
//! document that no longer parses all reset to an empty ledger, because the
//! ledger is rebuildable from remote version history.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};
use snafu::Snafu;
use storescope_types::LedgerEntry;
use tracing::warn;

use crate::ledger::DeletionLedger;

/// Table holding the serialized ledger.
const LEDGER_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("deletion_ledger");

/// The single key the collection is stored under.
const LEDGER_KEY: &str = "deleted-entries";

/// Ledger persistence error.
#[derive(Debug, Snafu)]
pub enum RepoError {
    /// The backing database could not be opened or created.
    #[snafu(display("failed to open ledger database at {path}: {message}"))]
    Open {
        /// Database path.
        path: String,
        /// Underlying error text.
        message: String,
    },

    /// Writing the collection failed.
    #[snafu(display("failed to persist deletion ledger: {message}"))]
    Persist {
        /// Underlying error text.
        message: String,
    },
}

/// Load/save access to a persisted [`DeletionLedger`].
pub trait LedgerRepository: Send + Sync {
    /// Loads the persisted ledger; unreadable or corrupt data yields an
    /// empty ledger rather than an error.
    fn load(&self) -> DeletionLedger;

    /// Replaces the persisted collection with `ledger`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Persist`] if the write fails.
    fn save(&self, ledger: &DeletionLedger) -> Result<(), RepoError>;
}

/// redb-backed repository: the whole ledger as one JSON value.
pub struct RedbLedgerRepository {
    db: Database,
}

impl RedbLedgerRepository {
    /// Opens (or creates) the ledger database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::Open`] if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| RepoError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { db })
    }
}

impl LedgerRepository for RedbLedgerRepository {
    fn load(&self) -> DeletionLedger {
        let read = match self.db.begin_read() {
            Ok(txn) => txn,
            Err(e) => {
                warn!("ledger load failed ({e}); starting with an empty ledger");
                return DeletionLedger::default();
            }
        };
        let table = match read.open_table(LEDGER_TABLE) {
            Ok(table) => table,
            // First run: the table does not exist yet.
            Err(redb::TableError::TableDoesNotExist(_)) => return DeletionLedger::default(),
            Err(e) => {
                warn!("ledger table unreadable ({e}); starting with an empty ledger");
                return DeletionLedger::default();
            }
        };
        let raw = match table.get(LEDGER_KEY) {
            Ok(Some(value)) => value.value().to_vec(),
            Ok(None) => return DeletionLedger::default(),
            Err(e) => {
                warn!("ledger read failed ({e}); starting with an empty ledger");
                return DeletionLedger::default();
            }
        };
        match serde_json::from_slice::<Vec<LedgerEntry>>(&raw) {
            Ok(entries) => DeletionLedger::from_entries(entries),
            Err(e) => {
                warn!("ledger data corrupt ({e}); starting with an empty ledger");
                DeletionLedger::default()
            }
        }
    }

    fn save(&self, ledger: &DeletionLedger) -> Result<(), RepoError> {
        let raw = serde_json::to_vec(ledger.entries())
            .map_err(|e| RepoError::Persist { message: e.to_string() })?;
        let write = self
            .db
            .begin_write()
            .map_err(|e| RepoError::Persist { message: e.to_string() })?;
        {
            let mut table = write
                .open_table(LEDGER_TABLE)
                .map_err(|e| RepoError::Persist { message: e.to_string() })?;
            table
                .insert(LEDGER_KEY, raw.as_slice())
                .map_err(|e| RepoError::Persist { message: e.to_string() })?;
        }
        write.commit().map_err(|e| RepoError::Persist { message: e.to_string() })
    }
}

/// In-memory repository for tests: exercises the same serialize/deserialize
/// path as the redb implementation, plus corruption and failure knobs.
#[derive(Default)]
pub struct MemoryLedgerRepository {
    raw: parking_lot::RwLock<Option<Vec<u8>>>,
    save_count: std::sync::atomic::AtomicUsize,
    fail_saves: std::sync::atomic::AtomicBool,
}

impl MemoryLedgerRepository {
    /// Number of successful saves performed.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Replaces the stored document with arbitrary bytes (corruption tests).
    pub fn set_raw(&self, raw: Vec<u8>) {
        *self.raw.write() = Some(raw);
    }

    /// Makes subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

impl LedgerRepository for MemoryLedgerRepository {
    fn load(&self) -> DeletionLedger {
        let Some(raw) = self.raw.read().clone() else {
            return DeletionLedger::default();
        };
        match serde_json::from_slice::<Vec<LedgerEntry>>(&raw) {
            Ok(entries) => DeletionLedger::from_entries(entries),
            Err(e) => {
                warn!("ledger data corrupt ({e}); starting with an empty ledger");
                DeletionLedger::default()
            }
        }
    }

    fn save(&self, ledger: &DeletionLedger) -> Result<(), RepoError> {
        if self.fail_saves.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(RepoError::Persist { message: "injected save failure".to_owned() });
        }
        let raw = serde_json::to_vec(ledger.entries())
            .map_err(|e| RepoError::Persist { message: e.to_string() })?;
        *self.raw.write() = Some(raw);
        self.save_count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
