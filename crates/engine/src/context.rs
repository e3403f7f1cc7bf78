//! Explicit application context.
//!
//! All shared state is constructed here and passed into the engine and
//! controller constructors; there are no module-level singletons anywhere in
//! the workspace.

use std::sync::Arc;

use storescope_gateway::StoreGateway;

use crate::history::VersionHistory;
use crate::ledger::SharedLedger;
use crate::reconcile::ReconcileEngine;
use crate::repo::LedgerRepository;

/// Shared handles for one configured universe: the gateway and the loaded
/// deletion ledger.
#[derive(Clone)]
pub struct EngineContext {
    gateway: Arc<dyn StoreGateway>,
    ledger: Arc<SharedLedger>,
}

impl EngineContext {
    /// Builds a context, loading the ledger from the repository.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>, repo: Arc<dyn LedgerRepository>) -> Self {
        let ledger = Arc::new(SharedLedger::load(repo));
        Self { gateway, ledger }
    }

    /// The gateway handle.
    #[must_use]
    pub fn gateway(&self) -> Arc<dyn StoreGateway> {
        Arc::clone(&self.gateway)
    }

    /// The shared deletion ledger.
    #[must_use]
    pub fn ledger(&self) -> Arc<SharedLedger> {
        Arc::clone(&self.ledger)
    }

    /// A reconciliation engine over this context.
    #[must_use]
    pub fn reconcile_engine(&self) -> ReconcileEngine {
        ReconcileEngine::new(self.gateway(), self.ledger())
    }

    /// A version-history controller over this context.
    #[must_use]
    pub fn version_history(&self) -> VersionHistory {
        VersionHistory::new(self.gateway(), self.ledger())
    }
}
