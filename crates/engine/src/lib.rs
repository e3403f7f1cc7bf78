//! Entry-state reconciliation over the remote datastore platform.
//!
//! The remote key listing does not say which keys are soft-deleted. This
//! crate closes that gap: it probes each listed key's newest version,
//! remembers observed deletions in a locally persisted deletion ledger, and
//! merges all three sources into render-ready entry records. It also hosts
//! the version-history controller that restores entries by rewriting an old
//! version as the new current one.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storescope_engine::{EngineContext, RedbLedgerRepository, ReconcileOpts};
//! use storescope_gateway::{GatewayConfig, StoreClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::builder()
//!         .api_key(std::env::var("API_KEY")?)
//!         .universe_id("3044")
//!         .build()?;
//!     let gateway = Arc::new(StoreClient::new(config)?);
//!     let repo = Arc::new(RedbLedgerRepository::open("ledger.redb")?);
//!     let ctx = EngineContext::new(gateway, repo);
//!
//!     let engine = ctx.reconcile_engine();
//!     let page = engine
//!         .list_reconciled_entries("Players", ReconcileOpts::default())
//!         .await?;
//!     println!("{} live entries", page.entries.len());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod error;
mod history;
mod ledger;
mod reconcile;
mod repo;
#[cfg(test)]
mod support;

pub use context::EngineContext;
pub use error::{EngineError, Result};
pub use history::VersionHistory;
pub use ledger::{DeletionLedger, SharedLedger};
pub use reconcile::{ReconcileEngine, ReconcileOpts, ReconciledPage};
pub use repo::{LedgerRepository, MemoryLedgerRepository, RedbLedgerRepository, RepoError};
