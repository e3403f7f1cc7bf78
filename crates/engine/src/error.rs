//! Engine error types.
//!
//! The engine never panics past its boundary for expected failures: remote
//! errors, persistence errors, and superseded reconciliations all come back
//! as [`EngineError`] values the caller inspects.

use snafu::Snafu;
use storescope_gateway::GatewayError;

use crate::repo::RepoError;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error type for reconciliation and version-history operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EngineError {
    /// A remote operation failed.
    #[snafu(display("remote operation failed: {source}"))]
    Gateway {
        /// The gateway failure, with its category intact.
        source: GatewayError,
    },

    /// The deletion ledger could not be persisted.
    #[snafu(display("deletion ledger persistence failed: {source}"))]
    Ledger {
        /// The repository failure.
        source: RepoError,
    },

    /// A newer reconciliation for the same engine started before this one
    /// finished; the stale result must be discarded, not rendered.
    #[snafu(display("reconciliation superseded by a newer request"))]
    Superseded,
}

impl EngineError {
    /// True when this result is a stale reconciliation to silently drop.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    /// True when the underlying failure is a remote not-found; presentation
    /// layers use this to pivot into restore mode.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Gateway { source } if source.is_not_found())
    }
}
