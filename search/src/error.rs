//! Typed reconstruction errors.
//!
//! Three families:
//!
//! - *Invalid input* (`InvalidCut`, `UnsupportedPolicy`): rejected at the
//!   boundary before any state changes.
//! - *Consistency violations* (`UnjustifiedState`, `MissingLayers`,
//!   `CostMismatch`): the producing searches handed over layers that cannot
//!   explain a cut. Fatal for the current call; never retried, never
//!   truncated into "fewer plans".
//! - *Audit serialization* (`Canon`).

use tandem_kernel::proof::canon::CanonError;

use crate::layers::Direction;

/// Typed failure for registry and reconstruction operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconstructionError {
    /// A cut with negative cost components or an unrepresentable `f`.
    #[error("invalid solution cut (g={g}, h={h}): {detail}")]
    InvalidCut { g: i64, h: i64, detail: String },

    /// A state in a closed layer has no predecessor (forward) or successor
    /// (backward) that explains it.
    #[error("{direction} layers inconsistent: state {state} at cost {cost} has no justifying action")]
    UnjustifiedState {
        direction: Direction,
        cost: i64,
        state: String,
    },

    /// Reconstruction needed layers from a direction that recorded none.
    #[error("{direction} layers unavailable, needed at cost {cost}")]
    MissingLayers { direction: Direction, cost: i64 },

    /// An assembled plan does not cost what its cut promised.
    #[error("reconstructed plan costs {actual}, cut promised {expected}")]
    CostMismatch { expected: i64, actual: i64 },

    /// A policy option outside the supported range.
    #[error("unsupported policy: {detail}")]
    UnsupportedPolicy { detail: String },

    /// Audit report serialization failed.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

impl ReconstructionError {
    /// Whether this error signals inconsistent producer layers.
    #[must_use]
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            Self::UnjustifiedState { .. } | Self::MissingLayers { .. } | Self::CostMismatch { .. }
        )
    }
}
