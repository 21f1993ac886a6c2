//! `SolutionCut`: a meeting point of the forward and backward searches.

use tandem_kernel::carrier::state_set::StateSet;

/// Ordering and identity key of a cut: `(f, g, h)`.
///
/// Lower `f` first, then lower `g`. Because `h = f - g`, two keys are equal
/// exactly when their `(g, h)` pairs are, which is the merge criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CutKey {
    pub f: i64,
    pub g: i64,
    pub h: i64,
}

/// A set of states where the two searches meet at cost decomposition
/// `(g, h)`.
///
/// `g` is the cost accrued from the initial state, `h` the remaining cost to
/// a goal, `f = g + h` the cost of every plan through these states.
/// Cuts are immutable once registered except through [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionCut<S: StateSet> {
    g: i64,
    h: i64,
    cut: S,
}

impl<S: StateSet> SolutionCut<S> {
    /// Create a cut. Cost validation happens at registration.
    #[must_use]
    pub fn new(g: i64, h: i64, cut: S) -> Self {
        Self { g, h, cut }
    }

    /// Cost accrued on the forward side.
    #[must_use]
    pub fn g(&self) -> i64 {
        self.g
    }

    /// Remaining cost on the backward side.
    #[must_use]
    pub fn h(&self) -> i64 {
        self.h
    }

    /// Total plan cost through this cut. Saturates for unvalidated cuts.
    #[must_use]
    pub fn f(&self) -> i64 {
        self.g.saturating_add(self.h)
    }

    /// The meeting states.
    #[must_use]
    pub fn states(&self) -> &S {
        &self.cut
    }

    /// Ordering key.
    #[must_use]
    pub fn key(&self) -> CutKey {
        CutKey {
            f: self.f(),
            g: self.g,
            h: self.h,
        }
    }

    /// Whether `other` describes the same `(g, h)` pair.
    #[must_use]
    pub fn same_key(&self, other: &Self) -> bool {
        self.g == other.g && self.h == other.h
    }

    /// Union `other`'s states into this cut.
    ///
    /// The same `(g, h)` pair may be witnessed by different state subsets
    /// across registrations; merging keeps all of them.
    pub fn merge(&mut self, other: &Self) {
        debug_assert!(self.same_key(other), "merging cuts with different keys");
        self.cut = self.cut.union(&other.cut);
    }
}
