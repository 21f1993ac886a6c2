//! The state-set contract and its explicit implementation.
//!
//! A symbolic planner represents sets of states as boolean functions
//! (decision diagrams). Plan reconstruction only needs a small slice of that
//! algebra: union, intersection, difference, emptiness, membership, and a
//! way to enumerate the concrete points of a set. [`StateSet`] captures
//! exactly that slice so the reconstruction core stays independent of the
//! decision-diagram manager.
//!
//! [`ExplicitStateSet`] is the extensional implementation: an ordered set of
//! [`ConcreteState`] values. It backs the fixture worlds and tests, and is
//! the reference semantics any symbolic implementation must agree with.

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::carrier::state::ConcreteState;

/// Boolean-function state-set contract.
///
/// Implementations have value semantics: every operation returns a new set
/// and leaves its inputs untouched. `PartialEq` must be set equality.
///
/// # Determinism
///
/// [`states`](Self::states) must enumerate members in ascending
/// [`ConcreteState`] order. Reconstruction explores branches in this order,
/// so plan output is reproducible only if enumeration is.
pub trait StateSet: Clone + PartialEq + Debug {
    /// The empty set (constant false).
    fn empty() -> Self;

    /// The set containing exactly `state`.
    fn singleton(state: &ConcreteState) -> Self;

    /// Build a set from concrete members.
    fn from_states<I: IntoIterator<Item = ConcreteState>>(states: I) -> Self {
        states
            .into_iter()
            .fold(Self::empty(), |acc, s| acc.union(&Self::singleton(&s)))
    }

    /// Whether the set has no members.
    fn is_empty(&self) -> bool;

    /// Set union (disjunction).
    #[must_use]
    fn union(&self, other: &Self) -> Self;

    /// Set intersection (conjunction).
    #[must_use]
    fn intersect(&self, other: &Self) -> Self;

    /// Set difference (`self ∧ ¬other`).
    #[must_use]
    fn minus(&self, other: &Self) -> Self;

    /// Membership test for a single concrete state.
    fn contains(&self, state: &ConcreteState) -> bool;

    /// Number of concrete members.
    fn len(&self) -> usize;

    /// Concrete members in ascending order.
    fn states(&self) -> Vec<ConcreteState>;
}

/// Extensional state set: an ordered set of concrete states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitStateSet {
    members: BTreeSet<ConcreteState>,
}

impl ExplicitStateSet {
    /// Iterate members in ascending order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &ConcreteState> {
        self.members.iter()
    }

    /// Add a member in place. Returns `false` if it was already present.
    pub fn insert(&mut self, state: ConcreteState) -> bool {
        self.members.insert(state)
    }
}

impl StateSet for ExplicitStateSet {
    fn empty() -> Self {
        Self::default()
    }

    fn singleton(state: &ConcreteState) -> Self {
        let mut members = BTreeSet::new();
        members.insert(state.clone());
        Self { members }
    }

    fn from_states<I: IntoIterator<Item = ConcreteState>>(states: I) -> Self {
        Self {
            members: states.into_iter().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn union(&self, other: &Self) -> Self {
        Self {
            members: self.members.union(&other.members).cloned().collect(),
        }
    }

    fn intersect(&self, other: &Self) -> Self {
        Self {
            members: self.members.intersection(&other.members).cloned().collect(),
        }
    }

    fn minus(&self, other: &Self) -> Self {
        Self {
            members: self.members.difference(&other.members).cloned().collect(),
        }
    }

    fn contains(&self, state: &ConcreteState) -> bool {
        self.members.contains(state)
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn states(&self) -> Vec<ConcreteState> {
        self.members.iter().cloned().collect()
    }
}

impl FromIterator<ConcreteState> for ExplicitStateSet {
    fn from_iter<I: IntoIterator<Item = ConcreteState>>(iter: I) -> Self {
        <Self as StateSet>::from_states(iter)
    }
}
