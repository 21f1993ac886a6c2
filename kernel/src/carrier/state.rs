//! `ConcreteState`: one fully assigned point of the state space.
//!
//! A symbolic search manipulates sets of states as boolean functions; plan
//! reconstruction needs individual points of those sets. A `ConcreteState`
//! is such a point: one value per state variable, in variable order.
//!
//! # Ordering
//!
//! Derives `Ord` (lexicographic over variable values) so that state sets
//! enumerate their members in a canonical order. Every enumeration that
//! feeds plan reconstruction goes through this order, which keeps plan
//! output deterministic across runs.

use std::fmt;

/// A concrete state: the value of every state variable.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConcreteState(Vec<u32>);

impl ConcreteState {
    /// Construct from per-variable values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    /// Convenience constructor for single-variable state spaces.
    #[must_use]
    pub fn single(value: u32) -> Self {
        Self(vec![value])
    }

    /// Per-variable values.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Debug for ConcreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConcreteState{:?}", self.0)
    }
}

impl fmt::Display for ConcreteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<u32>> for ConcreteState {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}
