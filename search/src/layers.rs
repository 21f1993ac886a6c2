//! Closed-layer access for both search directions.
//!
//! Each direction records, per cost value, the states it closed. Inside one
//! cost value the states are further split into zero-cost *sub-layers*:
//! sub-layer 0 holds the states reached by a cost-incurring step (or the
//! search root), sub-layer `i` the states first reached after `i` zero-cost
//! steps. The reconstructor reads these layers; it never writes them.

use std::collections::BTreeMap;
use std::fmt;

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::StateSet;

use crate::contract::PlanningTaskV1;

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// From the initial state toward the goal; layers indexed by `g`.
    Forward,
    /// From the goal toward the initial state; layers indexed by `h`.
    Backward,
}

impl Direction {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to one direction's closed layers.
pub trait ClosedLayers<S: StateSet> {
    /// Zero-cost sub-layers closed at `cost`, in discovery order.
    /// Empty if nothing was closed at that cost.
    fn sublayers(&self, cost: i64) -> &[S];

    /// Every state closed at `cost` (union of its sub-layers).
    fn closed_at(&self, cost: i64) -> S {
        self.sublayers(cost)
            .iter()
            .fold(S::empty(), |acc, layer| acc.union(layer))
    }

    /// Index of the first sub-layer at `cost` containing `state`.
    fn sublayer_index(&self, cost: i64, state: &ConcreteState) -> Option<usize> {
        self.sublayers(cost).iter().position(|l| l.contains(state))
    }

    /// Costs with at least one closed state, ascending.
    fn closed_costs(&self) -> Vec<i64>;
}

/// Recorded closed layers, filled by a producing search.
#[derive(Debug, Clone)]
pub struct ClosedList<S: StateSet> {
    layers: BTreeMap<i64, Vec<S>>,
}

impl<S: StateSet> ClosedList<S> {
    /// Create an empty closed list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: BTreeMap::new(),
        }
    }

    /// Append a zero-cost sub-layer at `cost`. Empty sets are ignored.
    pub fn push_sublayer(&mut self, cost: i64, states: S) {
        if states.is_empty() {
            return;
        }
        self.layers.entry(cost).or_default().push(states);
    }

    /// Replace the whole layer at `cost`. Empty sub-layers are dropped.
    pub fn insert_layer(&mut self, cost: i64, sublayers: Vec<S>) {
        let kept: Vec<S> = sublayers.into_iter().filter(|l| !l.is_empty()).collect();
        if kept.is_empty() {
            self.layers.remove(&cost);
        } else {
            self.layers.insert(cost, kept);
        }
    }

    /// `(cost, sub-layers)` in ascending cost order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[S])> {
        self.layers.iter().map(|(c, ls)| (*c, ls.as_slice()))
    }
}

impl<S: StateSet> Default for ClosedList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSet> ClosedLayers<S> for ClosedList<S> {
    fn sublayers(&self, cost: i64) -> &[S] {
        self.layers
            .get(&cost)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn closed_costs(&self) -> Vec<i64> {
        self.layers.keys().copied().collect()
    }
}

/// Borrowed, read-only view of everything reconstruction consults.
///
/// Built by the driver for the duration of one
/// [`construct_cheaper_solutions`](crate::registry::SolutionRegistry::construct_cheaper_solutions)
/// call and never retained. The producing searches must not expand layers
/// while a view borrows them.
pub struct CostLayerView<'a, S: StateSet> {
    task: &'a dyn PlanningTaskV1<S>,
    forward: Option<&'a dyn ClosedLayers<S>>,
    backward: Option<&'a dyn ClosedLayers<S>>,
}

impl<'a, S: StateSet> CostLayerView<'a, S> {
    /// A view with no recorded layers in either direction.
    #[must_use]
    pub fn new(task: &'a dyn PlanningTaskV1<S>) -> Self {
        Self {
            task,
            forward: None,
            backward: None,
        }
    }

    /// Attach the forward search's layers.
    #[must_use]
    pub fn with_forward(mut self, layers: &'a dyn ClosedLayers<S>) -> Self {
        self.forward = Some(layers);
        self
    }

    /// Attach the backward search's layers.
    #[must_use]
    pub fn with_backward(mut self, layers: &'a dyn ClosedLayers<S>) -> Self {
        self.backward = Some(layers);
        self
    }

    /// The planning task.
    #[must_use]
    pub fn task(&self) -> &'a dyn PlanningTaskV1<S> {
        self.task
    }

    /// Layers recorded by `direction`, if that search ran.
    #[must_use]
    pub fn layers(&self, direction: Direction) -> Option<&'a dyn ClosedLayers<S>> {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
        }
    }
}
