//! Transition relations and the per-cost transition table.
//!
//! A transition relation relates predecessor states to successor states for
//! one action. Forward reconstruction asks "which states reach this one?"
//! ([`TransitionRelation::preimage`]); backward reconstruction asks "where
//! does this state go?" ([`TransitionRelation::image`]).

use std::collections::{BTreeMap, BTreeSet};

use crate::carrier::state::ConcreteState;
use crate::carrier::state_set::{ExplicitStateSet, StateSet};
use crate::operators::action::Action;

/// A relation over state pairs justified by one action.
pub trait TransitionRelation<S: StateSet> {
    /// The action this relation encodes.
    fn action(&self) -> &Action;

    /// Successors of `set`: `{ t | ∃ s ∈ set. (s, t) ∈ R }`.
    fn image(&self, set: &S) -> S;

    /// Predecessors of `set`: `{ s | ∃ t ∈ set. (s, t) ∈ R }`.
    fn preimage(&self, set: &S) -> S;
}

/// Edge-list transition relation over [`ExplicitStateSet`].
#[derive(Debug, Clone)]
pub struct ExplicitTransition {
    action: Action,
    successors: BTreeMap<ConcreteState, BTreeSet<ConcreteState>>,
    predecessors: BTreeMap<ConcreteState, BTreeSet<ConcreteState>>,
}

impl ExplicitTransition {
    /// Create a relation with no edges.
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            action,
            successors: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Builder-style edge insertion.
    #[must_use]
    pub fn with_edge(mut self, from: ConcreteState, to: ConcreteState) -> Self {
        self.add_edge(from, to);
        self
    }

    /// Record that applying the action in `from` yields `to`.
    pub fn add_edge(&mut self, from: ConcreteState, to: ConcreteState) {
        self.successors
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        self.predecessors.entry(to).or_default().insert(from);
    }

    /// Number of `(from, to)` pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }
}

fn follow(
    index: &BTreeMap<ConcreteState, BTreeSet<ConcreteState>>,
    set: &ExplicitStateSet,
) -> ExplicitStateSet {
    set.iter()
        .filter_map(|s| index.get(s))
        .flatten()
        .cloned()
        .collect()
}

impl TransitionRelation<ExplicitStateSet> for ExplicitTransition {
    fn action(&self) -> &Action {
        &self.action
    }

    fn image(&self, set: &ExplicitStateSet) -> ExplicitStateSet {
        follow(&self.successors, set)
    }

    fn preimage(&self, set: &ExplicitStateSet) -> ExplicitStateSet {
        follow(&self.predecessors, set)
    }
}

/// Transition relations grouped by action cost.
///
/// Costs iterate in ascending order; relations of equal cost keep their
/// insertion order. Reconstruction explores justifying actions in exactly
/// this order.
pub struct TransitionTable<S: StateSet> {
    by_cost: BTreeMap<i64, Vec<Box<dyn TransitionRelation<S>>>>,
}

impl<S: StateSet> TransitionTable<S> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_cost: BTreeMap::new(),
        }
    }

    /// Add a relation under its action's cost.
    pub fn insert(&mut self, relation: Box<dyn TransitionRelation<S>>) {
        let cost = relation.action().cost();
        self.by_cost.entry(cost).or_default().push(relation);
    }

    /// Relations whose action costs exactly `cost`.
    #[must_use]
    pub fn at(&self, cost: i64) -> &[Box<dyn TransitionRelation<S>>] {
        self.by_cost
            .get(&cost)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `(cost, relations)` pairs in ascending cost order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[Box<dyn TransitionRelation<S>>])> {
        self.by_cost.iter().map(|(c, rs)| (*c, rs.as_slice()))
    }

    /// Distinct action costs in ascending order.
    pub fn costs(&self) -> impl Iterator<Item = i64> + '_ {
        self.by_cost.keys().copied()
    }

    /// Whether any action has cost zero.
    #[must_use]
    pub fn has_zero_cost(&self) -> bool {
        self.by_cost.get(&0).is_some_and(|rs| !rs.is_empty())
    }

    /// Largest action cost, if the table is non-empty.
    #[must_use]
    pub fn max_cost(&self) -> Option<i64> {
        self.by_cost.keys().next_back().copied()
    }

    /// Total number of relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_cost.values().map(Vec::len).sum()
    }

    /// Whether the table has no relations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: StateSet> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
