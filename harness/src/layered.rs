//! Layered uniform-cost producer for one search direction.
//!
//! Closes states one cost value at a time, cheapest first. A state may be
//! closed at several costs: plans are enumerated in cost order, so the
//! producer never prunes a state because it was closed more cheaply before.
//! Exploration is bounded by a cost horizon instead.
//!
//! Within a cost value, zero-cost successors are closed in rounds; each
//! round becomes one sub-layer of the recorded [`ClosedList`].

use std::collections::BTreeMap;

use tandem_kernel::carrier::state_set::StateSet;
use tandem_kernel::operators::transition::TransitionRelation;
use tandem_search::contract::PlanningTaskV1;
use tandem_search::layers::{ClosedLayers, ClosedList, Direction};

/// One direction's layered search.
pub struct LayeredSearch<'t, S: StateSet> {
    direction: Direction,
    task: &'t dyn PlanningTaskV1<S>,
    horizon: i64,
    open: BTreeMap<i64, S>,
    closed: ClosedList<S>,
}

impl<'t, S: StateSet> LayeredSearch<'t, S> {
    /// Start a search rooted at the initial state (forward) or the goal
    /// states (backward). Nothing is closed until
    /// [`close_next_layer`](Self::close_next_layer).
    #[must_use]
    pub fn new(direction: Direction, task: &'t dyn PlanningTaskV1<S>, horizon: i64) -> Self {
        let root = match direction {
            Direction::Forward => S::singleton(task.initial_state()),
            Direction::Backward => task.goal_states().clone(),
        };
        let mut open = BTreeMap::new();
        if horizon >= 0 && !root.is_empty() {
            open.insert(0, root);
        }
        Self {
            direction,
            task,
            horizon,
            open,
            closed: ClosedList::new(),
        }
    }

    /// The search direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cost of the next layer to close, if any remains within the horizon.
    #[must_use]
    pub fn next_cost(&self) -> Option<i64> {
        self.open.keys().next().copied()
    }

    /// Whether every layer within the horizon is closed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.open.is_empty()
    }

    /// Largest cost through which every layer is final.
    ///
    /// `-1` before the first layer is closed; the horizon once exhausted.
    #[must_use]
    pub fn closed_through(&self) -> i64 {
        self.next_cost().map_or(self.horizon, |next| next - 1)
    }

    /// Layers recorded so far.
    #[must_use]
    pub fn closed(&self) -> &ClosedList<S> {
        &self.closed
    }

    /// Close the cheapest open layer and return `(cost, closed states)`.
    pub fn close_next_layer(&mut self) -> Option<(i64, S)> {
        let (cost, frontier) = self.open.pop_first()?;
        let task = self.task;
        let table = task.transitions();

        let mut layer = frontier.clone();
        self.closed.push_sublayer(cost, frontier.clone());
        if table.has_zero_cost() {
            let mut round = frontier;
            loop {
                let reached = table
                    .at(0)
                    .iter()
                    .fold(S::empty(), |acc, r| acc.union(&self.step(r.as_ref(), &round)))
                    .minus(&layer);
                if reached.is_empty() {
                    break;
                }
                layer = layer.union(&reached);
                self.closed.push_sublayer(cost, reached.clone());
                round = reached;
            }
        }

        for (action_cost, relations) in table.iter() {
            if action_cost <= 0 {
                continue;
            }
            let Some(target) = cost.checked_add(action_cost) else {
                break;
            };
            if target > self.horizon {
                break;
            }
            let reached = relations
                .iter()
                .fold(S::empty(), |acc, r| acc.union(&self.step(r.as_ref(), &layer)));
            if reached.is_empty() {
                continue;
            }
            let slot = self.open.entry(target).or_insert_with(S::empty);
            *slot = slot.union(&reached);
        }

        tracing::debug!(
            direction = self.direction.as_str(),
            cost,
            states = layer.len(),
            sublayers = self.closed.sublayers(cost).len(),
            "closed layer"
        );
        Some((cost, layer))
    }

    fn step(&self, relation: &dyn TransitionRelation<S>, set: &S) -> S {
        match self.direction {
            Direction::Forward => relation.image(set),
            Direction::Backward => relation.preimage(set),
        }
    }
}
