//! Plan reconstruction from a solution cut.
//!
//! A cut says "some plan of cost `f = g + h` passes through these states".
//! Reconstruction recovers those plans by walking the closed layers of both
//! searches: a *forward pass* from each meeting state back to the initial
//! state through forward layers `g, g - c, ..., 0`, then a *backward pass*
//! from the meeting state on to a goal through backward layers
//! `h, h - c, ..., 0`.
//!
//! # Exploration
//!
//! Depth-first over an explicit work stack. Each frame owns its partial plan,
//! so sibling branches never share mutable state. Children of a frame are
//! explored in a fixed order:
//!
//! 1. the base-case continuation, if the frame is a base case;
//! 2. zero-cost explanations, by sub-layer index, then state;
//! 3. cost-incurring explanations, by ascending cost, then transition-table
//!    order, then state.
//!
//! # Termination
//!
//! Cost-incurring steps strictly decrease the layer cost. Zero-cost steps
//! stay in the layer but never revisit a state on the branch's trail for
//! that layer, so each layer contributes at most `|closed(k)|` frames to a
//! branch. Forward layer `g` and backward layer `h` of a cut are the same
//! plan layer, so the backward pass inherits the forward trail there.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::StateSet;
use tandem_kernel::operators::action::Action;
use tandem_kernel::operators::transition::{TransitionRelation, TransitionTable};

use crate::cut::SolutionCut;
use crate::error::ReconstructionError;
use crate::layers::{ClosedLayers, CostLayerView, Direction};
use crate::plan::Plan;
use crate::plan_store::{PlanAcceptor, PlanVerdictV1};

/// What one reconstruction call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionOutcome<S: StateSet> {
    /// Plans the store accepted.
    pub accepted: usize,
    /// Plans the store already had.
    pub duplicates: usize,
    /// Plans the store's filters rejected.
    pub filtered: usize,
    /// States on accepted plans.
    pub goal_path_states: S,
}

impl<S: StateSet> ReconstructionOutcome<S> {
    fn empty() -> Self {
        Self {
            accepted: 0,
            duplicates: 0,
            filtered: 0,
            goal_path_states: S::empty(),
        }
    }
}

/// Actions and states of a branch so far.
///
/// During the forward pass both vectors run backward in time (meeting state
/// first); [`into_forward_order`](Self::into_forward_order) flips them when
/// the initial state is reached.
#[derive(Debug, Clone)]
struct PartialPlan {
    /// State the current pass started from.
    origin: ConcreteState,
    actions: Vec<Action>,
    states: Vec<ConcreteState>,
}

impl PartialPlan {
    fn start(state: ConcreteState) -> Self {
        Self {
            origin: state.clone(),
            actions: Vec::new(),
            states: vec![state],
        }
    }

    fn extended(&self, action: &Action, state: ConcreteState) -> Self {
        let mut next = self.clone();
        next.actions.push(action.clone());
        next.states.push(state);
        next
    }

    fn into_forward_order(mut self) -> Self {
        self.actions.reverse();
        self.states.reverse();
        self
    }

    /// States reached since the last cost-incurring action, in forward
    /// order. Only meaningful once in forward order.
    fn states_since_last_cost(&self) -> Vec<ConcreteState> {
        let start = self
            .actions
            .iter()
            .rposition(|a| !a.is_zero_cost())
            .map_or(0, |i| i + 1);
        self.states[start..].to_vec()
    }

    fn into_plan(self) -> Plan {
        Plan::new(self.actions, self.states)
    }
}

/// One unit of DFS work: explain `state` at layer `cost` in `direction`.
#[derive(Debug, Clone)]
struct Frame {
    direction: Direction,
    cost: i64,
    state: ConcreteState,
    /// States this branch visited in layer `cost`, `state` included.
    trail: Vec<ConcreteState>,
    plan: PartialPlan,
}

impl Frame {
    fn root(direction: Direction, cost: i64, state: ConcreteState, plan: PartialPlan) -> Self {
        Self {
            direction,
            cost,
            trail: vec![state.clone()],
            state,
            plan,
        }
    }
}

/// Rebuilds concrete plans for a cut from borrowed closed layers.
pub struct PlanReconstructor<'v, 'a, S: StateSet> {
    view: &'v CostLayerView<'a, S>,
}

impl<'v, 'a, S: StateSet> PlanReconstructor<'v, 'a, S> {
    /// Create a reconstructor over `view`.
    #[must_use]
    pub fn new(view: &'v CostLayerView<'a, S>) -> Self {
        Self { view }
    }

    /// Reconstruct plans through `cut` until `budget` plans are accepted or
    /// every explanation has been tried.
    ///
    /// Every completed plan is submitted to `store`; only `Accepted`
    /// verdicts consume budget. A budget of zero or an empty cut yields an
    /// empty outcome.
    ///
    /// # Errors
    ///
    /// - [`ReconstructionError::UnjustifiedState`] if a closed state has no
    ///   explanation in the layers.
    /// - [`ReconstructionError::MissingLayers`] if a pass needs a direction
    ///   that recorded no layers.
    /// - [`ReconstructionError::CostMismatch`] if a completed plan does not
    ///   cost `cut.f()`.
    pub fn reconstruct<P: PlanAcceptor + ?Sized>(
        &self,
        cut: &SolutionCut<S>,
        budget: usize,
        store: &mut P,
    ) -> Result<ReconstructionOutcome<S>, ReconstructionError> {
        let mut outcome = ReconstructionOutcome::empty();
        if budget == 0 || cut.states().is_empty() {
            return Ok(outcome);
        }

        let mut stack: Vec<Frame> = cut
            .states()
            .states()
            .into_iter()
            .rev()
            .map(|m| Frame::root(Direction::Forward, cut.g(), m.clone(), PartialPlan::start(m)))
            .collect();

        while let Some(frame) = stack.pop() {
            let Some(plan) = self.expand(frame, cut.h(), &mut stack)? else {
                continue;
            };
            Self::submit(plan, cut.f(), store, &mut outcome)?;
            if outcome.accepted >= budget {
                break;
            }
        }
        Ok(outcome)
    }

    /// Push the children of `frame`; return a plan if the frame completes one.
    fn expand(
        &self,
        frame: Frame,
        backward_cost: i64,
        stack: &mut Vec<Frame>,
    ) -> Result<Option<Plan>, ReconstructionError> {
        let Frame {
            direction,
            cost,
            ref state,
            ..
        } = frame;
        tracing::trace!(
            direction = direction.as_str(),
            cost,
            state = %state,
            depth = frame.plan.actions.len(),
            "expanding reconstruction frame"
        );

        let task = self.view.task();
        let is_base = cost == 0
            && match direction {
                Direction::Forward => state == task.initial_state(),
                Direction::Backward => task.is_goal(state),
            };

        let mut children = Vec::new();
        let mut completed = None;
        if is_base {
            match direction {
                Direction::Forward => {
                    // The meeting layer is shared by both passes, so the
                    // backward trail starts with the forward one.
                    let prefix = frame.plan.clone().into_forward_order();
                    children.push(Frame {
                        direction: Direction::Backward,
                        cost: backward_cost,
                        state: prefix.origin.clone(),
                        trail: prefix.states_since_last_cost(),
                        plan: prefix,
                    });
                }
                Direction::Backward => completed = Some(frame.plan.clone().into_plan()),
            }
        }

        match self.view.layers(direction) {
            Some(layers) => {
                let justified = Self::explain(&frame, layers, task.transitions(), &mut children);
                if !is_base && !justified {
                    tracing::warn!(
                        direction = direction.as_str(),
                        cost,
                        state = %state,
                        "closed state has no justifying action"
                    );
                    return Err(ReconstructionError::UnjustifiedState {
                        direction,
                        cost,
                        state: state.to_string(),
                    });
                }
            }
            None if is_base => {}
            None => {
                tracing::warn!(direction = direction.as_str(), cost, "layers unavailable");
                return Err(ReconstructionError::MissingLayers { direction, cost });
            }
        }

        stack.extend(children.into_iter().rev());
        Ok(completed)
    }

    /// Collect every explanation of the frame's state as child frames.
    ///
    /// Returns whether any explanation exists, ignoring the trail.
    fn explain(
        frame: &Frame,
        layers: &dyn ClosedLayers<S>,
        table: &TransitionTable<S>,
        children: &mut Vec<Frame>,
    ) -> bool {
        let Frame {
            direction,
            cost,
            ref state,
            ref trail,
            ref plan,
        } = *frame;
        let single = S::singleton(state);
        let mut justified = false;

        if table.has_zero_cost() {
            let layer = layers.closed_at(cost);
            let mut zero: Vec<(usize, ConcreteState, &Action)> = Vec::new();
            for relation in table.at(0) {
                for p in step(direction, relation.as_ref(), &single)
                    .intersect(&layer)
                    .states()
                {
                    justified = true;
                    if trail.contains(&p) {
                        continue;
                    }
                    let sublayer = layers.sublayer_index(cost, &p).unwrap_or(usize::MAX);
                    zero.push((sublayer, p, relation.action()));
                }
            }
            zero.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            for (_, p, action) in zero {
                let mut next_trail = trail.clone();
                next_trail.push(p.clone());
                children.push(Frame {
                    direction,
                    cost,
                    state: p.clone(),
                    trail: next_trail,
                    plan: plan.extended(action, p),
                });
            }
        }

        for (action_cost, relations) in table.iter() {
            if action_cost > cost {
                break;
            }
            if action_cost <= 0 {
                continue;
            }
            let below = cost - action_cost;
            let layer = layers.closed_at(below);
            if layer.is_empty() {
                continue;
            }
            for relation in relations {
                for p in step(direction, relation.as_ref(), &single)
                    .intersect(&layer)
                    .states()
                {
                    justified = true;
                    let plan = plan.extended(relation.action(), p.clone());
                    children.push(Frame::root(direction, below, p, plan));
                }
            }
        }

        justified
    }

    fn submit<P: PlanAcceptor + ?Sized>(
        plan: Plan,
        expected: i64,
        store: &mut P,
        outcome: &mut ReconstructionOutcome<S>,
    ) -> Result<(), ReconstructionError> {
        let actual = plan.cost();
        if actual != expected {
            tracing::warn!(expected, actual, "reconstructed plan cost differs from cut");
            return Err(ReconstructionError::CostMismatch { expected, actual });
        }
        let visited = S::from_states(plan.states().iter().cloned());
        let verdict = store.submit(plan);
        tracing::trace!(verdict = verdict.as_str(), cost = actual, "plan submitted");
        match verdict {
            PlanVerdictV1::Accepted => {
                outcome.accepted += 1;
                outcome.goal_path_states = outcome.goal_path_states.union(&visited);
            }
            PlanVerdictV1::Duplicate => outcome.duplicates += 1,
            PlanVerdictV1::Filtered => outcome.filtered += 1,
        }
        Ok(())
    }
}

/// One relation step toward the direction's root: predecessors when
/// walking back to the initial state, successors when walking on to a goal.
fn step<S: StateSet>(direction: Direction, relation: &dyn TransitionRelation<S>, set: &S) -> S {
    match direction {
        Direction::Forward => relation.preimage(set),
        Direction::Backward => relation.image(set),
    }
}
