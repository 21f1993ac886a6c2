//! World contract: the minimal trait a fixture world must implement.
//!
//! Worlds provide task data (states, goals, actions, edges). Worlds may NOT
//! run searches, register cuts, or reconstruct plans; those are driver and
//! registry concerns.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::{ExplicitStateSet, StateSet};
use tandem_kernel::operators::transition::{ExplicitTransition, TransitionTable};
use tandem_kernel::operators::OperatorError;
use tandem_search::contract::PlanningTaskV1;

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldBuildError {
    /// An action definition was rejected by the kernel.
    #[error("invalid action: {0}")]
    InvalidAction(#[from] OperatorError),
    /// The world declares no goal state.
    #[error("world {world_id} declares no goal state")]
    NoGoal { world_id: String },
}

/// The contract a world must implement to be run by the driver.
pub trait PlanningWorldV1 {
    /// Unique world identifier (e.g., `"corridor"`).
    fn world_id(&self) -> &str;

    /// Build the explicit planning task.
    ///
    /// # Errors
    ///
    /// Returns [`WorldBuildError`] if an action or the goal set is invalid.
    fn build_task(&self) -> Result<ExplicitTask, WorldBuildError>;
}

/// An explicit-state planning task: one initial state, a goal set, and
/// edge-list transition relations.
pub struct ExplicitTask {
    task_id: String,
    initial: ConcreteState,
    goals: ExplicitStateSet,
    transitions: TransitionTable<ExplicitStateSet>,
}

impl ExplicitTask {
    /// Create a task with no transitions.
    ///
    /// # Errors
    ///
    /// Returns [`WorldBuildError::NoGoal`] if `goals` is empty.
    pub fn new(
        task_id: impl Into<String>,
        initial: ConcreteState,
        goals: ExplicitStateSet,
    ) -> Result<Self, WorldBuildError> {
        let task_id = task_id.into();
        if goals.is_empty() {
            return Err(WorldBuildError::NoGoal { world_id: task_id });
        }
        Ok(Self {
            task_id,
            initial,
            goals,
            transitions: TransitionTable::new(),
        })
    }

    /// Add a transition relation.
    #[must_use]
    pub fn with_transition(mut self, relation: ExplicitTransition) -> Self {
        self.transitions.insert(Box::new(relation));
        self
    }

    /// Add a transition relation in place.
    pub fn add_transition(&mut self, relation: ExplicitTransition) {
        self.transitions.insert(Box::new(relation));
    }
}

impl PlanningTaskV1<ExplicitStateSet> for ExplicitTask {
    fn task_id(&self) -> &str {
        &self.task_id
    }

    fn initial_state(&self) -> &ConcreteState {
        &self.initial
    }

    fn goal_states(&self) -> &ExplicitStateSet {
        &self.goals
    }

    fn transitions(&self) -> &TransitionTable<ExplicitStateSet> {
        &self.transitions
    }
}
