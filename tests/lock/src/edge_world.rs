//! Edge-list worlds: single-variable states `0..state_count`, initial state
//! `0`, and one action per [`ActionSpec`].

use tandem_harness::contract::{ExplicitTask, PlanningWorldV1, WorldBuildError};
use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::operators::action::Action;
use tandem_kernel::operators::transition::ExplicitTransition;

/// One action: a cost and the `(from, to)` edges it induces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub cost: i64,
    pub edges: Vec<(u32, u32)>,
}

impl ActionSpec {
    #[must_use]
    pub fn new(cost: i64, edges: &[(u32, u32)]) -> Self {
        Self {
            cost,
            edges: edges.to_vec(),
        }
    }
}

/// A world given entirely by data. Action `i` has id `i` and name `a{i}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeWorld {
    pub state_count: u32,
    pub goals: Vec<u32>,
    pub actions: Vec<ActionSpec>,
}

impl EdgeWorld {
    /// Action name for index `i`.
    #[must_use]
    pub fn action_name(i: usize) -> String {
        format!("a{i}")
    }

    /// Whether `state` is a goal.
    #[must_use]
    pub fn is_goal(&self, state: u32) -> bool {
        self.goals.contains(&state)
    }

    /// Largest action cost, if any action exists.
    #[must_use]
    pub fn max_action_cost(&self) -> Option<i64> {
        self.actions.iter().map(|a| a.cost).max()
    }
}

impl PlanningWorldV1 for EdgeWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "edge_world"
    }

    fn build_task(&self) -> Result<ExplicitTask, WorldBuildError> {
        let goals = self.goals.iter().map(|&g| ConcreteState::single(g)).collect();
        let mut task = ExplicitTask::new(self.world_id(), ConcreteState::single(0), goals)?;
        for (i, spec) in self.actions.iter().enumerate() {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            let action = Action::new(id, Self::action_name(i), spec.cost)?;
            let mut relation = ExplicitTransition::new(action);
            for &(from, to) in &spec.edges {
                relation.add_edge(ConcreteState::single(from), ConcreteState::single(to));
            }
            task.add_transition(relation);
        }
        Ok(task)
    }
}
