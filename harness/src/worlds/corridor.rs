//! `Corridor`: positive costs only.
//!
//! Four cells in a row. `step` moves one cell right (cost 1); `leap` jumps
//! from cell 0 to cell 2 (cost 2). The goal is cell 3, so the two cheapest
//! plans both cost 3: `step step step` and `leap step`.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::{ExplicitStateSet, StateSet};

use super::relation;
use crate::contract::{ExplicitTask, PlanningWorldV1, WorldBuildError};

/// Corridor world with two equal-cost plans.
pub struct Corridor;

impl PlanningWorldV1 for Corridor {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "corridor"
    }

    fn build_task(&self) -> Result<ExplicitTask, WorldBuildError> {
        let goal = ExplicitStateSet::singleton(&ConcreteState::single(3));
        Ok(
            ExplicitTask::new(self.world_id(), ConcreteState::single(0), goal)?
                .with_transition(relation(0, "step", 1, &[(0, 1), (1, 2), (2, 3)])?)
                .with_transition(relation(1, "leap", 2, &[(0, 2)])?),
        )
    }
}
