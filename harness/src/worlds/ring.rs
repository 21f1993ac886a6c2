//! `Ring`: a cycle, so plans of every cost above the optimum exist.
//!
//! `size` cells in a ring. `cw` moves clockwise (cost 1), `ccw`
//! counter-clockwise (cost 2). Start at 0, goal at `goal`. Cycles make the
//! number of plans unbounded; only the cost horizon ends the search.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::{ExplicitStateSet, StateSet};

use super::relation;
use crate::contract::{ExplicitTask, PlanningWorldV1, WorldBuildError};

/// Ring world with cycles.
pub struct Ring {
    pub size: u32,
    pub goal: u32,
}

impl Default for Ring {
    fn default() -> Self {
        Self { size: 4, goal: 2 }
    }
}

impl PlanningWorldV1 for Ring {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "ring"
    }

    fn build_task(&self) -> Result<ExplicitTask, WorldBuildError> {
        let n = self.size.max(1);
        let cw: Vec<(u32, u32)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let ccw: Vec<(u32, u32)> = (0..n).map(|i| (i, (i + n - 1) % n)).collect();
        let goal = ExplicitStateSet::singleton(&ConcreteState::single(self.goal % n));
        Ok(
            ExplicitTask::new(self.world_id(), ConcreteState::single(0), goal)?
                .with_transition(relation(0, "cw", 1, &cw)?)
                .with_transition(relation(1, "ccw", 2, &ccw)?),
        )
    }
}
