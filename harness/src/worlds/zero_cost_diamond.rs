//! `ZeroCostDiamond`: zero-cost branching on both sides of a paid step.
//!
//! ```text
//!        left(0)     a(1)
//!     0 ───────> 1 ───────> 3 ──finish(0)──> 4
//!     │                     ^
//!     └──right(0)──> 2 ─b(1)┘
//! ```
//!
//! Goal is 4. Exactly two plans cost 1: `left a finish` and
//! `right b finish`.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::{ExplicitStateSet, StateSet};

use super::relation;
use crate::contract::{ExplicitTask, PlanningWorldV1, WorldBuildError};

/// Diamond world exercising zero-cost sub-layers.
pub struct ZeroCostDiamond;

impl PlanningWorldV1 for ZeroCostDiamond {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "zero_cost_diamond"
    }

    fn build_task(&self) -> Result<ExplicitTask, WorldBuildError> {
        let goal = ExplicitStateSet::singleton(&ConcreteState::single(4));
        Ok(
            ExplicitTask::new(self.world_id(), ConcreteState::single(0), goal)?
                .with_transition(relation(0, "left", 0, &[(0, 1)])?)
                .with_transition(relation(1, "right", 0, &[(0, 2)])?)
                .with_transition(relation(2, "a", 1, &[(1, 3)])?)
                .with_transition(relation(3, "b", 1, &[(2, 3)])?)
                .with_transition(relation(4, "finish", 0, &[(3, 4)])?),
        )
    }
}
