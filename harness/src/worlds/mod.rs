//! Fixture worlds for the driver.

pub mod corridor;
pub mod ring;
pub mod zero_cost_diamond;

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::operators::action::Action;
use tandem_kernel::operators::transition::ExplicitTransition;

use crate::contract::WorldBuildError;

/// Build a relation for one action from `(from, to)` pairs over
/// single-variable states.
pub(crate) fn relation(
    id: u32,
    name: &str,
    cost: i64,
    edges: &[(u32, u32)],
) -> Result<ExplicitTransition, WorldBuildError> {
    let mut relation = ExplicitTransition::new(Action::new(id, name, cost)?);
    for &(from, to) in edges {
        relation.add_edge(ConcreteState::single(from), ConcreteState::single(to));
    }
    Ok(relation)
}
