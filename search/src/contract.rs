//! Planning task contract.

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::StateSet;
use tandem_kernel::operators::transition::TransitionTable;

/// The task a reconstruction runs against.
///
/// # Contract
///
/// - `transitions` must be the same relations the producing searches used to
///   build their closed layers; reconstruction replays them.
/// - `is_goal(s)` must agree with `goal_states().contains(s)`.
/// - All methods are pure: same task, same answers, same order.
pub trait PlanningTaskV1<S: StateSet> {
    /// Unique task identifier (e.g., `"corridor"`).
    fn task_id(&self) -> &str;

    /// The single initial state; root of the forward search.
    fn initial_state(&self) -> &ConcreteState;

    /// All goal states; root layer of the backward search.
    fn goal_states(&self) -> &S;

    /// Goal test for a concrete state.
    fn is_goal(&self, state: &ConcreteState) -> bool {
        self.goal_states().contains(state)
    }

    /// Transition relations grouped by action cost.
    fn transitions(&self) -> &TransitionTable<S>;
}
