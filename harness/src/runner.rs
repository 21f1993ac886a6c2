//! Run driver: alternates layered searches and feeds the registry.
//!
//! The runner uses ONLY search-crate APIs for bookkeeping:
//! `register_solution`, `construct_cheaper_solutions`, `found_all_plans`.
//! It does not reconstruct plans itself.
//!
//! # Loop
//!
//! ```text
//! validate policy → build registry
//!   → [close cheaper direction's next layer
//!      → intersect with the other side → new_solution(cut) × N
//!      → set_lower_bound(lb)] × until found all / both exhausted
//!   → final set_lower_bound → RunOutcomeV1
//! ```
//!
//! # Lower bound
//!
//! With forward layers final through `F`, backward layers final through
//! `B`, and largest action cost `c`, every plan of cost at most
//! `F + B + 1 - c` has a registered cut: take its longest prefix within
//! `F`; the next step overshoots `F` by at most `c`, so the remainder fits
//! within `B`. Unidirectional runs prove `F + 1` (forward) or `B + 1`
//! (backward).

use tandem_kernel::carrier::state_set::StateSet;
use tandem_search::contract::PlanningTaskV1;
use tandem_search::cut::SolutionCut;
use tandem_search::error::ReconstructionError;
use tandem_search::layers::{ClosedLayers, CostLayerView, Direction};
use tandem_search::plan::Plan;
use tandem_search::plan_store::PlanDatabase;
use tandem_search::registry::SolutionRegistry;
use tandem_search::report::ReconstructionReportV1;

use crate::contract::{PlanningWorldV1, WorldBuildError};
use crate::layered::LayeredSearch;
use crate::policy::{DriverPolicyV1, SearchDirectionV1};

/// Error during a driver run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// Policy, plan store, or registry construction failed.
    #[error(transparent)]
    Setup(#[from] ReconstructionError),
    /// The world could not build its task.
    #[error(transparent)]
    World(#[from] WorldBuildError),
    /// Reconstruction failed mid-run. `accepted` holds the plans found
    /// before the failure.
    #[error("run aborted with {} plans accepted: {source}", .accepted.len())]
    Reconstruction {
        source: ReconstructionError,
        accepted: Vec<Plan>,
    },
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTerminationV1 {
    /// The plan quota was met.
    FoundAllPlans,
    /// Both searches closed every layer within the horizon; some plans were
    /// found but fewer than requested.
    HorizonExhausted,
    /// No plan exists within the horizon.
    NoSolution,
}

impl RunTerminationV1 {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FoundAllPlans => "found_all_plans",
            Self::HorizonExhausted => "horizon_exhausted",
            Self::NoSolution => "no_solution",
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcomeV1 {
    /// Accepted plans in acceptance order (non-decreasing cost).
    pub plans: Vec<Plan>,
    pub termination: RunTerminationV1,
    /// Final proven lower bound on undiscovered plan costs.
    pub lower_bound: i64,
    /// Cheapest registered cut, if any.
    pub upper_bound: Option<i64>,
    pub report: ReconstructionReportV1,
}

impl RunOutcomeV1 {
    /// Deterministic JSON rendering.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "lower_bound": self.lower_bound,
            "plans": self.plans.iter().map(Plan::to_json).collect::<Vec<_>>(),
            "report": self.report.to_json(),
            "termination": self.termination.as_str(),
            "upper_bound": self.upper_bound,
        })
    }

    /// Plan costs, in acceptance order.
    #[must_use]
    pub fn plan_costs(&self) -> Vec<i64> {
        self.plans.iter().map(Plan::cost).collect()
    }
}

/// Build a world's task and run it.
///
/// # Errors
///
/// Returns [`RunError::World`] if the world cannot build its task, otherwise
/// whatever [`run`] returns.
pub fn run_world(
    world: &dyn PlanningWorldV1,
    policy: &DriverPolicyV1,
) -> Result<RunOutcomeV1, RunError> {
    let task = world.build_task()?;
    run(&task, policy)
}

/// Run the layered searches on `task` until the plan quota is met or the
/// horizon is exhausted.
///
/// # Errors
///
/// - [`RunError::Setup`] if the policy does not validate.
/// - [`RunError::Reconstruction`] if the registry reports inconsistent
///   layers; plans accepted so far are returned with the error.
pub fn run<S: StateSet>(
    task: &dyn PlanningTaskV1<S>,
    policy: &DriverPolicyV1,
) -> Result<RunOutcomeV1, RunError> {
    policy.validate()?;
    let mut registry: SolutionRegistry<S, PlanDatabase> =
        SolutionRegistry::new(policy.plan_database()?, policy.reconstruction_policy());
    let mut driver = Driver {
        task,
        direction: policy.direction,
        forward: policy
            .direction
            .uses_forward()
            .then(|| LayeredSearch::new(Direction::Forward, task, policy.max_cost)),
        backward: policy
            .direction
            .uses_backward()
            .then(|| LayeredSearch::new(Direction::Backward, task, policy.max_cost)),
        max_action_cost: task.transitions().max_cost().unwrap_or(0).max(1),
        lower_bound: 0,
        upper_bound: None,
    };
    tracing::info!(
        task = task.task_id(),
        direction = policy.direction.as_str(),
        max_cost = policy.max_cost,
        "starting run"
    );

    let termination = loop {
        if registry.found_all_plans() {
            break RunTerminationV1::FoundAllPlans;
        }
        let Some(direction) = driver.next_direction() else {
            driver.set_lower_bound(&mut registry)?;
            break if registry.found_all_plans() {
                RunTerminationV1::FoundAllPlans
            } else if registry.num_found_plans() == 0 {
                RunTerminationV1::NoSolution
            } else {
                RunTerminationV1::HorizonExhausted
            };
        };
        for cut in driver.step(direction) {
            driver.new_solution(&mut registry, cut)?;
        }
        driver.set_lower_bound(&mut registry)?;
    };

    tracing::info!(
        task = task.task_id(),
        termination = termination.as_str(),
        plans = registry.num_found_plans(),
        lower_bound = driver.lower_bound,
        "run finished"
    );
    let report = registry.report();
    Ok(RunOutcomeV1 {
        plans: registry.into_plan_store().into_plans(),
        termination,
        lower_bound: driver.lower_bound,
        upper_bound: driver.upper_bound,
        report,
    })
}

struct Driver<'t, S: StateSet> {
    task: &'t dyn PlanningTaskV1<S>,
    direction: SearchDirectionV1,
    forward: Option<LayeredSearch<'t, S>>,
    backward: Option<LayeredSearch<'t, S>>,
    max_action_cost: i64,
    lower_bound: i64,
    upper_bound: Option<i64>,
}

impl<S: StateSet> Driver<'_, S> {
    /// The direction whose next layer is cheaper; forward on ties.
    fn next_direction(&self) -> Option<Direction> {
        let fw = self.forward.as_ref().and_then(LayeredSearch::next_cost);
        let bw = self.backward.as_ref().and_then(LayeredSearch::next_cost);
        match (fw, bw) {
            (Some(f), Some(b)) if b < f => Some(Direction::Backward),
            (Some(_), _) => Some(Direction::Forward),
            (None, Some(_)) => Some(Direction::Backward),
            (None, None) => None,
        }
    }

    /// Close one layer in `direction` and return the cuts it creates.
    fn step(&mut self, direction: Direction) -> Vec<SolutionCut<S>> {
        let (search, other) = match direction {
            Direction::Forward => (self.forward.as_mut(), self.backward.as_ref()),
            Direction::Backward => (self.backward.as_mut(), self.forward.as_ref()),
        };
        let Some(search) = search else {
            return Vec::new();
        };
        let Some((cost, layer)) = search.close_next_layer() else {
            return Vec::new();
        };

        let mut cuts = Vec::new();
        if let Some(other) = other {
            for other_cost in other.closed().closed_costs() {
                let meeting = layer.intersect(&other.closed().closed_at(other_cost));
                if !meeting.is_empty() {
                    cuts.push(oriented_cut(direction, cost, other_cost, meeting));
                }
            }
        } else {
            let target = match direction {
                Direction::Forward => self.task.goal_states().clone(),
                Direction::Backward => S::singleton(self.task.initial_state()),
            };
            let meeting = layer.intersect(&target);
            if !meeting.is_empty() {
                cuts.push(oriented_cut(direction, cost, 0, meeting));
            }
        }
        cuts
    }

    /// Register a cut unless the quota is already met.
    fn new_solution(
        &mut self,
        registry: &mut SolutionRegistry<S, PlanDatabase>,
        cut: SolutionCut<S>,
    ) -> Result<(), RunError> {
        if registry.found_all_plans() {
            return Ok(());
        }
        let f = cut.f();
        if let Err(source) = registry.register_solution(cut) {
            return Err(aborted(registry, source));
        }
        if !matches!(self.upper_bound, Some(u) if u <= f) {
            tracing::debug!(upper_bound = f, "upper bound lowered");
            self.upper_bound = Some(f);
        }
        Ok(())
    }

    /// Raise the lower bound and reconstruct every cut now below it.
    fn set_lower_bound(
        &mut self,
        registry: &mut SolutionRegistry<S, PlanDatabase>,
    ) -> Result<(), RunError> {
        let bound = self.proven_lower_bound();
        if bound <= self.lower_bound || registry.found_all_plans() {
            return Ok(());
        }
        self.lower_bound = bound;

        let mut view = CostLayerView::new(self.task);
        if let Some(fw) = self.forward.as_ref() {
            view = view.with_forward(fw.closed());
        }
        if let Some(bw) = self.backward.as_ref() {
            view = view.with_backward(bw.closed());
        }
        if let Err(source) = registry.construct_cheaper_solutions(bound, &view) {
            return Err(aborted(registry, source));
        }
        Ok(())
    }

    fn proven_lower_bound(&self) -> i64 {
        let fw = self.forward.as_ref().map(LayeredSearch::closed_through);
        let bw = self.backward.as_ref().map(LayeredSearch::closed_through);
        match (self.direction, fw, bw) {
            (SearchDirectionV1::Bidirectional, Some(f), Some(b)) => f
                .saturating_add(b)
                .saturating_add(2)
                .saturating_sub(self.max_action_cost),
            (SearchDirectionV1::Forward, Some(f), _) => f.saturating_add(1),
            (SearchDirectionV1::Backward, _, Some(b)) => b.saturating_add(1),
            _ => 0,
        }
    }
}

fn oriented_cut<S: StateSet>(
    direction: Direction,
    own_cost: i64,
    other_cost: i64,
    meeting: S,
) -> SolutionCut<S> {
    match direction {
        Direction::Forward => SolutionCut::new(own_cost, other_cost, meeting),
        Direction::Backward => SolutionCut::new(other_cost, own_cost, meeting),
    }
}

fn aborted<S: StateSet>(
    registry: &SolutionRegistry<S, PlanDatabase>,
    source: ReconstructionError,
) -> RunError {
    tracing::warn!(
        error = %source,
        accepted = registry.num_found_plans(),
        "run aborted"
    );
    RunError::Reconstruction {
        source,
        accepted: registry.plan_store().plans().to_vec(),
    }
}
