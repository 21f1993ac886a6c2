//! Shared helpers for tandem benchmark suites.

use tandem_harness::contract::{ExplicitTask, PlanningWorldV1};
use tandem_harness::layered::LayeredSearch;
use tandem_kernel::carrier::state_set::{ExplicitStateSet, StateSet};
use tandem_search::cut::SolutionCut;
use tandem_search::layers::{ClosedLayers, ClosedList, CostLayerView, Direction};

/// A task with both directions searched to the horizon, so reconstruction
/// can be timed without the producers.
pub struct PreparedLayers {
    pub task: ExplicitTask,
    pub forward: ClosedList<ExplicitStateSet>,
    pub backward: ClosedList<ExplicitStateSet>,
}

impl PreparedLayers {
    /// View over both directions.
    #[must_use]
    pub fn view(&self) -> CostLayerView<'_, ExplicitStateSet> {
        CostLayerView::new(&self.task)
            .with_forward(&self.forward)
            .with_backward(&self.backward)
    }

    /// Every non-empty forward/backward layer intersection, as cuts.
    #[must_use]
    pub fn meeting_cuts(&self) -> Vec<SolutionCut<ExplicitStateSet>> {
        let mut cuts = Vec::new();
        for g in self.forward.closed_costs() {
            let forward = self.forward.closed_at(g);
            for h in self.backward.closed_costs() {
                let meeting = forward.intersect(&self.backward.closed_at(h));
                if !meeting.is_empty() {
                    cuts.push(SolutionCut::new(g, h, meeting));
                }
            }
        }
        cuts
    }
}

/// Build `world`'s task and close both directions through `horizon`.
///
/// # Panics
///
/// Panics if the world cannot build its task. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn prepare_layers(world: &dyn PlanningWorldV1, horizon: i64) -> PreparedLayers {
    let task = world.build_task().expect("build_task");
    let forward = close_all(&task, Direction::Forward, horizon);
    let backward = close_all(&task, Direction::Backward, horizon);
    PreparedLayers {
        task,
        forward,
        backward,
    }
}

/// Close every layer of one direction through `horizon`.
#[must_use]
pub fn close_all(
    task: &ExplicitTask,
    direction: Direction,
    horizon: i64,
) -> ClosedList<ExplicitStateSet> {
    let mut search: LayeredSearch<'_, ExplicitStateSet> =
        LayeredSearch::new(direction, task, horizon);
    while search.close_next_layer().is_some() {}
    search.closed().clone()
}

/// `n` distinct `(g, h)` pairs in a scrambled but fixed order.
#[must_use]
pub fn scrambled_keys(n: i64) -> Vec<(i64, i64)> {
    let side = (1..).find(|s: &i64| s * s >= n).unwrap_or(1);
    (0..n)
        .map(|i| {
            let k = (i * 7919) % n;
            (k / side, k % side)
        })
        .collect()
}
