//! Reconstruction lock tests over producer-recorded layers.
//!
//! Layers come from the harness `LayeredSearch`, cuts are registered by
//! hand, and plans are recovered through the registry API only.
//!
//! Proves:
//! 1. Positive-cost cuts yield plans whose cost equals the cut's `f`
//! 2. Zero-cost sub-layers let one cut yield one plan per justification
//! 3. Corrupted or missing layers surface as consistency violations, leave
//!    the failing cut registered, and do not advance the watermark

use std::collections::BTreeSet;

use tandem_harness::contract::{ExplicitTask, PlanningWorldV1};
use tandem_harness::layered::LayeredSearch;
use tandem_harness::worlds::corridor::Corridor;
use tandem_harness::worlds::zero_cost_diamond::ZeroCostDiamond;
use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::carrier::state_set::ExplicitStateSet;
use tandem_search::cut::SolutionCut;
use tandem_search::error::ReconstructionError;
use tandem_search::layers::{ClosedList, CostLayerView, Direction};
use tandem_search::plan_store::{PlanDatabase, PlanSelectionV1};
use tandem_search::policy::ReconstructionPolicyV1;
use tandem_search::registry::SolutionRegistry;
use tandem_search::report::CutOutcomeV1;

use lock_tests::plan_oracle::action_names;

type Registry = SolutionRegistry<ExplicitStateSet, PlanDatabase>;

fn set(values: &[u32]) -> ExplicitStateSet {
    values.iter().map(|&v| ConcreteState::single(v)).collect()
}

fn registry(num_plans: usize) -> Registry {
    let store = PlanDatabase::new(PlanSelectionV1::TopK { num_plans }).unwrap();
    SolutionRegistry::new(store, ReconstructionPolicyV1::default())
}

/// Run one direction to exhaustion and keep its layers.
fn closed(task: &ExplicitTask, direction: Direction, horizon: i64) -> ClosedList<ExplicitStateSet> {
    let mut search: LayeredSearch<'_, ExplicitStateSet> =
        LayeredSearch::new(direction, task, horizon);
    while search.close_next_layer().is_some() {}
    search.closed().clone()
}

// ---------------------------------------------------------------------------
// 1. Positive costs
// ---------------------------------------------------------------------------

/// ACCEPTANCE: RECON-POSITIVE
#[test]
fn positive_cost_cut_yields_plan_of_cut_cost() {
    let task = Corridor.build_task().unwrap();
    let fw = closed(&task, Direction::Forward, 6);
    let bw = closed(&task, Direction::Backward, 6);
    let view: CostLayerView<'_, ExplicitStateSet> =
        CostLayerView::new(&task).with_forward(&fw).with_backward(&bw);

    let mut r = registry(1);
    r.register_solution(SolutionCut::new(2, 1, set(&[2]))).unwrap();
    r.construct_cheaper_solutions(4, &view).unwrap();

    assert!(r.found_all_plans());
    let plans = r.plan_store().plans();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].cost(), 3);
    assert_eq!(r.plan_cost_bound(), Some(3));
    assert!(r.cuts().is_empty());
}

#[test]
fn positive_cost_cut_enumerates_every_prefix() {
    let task = Corridor.build_task().unwrap();
    let fw = closed(&task, Direction::Forward, 6);
    let bw = closed(&task, Direction::Backward, 6);
    let view: CostLayerView<'_, ExplicitStateSet> =
        CostLayerView::new(&task).with_forward(&fw).with_backward(&bw);

    let mut r = registry(5);
    r.register_solution(SolutionCut::new(2, 1, set(&[2]))).unwrap();
    r.construct_cheaper_solutions(4, &view).unwrap();

    let names: BTreeSet<Vec<&str>> = r.plan_store().plans().iter().map(action_names).collect();
    let expected: BTreeSet<Vec<&str>> =
        [vec!["leap", "step"], vec!["step", "step", "step"]].into_iter().collect();
    assert_eq!(names, expected);
    assert!(!r.found_all_plans(), "only two plans cost 3");
    assert_eq!(r.states_on_goal_paths(), &set(&[0, 1, 2, 3]));
}

// ---------------------------------------------------------------------------
// 2. Zero-cost sub-layers
// ---------------------------------------------------------------------------

/// ACCEPTANCE: RECON-ZERO-COST
#[test]
fn zero_cost_justifications_yield_distinct_plans() {
    let task = ZeroCostDiamond.build_task().unwrap();
    let fw = closed(&task, Direction::Forward, 4);
    let bw = closed(&task, Direction::Backward, 4);
    let view: CostLayerView<'_, ExplicitStateSet> =
        CostLayerView::new(&task).with_forward(&fw).with_backward(&bw);

    let mut r = registry(2);
    r.register_solution(SolutionCut::new(1, 0, set(&[3, 4]))).unwrap();
    r.construct_cheaper_solutions(2, &view).unwrap();

    assert!(r.found_all_plans());
    let names: BTreeSet<Vec<&str>> = r.plan_store().plans().iter().map(action_names).collect();
    let expected: BTreeSet<Vec<&str>> = [
        vec!["left", "a", "finish"],
        vec!["right", "b", "finish"],
    ]
    .into_iter()
    .collect();
    assert_eq!(names, expected);
    assert!(r.plan_store().plans().iter().all(|p| p.cost() == 1));
}

// ---------------------------------------------------------------------------
// 3. Consistency violations
// ---------------------------------------------------------------------------

/// ACCEPTANCE: RECON-UNJUSTIFIED
#[test]
fn corrupted_forward_layer_is_unjustified() {
    let task = Corridor.build_task().unwrap();
    let mut fw = closed(&task, Direction::Forward, 6);
    let bw = closed(&task, Direction::Backward, 6);
    // 3 is not reachable at cost 1.
    fw.insert_layer(1, vec![set(&[1, 3])]);
    let view: CostLayerView<'_, ExplicitStateSet> =
        CostLayerView::new(&task).with_forward(&fw).with_backward(&bw);

    let mut r = registry(1);
    r.register_solution(SolutionCut::new(1, 0, set(&[3]))).unwrap();
    let err = r.construct_cheaper_solutions(2, &view).unwrap_err();

    assert!(
        matches!(
            err,
            ReconstructionError::UnjustifiedState {
                direction: Direction::Forward,
                cost: 1,
                ..
            }
        ),
        "expected UnjustifiedState at forward cost 1, got {err:?}"
    );
    assert!(err.is_consistency_violation());
    assert_eq!(r.cuts().len(), 1, "failing cut stays registered");
    assert_eq!(r.plan_cost_bound(), None);
    assert_eq!(r.num_found_plans(), 0);
}

/// ACCEPTANCE: RECON-MISSING-LAYERS
#[test]
fn missing_backward_layers_are_reported() {
    let task = Corridor.build_task().unwrap();
    let fw = closed(&task, Direction::Forward, 6);
    let view: CostLayerView<'_, ExplicitStateSet> = CostLayerView::new(&task).with_forward(&fw);

    let mut r = registry(1);
    r.register_solution(SolutionCut::new(2, 1, set(&[2]))).unwrap();
    let err = r.construct_cheaper_solutions(4, &view).unwrap_err();

    assert_eq!(
        err,
        ReconstructionError::MissingLayers {
            direction: Direction::Backward,
            cost: 1,
        }
    );
    assert!(err.is_consistency_violation());
    assert_eq!(r.cuts().len(), 1);
}

#[test]
fn earlier_cuts_keep_their_plans_when_a_later_cut_fails() {
    let task = Corridor.build_task().unwrap();
    let mut fw = closed(&task, Direction::Forward, 6);
    let bw = closed(&task, Direction::Backward, 6);
    // Forge state 0 into forward layer 5 so the (5, 2) cut cannot be
    // explained.
    fw.insert_layer(5, vec![set(&[0])]);
    let view: CostLayerView<'_, ExplicitStateSet> =
        CostLayerView::new(&task).with_forward(&fw).with_backward(&bw);

    let mut r = registry(10);
    r.register_solution(SolutionCut::new(3, 0, set(&[3]))).unwrap();
    r.register_solution(SolutionCut::new(5, 2, set(&[0]))).unwrap();
    let err = r.construct_cheaper_solutions(8, &view).unwrap_err();

    assert!(err.is_consistency_violation());
    assert_eq!(r.num_found_plans(), 2);
    let report = r.report();
    assert_eq!(report.events.len(), 1);
    assert_eq!(
        report.events[0].outcome,
        CutOutcomeV1::Reconstructed {
            accepted: 2,
            duplicates: 0,
            filtered: 0,
        }
    );
    assert_eq!(r.cuts().len(), 1);
    assert_eq!(r.cuts()[0].f(), 7);
}
