//! Plan selection lock tests: top-k, top-q, simple plans, single solution.
//!
//! The ring world has plans of cost 2 (`cw cw`), 4 (`ccw ccw`), and four of
//! cost 5 (three `cw`, one `ccw`). Only the first two are simple.

use tandem_harness::policy::{DriverPolicyV1, SearchDirectionV1};
use tandem_harness::runner::{run_world, RunError, RunTerminationV1};
use tandem_harness::worlds::corridor::Corridor;
use tandem_harness::worlds::ring::Ring;
use tandem_search::error::ReconstructionError;
use tandem_search::plan_store::PlanSelectionV1;
use tandem_search::report::CutOutcomeV1;

use lock_tests::plan_oracle::action_names;

fn policy(selection: PlanSelectionV1) -> DriverPolicyV1 {
    DriverPolicyV1 {
        direction: SearchDirectionV1::Bidirectional,
        max_cost: 12,
        selection,
        ..DriverPolicyV1::default()
    }
}

fn top_q(num_plans: usize, quality_percent: u32) -> PlanSelectionV1 {
    PlanSelectionV1::TopQ {
        num_plans,
        quality_percent,
    }
}

// ---------------------------------------------------------------------------
// Top-k
// ---------------------------------------------------------------------------

#[test]
fn top_k_returns_k_cheapest() {
    let outcome = run_world(&Ring::default(), &policy(PlanSelectionV1::TopK { num_plans: 3 })).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::FoundAllPlans);
    assert_eq!(outcome.plan_costs(), vec![2, 4, 5]);
}

// ---------------------------------------------------------------------------
// Top-q
// ---------------------------------------------------------------------------

/// ACCEPTANCE: SELECT-TOP-Q
#[test]
fn top_q_stops_at_quality_bound() {
    let outcome = run_world(&Ring::default(), &policy(top_q(10, 200))).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::FoundAllPlans);
    assert_eq!(outcome.plan_costs(), vec![2, 4]);

    let last = outcome.report.events.last().unwrap();
    assert_eq!(last.outcome, CutOutcomeV1::OutsideQualityBound);
    assert_eq!(last.f, 5);
}

#[test]
fn top_q_at_one_hundred_percent_keeps_only_optimal_plans() {
    // The corridor has no plan beyond its two optimal ones.
    let outcome = run_world(&Corridor, &policy(top_q(10, 100))).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::HorizonExhausted);
    assert_eq!(outcome.plan_costs(), vec![3, 3]);

    let outcome = run_world(&Ring::default(), &policy(top_q(10, 100))).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::FoundAllPlans);
    assert_eq!(outcome.plan_costs(), vec![2]);
}

#[test]
fn top_q_is_still_capped_by_num_plans() {
    let outcome = run_world(&Ring::default(), &policy(top_q(3, 300))).unwrap();
    assert_eq!(outcome.plan_costs(), vec![2, 4, 5]);
    assert!(outcome
        .report
        .events
        .iter()
        .all(|e| e.outcome != CutOutcomeV1::OutsideQualityBound));
}

#[test]
fn top_q_below_one_hundred_percent_is_rejected() {
    let err = run_world(&Ring::default(), &policy(top_q(3, 99))).unwrap_err();
    assert!(
        matches!(
            err,
            RunError::Setup(ReconstructionError::UnsupportedPolicy { .. })
        ),
        "expected UnsupportedPolicy, got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Simple plans
// ---------------------------------------------------------------------------

/// ACCEPTANCE: SELECT-SIMPLE
#[test]
fn simple_plans_only_filters_revisits() {
    let policy = DriverPolicyV1 {
        max_cost: 4,
        simple_plans_only: true,
        ..policy(PlanSelectionV1::TopK { num_plans: 3 })
    };
    let outcome = run_world(&Ring::default(), &policy).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::HorizonExhausted);
    assert_eq!(outcome.plan_costs(), vec![2, 4]);
    assert!(outcome.plans.iter().all(|p| p.is_simple()));

    let filtered: usize = outcome
        .report
        .events
        .iter()
        .map(|e| match e.outcome {
            CutOutcomeV1::Reconstructed { filtered, .. } => filtered,
            _ => 0,
        })
        .sum();
    assert!(filtered > 0, "cost-5 plans revisit a cell and must be filtered");
}

#[test]
fn without_simple_filter_revisits_are_kept() {
    let outcome = run_world(&Ring::default(), &policy(PlanSelectionV1::TopK { num_plans: 6 })).unwrap();
    assert_eq!(outcome.plan_costs(), vec![2, 4, 5, 5, 5, 5]);
    assert!(outcome.plans[2..].iter().all(|p| !p.is_simple()));
}

// ---------------------------------------------------------------------------
// Single solution
// ---------------------------------------------------------------------------

#[test]
fn single_solution_caps_quota_at_one() {
    let policy = DriverPolicyV1 {
        single_solution: true,
        ..policy(PlanSelectionV1::TopK { num_plans: 4 })
    };
    let outcome = run_world(&Ring::default(), &policy).unwrap();
    assert_eq!(outcome.termination, RunTerminationV1::FoundAllPlans);
    assert_eq!(outcome.plans.len(), 1);
    assert_eq!(action_names(&outcome.plans[0]), vec!["cw", "cw"]);
    assert_eq!(outcome.report.target_plans, 1);
}
