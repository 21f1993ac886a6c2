//! Driver lock tests: completeness against brute force.
//!
//! Proves, for random positive-cost worlds and every search direction:
//! 1. The run returns exactly the plans cheaper than its proven lower bound
//! 2. No action sequence is returned twice
//! 3. Every plan is a real path whose cost is the sum of its actions
//! 4. Plans arrive in non-decreasing cost order
//!
//! And, for the fixture worlds, that all three directions agree.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tandem_harness::contract::PlanningWorldV1;
use tandem_harness::policy::{DriverPolicyV1, SearchDirectionV1};
use tandem_harness::runner::{run_world, RunOutcomeV1, RunTerminationV1};
use tandem_harness::worlds::corridor::Corridor;
use tandem_harness::worlds::ring::Ring;
use tandem_harness::worlds::zero_cost_diamond::ZeroCostDiamond;
use tandem_search::plan_store::PlanSelectionV1;

use lock_tests::edge_world::{ActionSpec, EdgeWorld};
use lock_tests::plan_oracle::{action_ids, plans_up_to, replays};

const DIRECTIONS: [SearchDirectionV1; 3] = [
    SearchDirectionV1::Forward,
    SearchDirectionV1::Backward,
    SearchDirectionV1::Bidirectional,
];

fn exhaustive(direction: SearchDirectionV1, max_cost: i64) -> DriverPolicyV1 {
    DriverPolicyV1 {
        direction,
        max_cost,
        selection: PlanSelectionV1::TopK { num_plans: 10_000 },
        ..DriverPolicyV1::default()
    }
}

fn plan_set(outcome: &RunOutcomeV1, below: i64) -> BTreeSet<Vec<u32>> {
    outcome
        .plans
        .iter()
        .filter(|p| p.cost() < below)
        .map(action_ids)
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Random worlds against the oracle
// ---------------------------------------------------------------------------

fn edge_world() -> impl Strategy<Value = EdgeWorld> {
    (2u32..=5).prop_flat_map(|n| {
        let action = (1i64..=3, prop::collection::vec((0..n, 0..n), 1..=2))
            .prop_map(|(cost, edges)| ActionSpec { cost, edges });
        (
            prop::collection::vec(0..n, 1..=2),
            prop::collection::vec(action, 1..=3),
        )
            .prop_map(move |(goals, actions)| EdgeWorld {
                state_count: n,
                goals,
                actions,
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn runs_match_brute_force(world in edge_world()) {
        for direction in DIRECTIONS {
            let outcome = run_world(&world, &exhaustive(direction, 2)).unwrap();
            prop_assert_ne!(outcome.termination, RunTerminationV1::FoundAllPlans);

            let expected = plans_up_to(&world, outcome.lower_bound - 1);
            let found: Vec<Vec<u32>> = outcome.plans.iter().map(action_ids).collect();
            let unique: BTreeSet<Vec<u32>> = found.iter().cloned().collect();
            prop_assert_eq!(unique.len(), found.len(), "{} returned a plan twice", direction.as_str());
            prop_assert_eq!(&unique, &expected, "{} plan set differs", direction.as_str());

            for plan in &outcome.plans {
                prop_assert!(replays(&world, plan), "{} returned an invalid path", direction.as_str());
                let summed: i64 = plan.actions().iter().map(|a| a.cost()).sum();
                prop_assert_eq!(plan.cost(), summed);
            }
            let costs = outcome.plan_costs();
            prop_assert!(costs.windows(2).all(|w| w[0] <= w[1]), "costs out of order: {costs:?}");

            let termination = if expected.is_empty() {
                RunTerminationV1::NoSolution
            } else {
                RunTerminationV1::HorizonExhausted
            };
            prop_assert_eq!(outcome.termination, termination);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Direction agreement on fixture worlds
// ---------------------------------------------------------------------------

fn assert_directions_agree(world: &dyn PlanningWorldV1, max_cost: i64) {
    let outcomes: Vec<RunOutcomeV1> = DIRECTIONS
        .iter()
        .map(|&d| run_world(world, &exhaustive(d, max_cost)).unwrap())
        .collect();
    let below = outcomes.iter().map(|o| o.lower_bound).min().unwrap();
    let reference = plan_set(&outcomes[0], below);
    assert!(!reference.is_empty(), "{}: no plans below {below}", world.world_id());
    for (direction, outcome) in DIRECTIONS.iter().zip(&outcomes).skip(1) {
        assert_eq!(
            plan_set(outcome, below),
            reference,
            "{}: {} disagrees with forward below cost {below}",
            world.world_id(),
            direction.as_str()
        );
    }
}

/// ACCEPTANCE: DRIVER-DIRECTIONS
#[test]
fn directions_agree_on_corridor() {
    assert_directions_agree(&Corridor, 6);
}

#[test]
fn directions_agree_on_zero_cost_diamond() {
    assert_directions_agree(&ZeroCostDiamond, 4);
    for direction in DIRECTIONS {
        let outcome = run_world(&ZeroCostDiamond, &exhaustive(direction, 4)).unwrap();
        assert_eq!(outcome.plan_costs(), vec![1, 1], "{}", direction.as_str());
        assert_eq!(outcome.termination, RunTerminationV1::HorizonExhausted);
    }
}

/// 0 <-> 1 at cost 0, 0 -> 2 at cost 1, goal 2. A zero-cost cycle runs
/// through the states both searches meet at.
#[test]
fn directions_agree_across_zero_cost_cycle() {
    let world = EdgeWorld {
        state_count: 3,
        goals: vec![2],
        actions: vec![
            ActionSpec::new(0, &[(0, 1)]),
            ActionSpec::new(0, &[(1, 0)]),
            ActionSpec::new(1, &[(0, 2)]),
        ],
    };
    assert_directions_agree(&world, 2);
    for direction in DIRECTIONS {
        let outcome = run_world(&world, &exhaustive(direction, 2)).unwrap();
        let plans: Vec<Vec<u32>> = outcome.plans.iter().map(action_ids).collect();
        assert_eq!(plans, vec![vec![2]], "{}", direction.as_str());
    }
}

#[test]
fn directions_agree_on_ring() {
    assert_directions_agree(&Ring::default(), 6);
}
