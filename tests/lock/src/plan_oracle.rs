//! Brute-force plan enumeration for edge-list worlds.
//!
//! Only meaningful for worlds whose actions all cost at least 1; zero-cost
//! cycles make the plan space infinite.

use std::collections::BTreeSet;

use tandem_search::plan::Plan;

use crate::edge_world::EdgeWorld;

/// Action-id sequences of every plan with cost at most `max_cost`.
///
/// Plans are identified by their action sequence; several state paths with
/// the same actions count once.
///
/// # Panics
///
/// Panics if the world has an action that costs less than 1.
#[must_use]
pub fn plans_up_to(world: &EdgeWorld, max_cost: i64) -> BTreeSet<Vec<u32>> {
    assert!(
        world.actions.iter().all(|a| a.cost >= 1),
        "oracle requires positive action costs"
    );
    let mut found = BTreeSet::new();
    let mut stack: Vec<(u32, i64, Vec<u32>)> = vec![(0, 0, Vec::new())];
    while let Some((state, cost, actions)) = stack.pop() {
        if world.is_goal(state) {
            found.insert(actions.clone());
        }
        for (i, spec) in world.actions.iter().enumerate() {
            let next_cost = cost + spec.cost;
            if next_cost > max_cost {
                continue;
            }
            let id = u32::try_from(i).unwrap();
            for &(from, to) in &spec.edges {
                if from == state {
                    let mut next = actions.clone();
                    next.push(id);
                    stack.push((to, next_cost, next));
                }
            }
        }
    }
    found
}

/// Action ids of `plan`, in order.
#[must_use]
pub fn action_ids(plan: &Plan) -> Vec<u32> {
    plan.actions().iter().map(|a| a.id()).collect()
}

/// Action names of `plan`, in order.
#[must_use]
pub fn action_names(plan: &Plan) -> Vec<&str> {
    plan.actions().iter().map(|a| a.name()).collect()
}

/// Whether `plan` is a real path in `world`: starts at `0`, ends in a goal,
/// and every step is an edge of the action taken.
#[must_use]
pub fn replays(world: &EdgeWorld, plan: &Plan) -> bool {
    let states: Vec<u32> = plan.states().iter().map(|s| s.values()[0]).collect();
    if states.first() != Some(&0) || !states.last().is_some_and(|&s| world.is_goal(s)) {
        return false;
    }
    plan.actions().iter().enumerate().all(|(i, action)| {
        world
            .actions
            .get(action.id() as usize)
            .is_some_and(|spec| {
                spec.cost == action.cost() && spec.edges.contains(&(states[i], states[i + 1]))
            })
    })
}
