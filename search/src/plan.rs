//! `Plan`: a reconstructed action sequence from the initial state to a goal.

use std::collections::BTreeSet;

use tandem_kernel::carrier::state::ConcreteState;
use tandem_kernel::operators::action::Action;
use tandem_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_PLAN};

/// An ordered action sequence plus the concrete states it visits.
///
/// `states[0]` is the initial state, `states[i + 1]` the result of applying
/// `actions[i]` to `states[i]`, and the last state is a goal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<Action>,
    states: Vec<ConcreteState>,
}

impl Plan {
    /// Assemble a plan. `states` must hold exactly one more entry than
    /// `actions`.
    #[must_use]
    pub fn new(actions: Vec<Action>, states: Vec<ConcreteState>) -> Self {
        debug_assert_eq!(
            states.len(),
            actions.len() + 1,
            "a plan visits one more state than it has actions"
        );
        Self { actions, states }
    }

    /// The actions, in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The visited states, initial state first.
    #[must_use]
    pub fn states(&self) -> &[ConcreteState] {
        &self.states
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the plan has no actions (initial state is a goal).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sum of action costs.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.actions
            .iter()
            .fold(0_i64, |acc, a| acc.saturating_add(a.cost()))
    }

    /// Whether no state is visited twice.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.states.iter().all(|s| seen.insert(s))
    }

    /// Identity of the action sequence.
    ///
    /// Two plans with the same actions in the same order share a
    /// fingerprint regardless of how they were reconstructed. Each action
    /// contributes `id (u32 LE) || name_len (u32 LE) || name bytes`.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let mut bytes = Vec::with_capacity(self.actions.len() * 16);
        for action in &self.actions {
            bytes.extend_from_slice(&action.id().to_le_bytes());
            let name = action.name().as_bytes();
            let name_len = u32::try_from(name.len()).unwrap_or(u32::MAX);
            bytes.extend_from_slice(&name_len.to_le_bytes());
            bytes.extend_from_slice(name);
        }
        canonical_hash(DOMAIN_PLAN, &bytes)
    }

    /// Deterministic JSON rendering.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "actions": self.actions.iter().map(|a| serde_json::json!({
                "cost": a.cost(),
                "id": a.id(),
                "name": a.name(),
            })).collect::<Vec<_>>(),
            "cost": self.cost(),
            "fingerprint": self.fingerprint().as_str(),
            "states": self.states.iter().map(|s| s.values().to_vec()).collect::<Vec<_>>(),
        })
    }
}
