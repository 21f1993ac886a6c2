//! Grounded actions.

use std::fmt;

use crate::operators::OperatorError;

/// A grounded, schema-valid action with a non-negative integer cost.
///
/// Identity is `(id, name, cost)`; plans compare by their action sequences,
/// so two actions are interchangeable only if all three agree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Action {
    id: u32,
    name: String,
    cost: i64,
}

impl Action {
    /// Construct an action.
    ///
    /// # Errors
    ///
    /// Returns [`OperatorError::NegativeCost`] if `cost < 0`.
    pub fn new(id: u32, name: impl Into<String>, cost: i64) -> Result<Self, OperatorError> {
        let name = name.into();
        if cost < 0 {
            return Err(OperatorError::NegativeCost { name, cost });
        }
        Ok(Self { id, name, cost })
    }

    /// Operator index within its task.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Human-readable operator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action cost (never negative).
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Whether the action can connect states inside one cost layer.
    #[must_use]
    pub fn is_zero_cost(&self) -> bool {
        self.cost == 0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) [{}]", self.name, self.cost)
    }
}
