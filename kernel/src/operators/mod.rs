//! Operators: grounded actions and transition relations grouped by cost.

pub mod action;
pub mod transition;

/// Typed failure for operator construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorError {
    /// Action costs are non-negative integers.
    #[error("action {name} has negative cost {cost}")]
    NegativeCost { name: String, cost: i64 },
}
