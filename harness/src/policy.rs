//! Driver policy: which directions to search, how far, and which plans to
//! keep.
//!
//! The driver derives the plan store and the registry policy from a
//! [`DriverPolicyV1`]; worlds never declare policy.

use tandem_search::error::ReconstructionError;
use tandem_search::plan_store::{PlanDatabase, PlanSelectionV1};
use tandem_search::policy::ReconstructionPolicyV1;

/// Default cost horizon for driver runs.
const DEFAULT_MAX_COST: i64 = 64;

/// Which layered searches the driver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirectionV1 {
    /// Forward only; cuts are forward layers meeting the goal states.
    Forward,
    /// Backward only; cuts are backward layers meeting the initial state.
    Backward,
    /// Both; cuts are forward layers meeting backward layers.
    Bidirectional,
}

impl SearchDirectionV1 {
    /// Whether the forward search runs.
    #[must_use]
    pub fn uses_forward(self) -> bool {
        matches!(self, Self::Forward | Self::Bidirectional)
    }

    /// Whether the backward search runs.
    #[must_use]
    pub fn uses_backward(self) -> bool {
        matches!(self, Self::Backward | Self::Bidirectional)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Bidirectional => "bidirectional",
        }
    }
}

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPolicyV1 {
    pub direction: SearchDirectionV1,
    /// Largest layer cost either search closes.
    pub max_cost: i64,
    pub selection: PlanSelectionV1,
    /// Reject plans that visit a state twice.
    pub simple_plans_only: bool,
    /// Stop after the first accepted plan.
    pub single_solution: bool,
}

impl Default for DriverPolicyV1 {
    fn default() -> Self {
        Self {
            direction: SearchDirectionV1::Bidirectional,
            max_cost: DEFAULT_MAX_COST,
            selection: PlanSelectionV1::default(),
            simple_plans_only: false,
            single_solution: false,
        }
    }
}

impl DriverPolicyV1 {
    /// Validate the policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructionError::UnsupportedPolicy`] if `max_cost` is
    /// negative or the selection does not validate.
    pub fn validate(&self) -> Result<(), ReconstructionError> {
        if self.max_cost < 0 {
            return Err(ReconstructionError::UnsupportedPolicy {
                detail: format!("max_cost must be non-negative, got {}", self.max_cost),
            });
        }
        self.selection.validate()
    }

    /// The registry policy this run uses.
    #[must_use]
    pub fn reconstruction_policy(&self) -> ReconstructionPolicyV1 {
        ReconstructionPolicyV1 {
            single_solution: self.single_solution,
        }
    }

    /// Build the plan store this run feeds.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructionError::UnsupportedPolicy`] if the selection
    /// does not validate.
    pub fn plan_database(&self) -> Result<PlanDatabase, ReconstructionError> {
        Ok(PlanDatabase::new(self.selection)?.with_simple_plans_only(self.simple_plans_only))
    }

    /// JSON rendering for run reports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let selection = match self.selection {
            PlanSelectionV1::TopK { num_plans } => {
                serde_json::json!({"num_plans": num_plans, "type": "top_k"})
            }
            PlanSelectionV1::TopQ {
                num_plans,
                quality_percent,
            } => serde_json::json!({
                "num_plans": num_plans,
                "quality_percent": quality_percent,
                "type": "top_q",
            }),
        };
        serde_json::json!({
            "direction": self.direction.as_str(),
            "max_cost": self.max_cost,
            "selection": selection,
            "simple_plans_only": self.simple_plans_only,
            "single_solution": self.single_solution,
        })
    }
}
