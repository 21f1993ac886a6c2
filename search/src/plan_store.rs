//! Plan store contract and the deduplicating plan database.
//!
//! The registry owns one [`PlanAcceptor`] for the lifetime of a run and
//! hands every reconstructed plan to it. The store decides whether a plan
//! counts toward the quota.

use std::collections::BTreeSet;

use crate::error::ReconstructionError;
use crate::plan::Plan;

/// Outcome of submitting a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanVerdictV1 {
    /// New plan; counts toward the quota.
    Accepted,
    /// Same action sequence as an already accepted plan.
    Duplicate,
    /// Rejected by a selection filter (not simple, outside quality bound,
    /// quota already met).
    Filtered,
}

impl PlanVerdictV1 {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Duplicate => "duplicate",
            Self::Filtered => "filtered",
        }
    }
}

/// Anything that can receive reconstructed plans.
///
/// # Contract
///
/// - `submit` is the only mutation path for accepted plans; a `Duplicate` or
///   `Filtered` verdict leaves `accepted_count` unchanged.
/// - `accepted_count` never decreases.
/// - Once `found_enough_plans` is true it stays true.
pub trait PlanAcceptor {
    /// Offer a plan.
    fn submit(&mut self, plan: Plan) -> PlanVerdictV1;

    /// Number of plans the run is asked to find.
    fn desired_quota(&self) -> usize;

    /// Number of plans accepted so far.
    fn accepted_count(&self) -> usize;

    /// Whether no further plan is wanted.
    fn found_enough_plans(&self) -> bool {
        self.accepted_count() >= self.desired_quota()
    }

    /// Whether plans of cost `cost` may still be accepted.
    fn admits_cost(&self, cost: i64) -> bool {
        let _ = cost;
        true
    }

    /// Called when the registry stops at a cost the store refused. After
    /// this, `found_enough_plans` must report true.
    fn close_at_cost(&mut self, cost: i64) {
        let _ = cost;
    }
}

/// Plan selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSelectionV1 {
    /// The `num_plans` cheapest distinct plans.
    TopK { num_plans: usize },
    /// Distinct plans costing at most `quality_percent / 100` times the
    /// optimal cost, at most `num_plans` of them.
    TopQ {
        num_plans: usize,
        quality_percent: u32,
    },
}

impl PlanSelectionV1 {
    /// Upper limit on accepted plans.
    #[must_use]
    pub fn num_plans(&self) -> usize {
        match *self {
            Self::TopK { num_plans } | Self::TopQ { num_plans, .. } => num_plans,
        }
    }

    /// Validate the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructionError::UnsupportedPolicy`] if `num_plans` is
    /// zero or `quality_percent` is below 100.
    pub fn validate(&self) -> Result<(), ReconstructionError> {
        if self.num_plans() == 0 {
            return Err(ReconstructionError::UnsupportedPolicy {
                detail: "num_plans must be at least 1".into(),
            });
        }
        if let Self::TopQ {
            quality_percent, ..
        } = *self
        {
            if quality_percent < 100 {
                return Err(ReconstructionError::UnsupportedPolicy {
                    detail: format!("quality_percent must be at least 100, got {quality_percent}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for PlanSelectionV1 {
    fn default() -> Self {
        Self::TopK { num_plans: 1 }
    }
}

/// Deduplicating in-memory plan store.
///
/// Plans are kept in acceptance order. The dedup key is
/// [`Plan::fingerprint`]; the fingerprint set is a `BTreeSet` so its
/// iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct PlanDatabase {
    selection: PlanSelectionV1,
    simple_plans_only: bool,
    plans: Vec<Plan>,
    fingerprints: BTreeSet<String>,
    optimal_cost: Option<i64>,
    closed: bool,
}

impl PlanDatabase {
    /// Create a plan database.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructionError::UnsupportedPolicy`] if `selection` does
    /// not validate.
    pub fn new(selection: PlanSelectionV1) -> Result<Self, ReconstructionError> {
        selection.validate()?;
        Ok(Self {
            selection,
            simple_plans_only: false,
            plans: Vec::new(),
            fingerprints: BTreeSet::new(),
            optimal_cost: None,
            closed: false,
        })
    }

    /// Reject plans that visit a state twice.
    #[must_use]
    pub fn with_simple_plans_only(mut self, simple_plans_only: bool) -> Self {
        self.simple_plans_only = simple_plans_only;
        self
    }

    /// The selection strategy.
    #[must_use]
    pub fn selection(&self) -> PlanSelectionV1 {
        self.selection
    }

    /// Accepted plans, in acceptance order.
    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Take the accepted plans.
    #[must_use]
    pub fn into_plans(self) -> Vec<Plan> {
        self.plans
    }

    /// Cost of the first accepted plan.
    #[must_use]
    pub fn optimal_cost(&self) -> Option<i64> {
        self.optimal_cost
    }

    fn within_quality(&self, cost: i64) -> bool {
        match (self.selection, self.optimal_cost) {
            (PlanSelectionV1::TopQ { quality_percent, .. }, Some(best)) => {
                i128::from(cost) * 100 <= i128::from(best) * i128::from(quality_percent)
            }
            _ => true,
        }
    }
}

impl PlanAcceptor for PlanDatabase {
    fn submit(&mut self, plan: Plan) -> PlanVerdictV1 {
        if self.found_enough_plans() {
            return PlanVerdictV1::Filtered;
        }
        let cost = plan.cost();
        if !self.within_quality(cost) {
            return PlanVerdictV1::Filtered;
        }
        if self.simple_plans_only && !plan.is_simple() {
            return PlanVerdictV1::Filtered;
        }
        if !self.fingerprints.insert(plan.fingerprint().hex_digest().to_string()) {
            return PlanVerdictV1::Duplicate;
        }
        if self.optimal_cost.is_none() {
            self.optimal_cost = Some(cost);
        }
        self.plans.push(plan);
        PlanVerdictV1::Accepted
    }

    fn desired_quota(&self) -> usize {
        self.selection.num_plans()
    }

    fn accepted_count(&self) -> usize {
        self.plans.len()
    }

    fn found_enough_plans(&self) -> bool {
        self.closed || self.plans.len() >= self.selection.num_plans()
    }

    fn admits_cost(&self, cost: i64) -> bool {
        self.within_quality(cost)
    }

    fn close_at_cost(&mut self, cost: i64) {
        if !self.within_quality(cost) {
            self.closed = true;
        }
    }
}
