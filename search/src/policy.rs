//! Reconstruction policy types.

/// Registry-level reconstruction configuration.
///
/// The plan quota itself belongs to the plan store; this policy only
/// narrows how the registry spends it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconstructionPolicyV1 {
    /// Reconstruct at most one plan per cut and treat the first accepted
    /// plan as the end of the run.
    pub single_solution: bool,
}

impl ReconstructionPolicyV1 {
    /// Number of plans the registry aims for, given the store's quota.
    #[must_use]
    pub fn target_plans(&self, store_quota: usize) -> usize {
        if self.single_solution {
            store_quota.min(1)
        } else {
            store_quota
        }
    }
}
