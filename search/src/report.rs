//! Reconstruction audit report: every cut decision the registry made.

use tandem_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tandem_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RECONSTRUCTION_REPORT};

/// What happened to one cut taken off the front of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutOutcomeV1 {
    /// Plans were reconstructed from the cut.
    Reconstructed {
        accepted: usize,
        duplicates: usize,
        filtered: usize,
    },
    /// Discarded: cheaper than the watermark, so its plans were already
    /// found.
    BelowWatermark { watermark: i64 },
    /// The plan store refused this cost; the run stops here.
    OutsideQualityBound,
}

/// One cut decision, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutEventV1 {
    pub g: i64,
    pub h: i64,
    pub f: i64,
    /// Number of concrete meeting states in the cut.
    pub meeting_states: usize,
    pub outcome: CutOutcomeV1,
}

/// Snapshot of the registry's decisions and counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionReportV1 {
    pub events: Vec<CutEventV1>,
    /// Final watermark; `None` if nothing was reconstructed.
    pub plan_cost_bound: Option<i64>,
    pub accepted_plans: usize,
    pub target_plans: usize,
    pub goal_path_states: usize,
}

impl ReconstructionReportV1 {
    /// Render as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "accepted_plans": self.accepted_plans,
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "goal_path_states": self.goal_path_states,
            "plan_cost_bound": self.plan_cost_bound,
            "target_plans": self.target_plans,
        })
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_RECONSTRUCTION_REPORT, &bytes))
    }
}

fn event_to_json(e: &CutEventV1) -> serde_json::Value {
    serde_json::json!({
        "f": e.f,
        "g": e.g,
        "h": e.h,
        "meeting_states": e.meeting_states,
        "outcome": outcome_to_json(e.outcome),
    })
}

fn outcome_to_json(outcome: CutOutcomeV1) -> serde_json::Value {
    match outcome {
        CutOutcomeV1::Reconstructed {
            accepted,
            duplicates,
            filtered,
        } => serde_json::json!({
            "accepted": accepted,
            "duplicates": duplicates,
            "filtered": filtered,
            "type": "reconstructed",
        }),
        CutOutcomeV1::BelowWatermark { watermark } => {
            serde_json::json!({"type": "below_watermark", "watermark": watermark})
        }
        CutOutcomeV1::OutsideQualityBound => serde_json::json!({"type": "outside_quality_bound"}),
    }
}
