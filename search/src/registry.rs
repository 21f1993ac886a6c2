//! `SolutionRegistry`: ordered cut bookkeeping and the reconstruction loop.
//!
//! The registry collects every cut the searches report, keeps them sorted by
//! `(f, g)` with one entry per `(g, h)` pair, and turns the cheapest ones
//! into plans once the searches have proved no cheaper plan can appear.
//!
//! # Watermark
//!
//! `plan_cost_bound` is the smallest `f` reconstructed in the most recent
//! productive [`construct_cheaper_solutions`](SolutionRegistry::construct_cheaper_solutions)
//! call. Cuts are always consumed cheapest first, so a cut registered later
//! with `f` below the watermark describes plans that were already
//! enumerated; it is discarded without reconstruction.

use std::collections::VecDeque;

use tandem_kernel::carrier::state_set::StateSet;

use crate::cut::SolutionCut;
use crate::error::ReconstructionError;
use crate::layers::CostLayerView;
use crate::plan_store::PlanAcceptor;
use crate::policy::ReconstructionPolicyV1;
use crate::reconstruct::PlanReconstructor;
use crate::report::{CutEventV1, CutOutcomeV1, ReconstructionReportV1};

/// Ordered solution cuts plus the plan store they feed.
pub struct SolutionRegistry<S: StateSet, P: PlanAcceptor> {
    cuts: VecDeque<SolutionCut<S>>,
    plan_cost_bound: Option<i64>,
    states_on_goal_paths: S,
    plan_store: P,
    policy: ReconstructionPolicyV1,
    events: Vec<CutEventV1>,
}

impl<S: StateSet, P: PlanAcceptor> SolutionRegistry<S, P> {
    /// Create an empty registry owning `plan_store`.
    #[must_use]
    pub fn new(plan_store: P, policy: ReconstructionPolicyV1) -> Self {
        Self {
            cuts: VecDeque::new(),
            plan_cost_bound: None,
            states_on_goal_paths: S::empty(),
            plan_store,
            policy,
            events: Vec::new(),
        }
    }

    /// Record a cut, merging it into an existing entry with the same
    /// `(g, h)`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconstructionError::InvalidCut`] if `g` or `h` is negative
    /// or `g + h` overflows. The registry is unchanged on error.
    pub fn register_solution(&mut self, cut: SolutionCut<S>) -> Result<(), ReconstructionError> {
        let (g, h) = (cut.g(), cut.h());
        if g < 0 || h < 0 {
            return Err(ReconstructionError::InvalidCut {
                g,
                h,
                detail: "cost components must be non-negative".into(),
            });
        }
        if g.checked_add(h).is_none() {
            return Err(ReconstructionError::InvalidCut {
                g,
                h,
                detail: "g + h overflows".into(),
            });
        }

        let key = cut.key();
        match self.cuts.binary_search_by(|c| c.key().cmp(&key)) {
            Ok(i) => {
                self.cuts[i].merge(&cut);
                tracing::debug!(g, h, f = key.f, "merged solution cut");
            }
            Err(i) => {
                tracing::debug!(
                    g,
                    h,
                    f = key.f,
                    meeting_states = cut.states().len(),
                    position = i,
                    "registered solution cut"
                );
                self.cuts.insert(i, cut);
            }
        }
        Ok(())
    }

    /// Reconstruct plans from every registered cut with `f < bound`,
    /// cheapest first, until the quota is met.
    ///
    /// `bound` is the caller's proven lower bound: no plan cheaper than it
    /// remains undiscovered by the searches.
    ///
    /// # Errors
    ///
    /// Propagates consistency violations from reconstruction. The cut that
    /// failed stays registered and the watermark is not advanced.
    pub fn construct_cheaper_solutions(
        &mut self,
        bound: i64,
        view: &CostLayerView<'_, S>,
    ) -> Result<(), ReconstructionError> {
        let reconstructor = PlanReconstructor::new(view);
        let mut batch_min: Option<i64> = None;

        while !self.found_all_plans() {
            let budget = self.missing_plans();
            let Some(front) = self.cuts.front() else {
                break;
            };
            let key = front.key();
            if key.f >= bound {
                break;
            }

            if let Some(watermark) = self.plan_cost_bound {
                if key.f < watermark {
                    tracing::debug!(
                        g = key.g,
                        h = key.h,
                        f = key.f,
                        watermark,
                        "discarding cut below watermark"
                    );
                    self.events.push(CutEventV1 {
                        g: key.g,
                        h: key.h,
                        f: key.f,
                        meeting_states: front.states().len(),
                        outcome: CutOutcomeV1::BelowWatermark { watermark },
                    });
                    self.cuts.pop_front();
                    continue;
                }
            }

            if !self.plan_store.admits_cost(key.f) {
                tracing::info!(f = key.f, "plan store refuses cost; stopping");
                self.events.push(CutEventV1 {
                    g: key.g,
                    h: key.h,
                    f: key.f,
                    meeting_states: front.states().len(),
                    outcome: CutOutcomeV1::OutsideQualityBound,
                });
                self.plan_store.close_at_cost(key.f);
                break;
            }

            let outcome = reconstructor.reconstruct(front, budget, &mut self.plan_store)?;
            self.states_on_goal_paths = self.states_on_goal_paths.union(&outcome.goal_path_states);
            self.events.push(CutEventV1 {
                g: key.g,
                h: key.h,
                f: key.f,
                meeting_states: front.states().len(),
                outcome: CutOutcomeV1::Reconstructed {
                    accepted: outcome.accepted,
                    duplicates: outcome.duplicates,
                    filtered: outcome.filtered,
                },
            });
            tracing::debug!(
                g = key.g,
                h = key.h,
                f = key.f,
                accepted = outcome.accepted,
                duplicates = outcome.duplicates,
                filtered = outcome.filtered,
                "reconstructed cut"
            );
            batch_min = Some(batch_min.map_or(key.f, |m| m.min(key.f)));
            self.cuts.pop_front();
        }

        if let Some(watermark) = batch_min {
            debug_assert!(
                !matches!(self.plan_cost_bound, Some(w) if w > watermark),
                "watermark must not decrease"
            );
            self.plan_cost_bound = Some(watermark);
            tracing::info!(
                watermark,
                found = self.num_found_plans(),
                target = self.num_target_plans(),
                "plan cost bound advanced"
            );
        }
        Ok(())
    }

    /// Whether the quota is met.
    #[must_use]
    pub fn found_all_plans(&self) -> bool {
        self.plan_store.found_enough_plans() || self.num_found_plans() >= self.num_target_plans()
    }

    /// Plans accepted so far.
    #[must_use]
    pub fn num_found_plans(&self) -> usize {
        self.plan_store.accepted_count()
    }

    /// Plans the run aims for.
    #[must_use]
    pub fn num_target_plans(&self) -> usize {
        self.policy.target_plans(self.plan_store.desired_quota())
    }

    /// Plans still wanted.
    #[must_use]
    pub fn missing_plans(&self) -> usize {
        self.num_target_plans().saturating_sub(self.num_found_plans())
    }

    /// Union of all states on accepted plans.
    #[must_use]
    pub fn states_on_goal_paths(&self) -> &S {
        &self.states_on_goal_paths
    }

    /// Current watermark; `None` until something is reconstructed.
    #[must_use]
    pub fn plan_cost_bound(&self) -> Option<i64> {
        self.plan_cost_bound
    }

    /// Registered cuts, cheapest first.
    #[must_use]
    pub fn cuts(&self) -> &VecDeque<SolutionCut<S>> {
        &self.cuts
    }

    /// The owned plan store.
    #[must_use]
    pub fn plan_store(&self) -> &P {
        &self.plan_store
    }

    /// Give up the registry, keeping the plan store.
    #[must_use]
    pub fn into_plan_store(self) -> P {
        self.plan_store
    }

    /// Audit snapshot of every cut decision so far.
    #[must_use]
    pub fn report(&self) -> ReconstructionReportV1 {
        ReconstructionReportV1 {
            events: self.events.clone(),
            plan_cost_bound: self.plan_cost_bound,
            accepted_plans: self.num_found_plans(),
            target_plans: self.num_target_plans(),
            goal_path_states: self.states_on_goal_paths.len(),
        }
    }
}
