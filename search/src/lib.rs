//! Tandem Search: solution bookkeeping and plan reconstruction for
//! bidirectional symbolic search.
//!
//! Two layered searches (forward from the initial state, backward from the
//! goal) report *solution cuts* whenever their frontiers intersect. This
//! crate keeps those cuts ordered, decides which ones still matter, and turns
//! each relevant cut into concrete, deduplicated plans by walking the closed
//! layers both searches recorded.
//!
//! # Crate dependency graph
//!
//! ```text
//! tandem_kernel  ←  tandem_search  ←  tandem_harness
//! (states, ops)      (cuts, DFS)       (producers, driver, worlds)
//! ```
//!
//! # Key types
//!
//! - [`SolutionCut`](cut::SolutionCut): a mergeable `(g, h, states)` meeting point
//! - [`SolutionRegistry`](registry::SolutionRegistry): ordered cuts, watermark, quota
//! - [`PlanReconstructor`](reconstruct::PlanReconstructor): bidirectional layered DFS
//! - [`CostLayerView`](layers::CostLayerView): borrowed read-only view of both searches
//! - [`PlanDatabase`](plan_store::PlanDatabase): deduplicating plan acceptance store
//! - [`PlanningTaskV1`](contract::PlanningTaskV1): trait for tasks the core reconstructs over

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod cut;
pub mod error;
pub mod layers;
pub mod plan;
pub mod plan_store;
pub mod policy;
pub mod reconstruct;
pub mod registry;
pub mod report;
