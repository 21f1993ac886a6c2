//! Tandem Harness: layered producers, the run driver, and fixture worlds.
//!
//! The harness closes cost layers forward from the initial state and
//! backward from the goals, reports every layer intersection to the
//! registry as a solution cut, and raises the proven lower bound so the
//! registry can reconstruct plans cheapest first.
//!
//! The harness does NOT reconstruct plans itself; it delegates to
//! `tandem_search`. Worlds provide task data only; the harness owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod layered;
pub mod policy;
pub mod runner;
pub mod worlds;
