//! Shared fixtures for the lock tests.
//!
//! `edge_world` builds small explicit worlds from plain edge lists;
//! `plan_oracle` enumerates their plans by brute force so tests can check
//! the registry against ground truth.

pub mod edge_world;
pub mod plan_oracle;
