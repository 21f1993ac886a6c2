//! Carrier module: concrete states and state sets.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod state;
pub mod state_set;
