//! Proof module: canonical hashing and canonical JSON.
//!
//! Nothing depends on `proof` within the kernel.

pub mod canon;
pub mod hash;
