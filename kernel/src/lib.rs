//! Tandem Kernel: state, operator, and hashing primitives shared by the
//! plan reconstruction core and its collaborators.
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators`; `proof` depends on neither.
//!
//! `carrier` holds concrete states and the boolean-function state-set
//! contract. `operators` holds actions and transition relations over state
//! sets. `proof` holds canonical hashing and canonical JSON, used for plan
//! fingerprints and audit digests.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod proof;
