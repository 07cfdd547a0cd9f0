//! Constraint normalization.
//!
//! Turns the raw constraint declarations (directed and two-way, force and
//! block) into a canonical per-participant form, validating everything
//! that can be rejected before solving.

mod builder;
mod types;

pub use types::{ConstraintGraph, ModelError, ParticipantConstraints};
