//! Constrained secret-pair assignment.
//!
//! Given a set of participant names and four constraint classes —
//! mutual-force, mutual-block, directed-force, directed-block — compute a
//! total assignment in which every participant is paired with exactly one
//! *other* participant (a derangement), every forced pair is present, and
//! no blocked pair appears. The search is randomized so repeated runs
//! produce different valid pairings, and seed-reproducible so a run can be
//! replayed exactly.
//!
//! # Components
//!
//! - [`model`]: normalizes raw constraint declarations into a
//!   [`ConstraintGraph`](model::ConstraintGraph), rejecting contradictory
//!   input before any search starts.
//! - [`solver`]: backtracking derangement search over the constraint
//!   graph, producing an [`Assignment`](solver::Assignment) or a
//!   structured infeasibility report.
//! - [`params`]: the JSON parameter-file collaborator.
//! - [`emit`]: writes one sealed archive per participant, naming only
//!   that participant's assigned counterpart.
//!
//! # Architecture
//!
//! The model and solver are pure: no I/O, no global state, one
//! `SolverState` per call. Everything file-shaped (parameter loading,
//! archive writing, the CLI in `main.rs`) is a thin wrapper around them.

pub mod emit;
pub mod model;
pub mod params;
pub mod solver;
