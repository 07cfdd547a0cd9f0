//! Constrained derangement search.
//!
//! Finds a total assignment giver → recipient over the participant set:
//! a permutation with no fixed points that contains every forced pair and
//! avoids every blocked pair. Equivalent to perfect matching in a
//! bipartite graph with forbidden edges, so the search backtracks and can
//! legitimately conclude that no assignment exists.

mod config;
mod runner;
mod state;
mod types;

pub use config::SolverConfig;
pub use runner::Solver;
pub use types::{Assignment, SolverError};
