//! Backtracking derangement search.

use super::config::SolverConfig;
use super::state::{Frame, SolverState};
use super::types::{Assignment, SolverError};
use crate::model::ConstraintGraph;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Executes the assignment search.
pub struct Solver;

impl Solver {
    /// Searches for a derangement of `names` satisfying `graph`.
    ///
    /// Forced edges are committed first; a collision between two forced
    /// edges is reported before any search happens. The remaining givers
    /// are processed in seeded-shuffled order, depth first: at each level
    /// the giver tries its (shuffled) open recipients, committing the
    /// first one that leaves every deeper giver at least one candidate.
    /// A level with nothing left to try is undone through the decision
    /// trail.
    ///
    /// Identical `names` order, graph, and seed produce an identical
    /// assignment. The call holds no state and performs no I/O beyond
    /// `log` output, so attempts with different seeds can run
    /// concurrently.
    pub fn solve(
        names: &[String],
        graph: &ConstraintGraph,
        config: &SolverConfig,
    ) -> Result<Assignment, SolverError> {
        let n = names.len();
        let index: BTreeMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        // Index form of the graph. The model guarantees every referenced
        // name is a member of the set the graph was built from.
        let mut forced: Vec<Option<usize>> = vec![None; n];
        let mut blocked = vec![vec![false; n]; n];
        for (giver, constraints) in graph.iter() {
            let Some(&g) = index.get(giver) else {
                debug_assert!(false, "graph references {giver:?}, not in names");
                continue;
            };
            if let Some(forced_name) = constraints.forced.as_deref() {
                forced[g] = index.get(forced_name).copied();
            }
            for blocked_name in &constraints.blocked {
                if let Some(&r) = index.get(blocked_name.as_str()) {
                    blocked[g][r] = true;
                }
            }
        }

        let mut state = SolverState::new(n);

        // Seed forced edges. Per-giver conflicts were caught by the
        // model; a shared recipient across givers is only visible here.
        for g in 0..n {
            if let Some(r) = forced[g] {
                if let Some(first) = state.taker_of(r) {
                    return Err(SolverError::RecipientCollision {
                        recipient: names[r].clone(),
                        first: names[first].clone(),
                        second: names[g].clone(),
                    });
                }
                state.assign(g, r);
                trace!("forced edge {} -> {}", names[g], names[r]);
            }
        }

        let mut order: Vec<usize> = (0..n).filter(|&g| forced[g].is_none()).collect();

        // Root feasibility: a giver with nothing open can be named
        // before the search starts.
        for &g in &order {
            if !state.has_candidate(g, &blocked) {
                return Err(SolverError::Infeasible {
                    stuck: Some(names[g].clone()),
                });
            }
        }

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        order.shuffle(&mut rng);

        if order.is_empty() {
            return Ok(collect(names, &state));
        }

        let budget = config.max_backtracks;
        let mut steps: u64 = 0;

        let mut root_candidates = state.candidates_for(order[0], &blocked);
        root_candidates.shuffle(&mut rng);
        state.push_frame(Frame::new(order[0], root_candidates));

        // The top frame never carries a committed choice; every frame
        // beneath it does.
        loop {
            let Some(mut frame) = state.pop_frame() else {
                debug!("search exhausted after {steps} backtracking steps");
                return Err(SolverError::Infeasible { stuck: None });
            };
            let level = state.depth();

            let mut advanced = false;
            while let Some(r) = frame.next_candidate() {
                state.assign(frame.giver, r);
                if order[level + 1..]
                    .iter()
                    .all(|&g| state.has_candidate(g, &blocked))
                {
                    trace!("paired {} with {}", names[frame.giver], names[r]);
                    frame.chosen = Some(r);
                    advanced = true;
                    break;
                }
                state.unassign(frame.giver, r);
                trace!(
                    "rejected {} -> {}: a later giver would be left empty",
                    names[frame.giver],
                    names[r]
                );
                steps += 1;
                if budget > 0 && steps >= budget {
                    return Err(SolverError::Timeout { budget });
                }
            }

            if advanced {
                state.push_frame(frame);
                if state.depth() == order.len() {
                    debug!(
                        "assigned {} participants after {} backtracking steps",
                        n, steps
                    );
                    return Ok(collect(names, &state));
                }
                let giver = order[state.depth()];
                let mut candidates = state.candidates_for(giver, &blocked);
                candidates.shuffle(&mut rng);
                state.push_frame(Frame::new(giver, candidates));
            } else {
                trace!("no options left for {}", names[frame.giver]);
                let Some(mut parent) = state.pop_frame() else {
                    debug!("search exhausted after {steps} backtracking steps");
                    return Err(SolverError::Infeasible { stuck: None });
                };
                if let Some(r) = parent.chosen.take() {
                    state.unassign(parent.giver, r);
                    trace!("backtracking: undo {} -> {}", names[parent.giver], names[r]);
                    steps += 1;
                }
                state.push_frame(parent);
                if budget > 0 && steps >= budget {
                    return Err(SolverError::Timeout { budget });
                }
            }
        }
    }
}

fn collect(names: &[String], state: &SolverState) -> Assignment {
    let pairs = (0..names.len())
        .filter_map(|g| {
            state
                .recipient_of(g)
                .map(|r| (names[g].clone(), names[r].clone()))
        })
        .collect();
    Assignment::from_pairs(pairs)
}
