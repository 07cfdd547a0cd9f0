//! Constraint graph representation and model errors.

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors detected while normalizing constraint declarations.
///
/// All variants are deterministic and non-retryable: the input has to be
/// fixed. Each names the offending participant(s) and, where it helps,
/// the declaration the name appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The participant list is empty.
    #[error("the participant list is empty")]
    NoParticipants,

    /// The same name appears twice in the participant list.
    #[error("duplicate participant {name:?}")]
    DuplicateParticipant {
        /// The repeated name.
        name: String,
    },

    /// A constraint references a name that is not a participant.
    #[error("{name:?} in {declared_in:?} is not a participant")]
    UnknownParticipant {
        /// The unknown name.
        name: String,
        /// The input field the name appeared in.
        declared_in: &'static str,
    },

    /// A participant is forced or blocked against itself.
    #[error("{name:?} in {declared_in:?} references itself")]
    SelfReference {
        /// The self-referencing participant.
        name: String,
        /// The input field the reference appeared in.
        declared_in: &'static str,
    },

    /// Two force declarations assign different recipients to one giver.
    #[error("conflicting forced recipients for {giver:?}: {existing:?} and {requested:?}")]
    ConflictingForce {
        /// The giver with two forced recipients.
        giver: String,
        /// The recipient forced first.
        existing: String,
        /// The recipient a later declaration tried to force.
        requested: String,
    },

    /// A pair is declared both forced and blocked.
    #[error("{giver:?} is forced to {recipient:?}, but that pair is also blocked")]
    ForceBlockConflict {
        /// The giver of the contradictory pair.
        giver: String,
        /// The recipient of the contradictory pair.
        recipient: String,
    },
}

/// Constraints attached to a single giver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantConstraints {
    /// The recipient this giver must be paired with, if any.
    pub forced: Option<String>,
    /// Recipients this giver must not be paired with.
    pub blocked: BTreeSet<String>,
}

/// Canonical per-participant constraint form.
///
/// Built by [`ConstraintGraph::build`]. Two-way declarations are expanded
/// into both directed edges, so the graph never stores asymmetric state
/// for a declared-symmetric pair. Invariants established at build time:
/// every referenced name is a participant, no participant is constrained
/// against itself, each giver has at most one forced recipient, and a
/// forced recipient is never also blocked for the same giver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintGraph {
    pub(crate) entries: BTreeMap<String, ParticipantConstraints>,
}

impl ConstraintGraph {
    /// Returns the constraints for a giver, if it has any.
    pub fn get(&self, giver: &str) -> Option<&ParticipantConstraints> {
        self.entries.get(giver)
    }

    /// Returns the forced recipient for a giver, if any.
    pub fn forced_of(&self, giver: &str) -> Option<&str> {
        self.entries
            .get(giver)
            .and_then(|c| c.forced.as_deref())
    }

    /// Whether `recipient` is blocked for `giver`.
    pub fn is_blocked(&self, giver: &str, recipient: &str) -> bool {
        self.entries
            .get(giver)
            .is_some_and(|c| c.blocked.contains(recipient))
    }

    /// Iterates over all constrained givers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParticipantConstraints)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Number of givers that carry at least one constraint.
    pub fn constrained_count(&self) -> usize {
        self.entries.len()
    }
}
