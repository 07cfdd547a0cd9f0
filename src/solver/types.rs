//! Assignment representation and solver errors.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors produced while searching for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// Two forced edges target the same recipient.
    ///
    /// The model cannot catch this: it tracks constraints per giver, and
    /// the collision is only visible across givers.
    #[error("forced recipient {recipient:?} is claimed by both {first:?} and {second:?}")]
    RecipientCollision {
        /// The recipient claimed twice.
        recipient: String,
        /// The giver whose forced edge was seeded first.
        first: String,
        /// The giver whose forced edge collided.
        second: String,
    },

    /// The constraints admit no valid assignment.
    #[error("constraints admit no valid assignment{}", stuck_detail(.stuck))]
    Infeasible {
        /// A giver observed with no remaining candidates, when the search
        /// can name one.
        stuck: Option<String>,
    },

    /// The backtrack budget was exhausted before the search concluded.
    #[error("search gave up after {budget} backtracking steps")]
    Timeout {
        /// The configured budget.
        budget: u64,
    },
}

fn stuck_detail(stuck: &Option<String>) -> String {
    match stuck {
        Some(giver) => format!(" (no candidates remain for {giver:?})"),
        None => String::new(),
    }
}

/// A completed pairing: a derangement of the participant set.
///
/// Total and injective — every participant gives exactly once and
/// receives exactly once, and nobody is paired with themselves.
/// Immutable once returned by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairs: BTreeMap<String, String>,
}

impl Assignment {
    pub(crate) fn from_pairs(pairs: BTreeMap<String, String>) -> Self {
        Self { pairs }
    }

    /// The recipient assigned to `giver`, if `giver` participates.
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.pairs.get(giver).map(String::as_str)
    }

    /// Iterates over `(giver, recipient)` pairs in giver name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(g, r)| (g.as_str(), r.as_str()))
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the assignment is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Byte length of the longest recipient name.
    ///
    /// The artifact emitter pads every payload to a uniform width derived
    /// from this, so artifact size does not reveal the recipient.
    pub fn longest_recipient_len(&self) -> usize {
        self.pairs.values().map(|r| r.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        Assignment::from_pairs(
            pairs
                .iter()
                .map(|(g, r)| (g.to_string(), r.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_accessors() {
        let a = assignment(&[("ann", "bo"), ("bo", "celeste"), ("celeste", "ann")]);

        assert_eq!(a.len(), 3);
        assert!(!a.is_empty());
        assert_eq!(a.recipient_of("ann"), Some("bo"));
        assert_eq!(a.recipient_of("zed"), None);
        assert_eq!(a.longest_recipient_len(), "celeste".len());

        let pairs: Vec<_> = a.iter().collect();
        assert_eq!(pairs[0], ("ann", "bo"));
    }

    #[test]
    fn test_error_messages_name_participants() {
        let collision = SolverError::RecipientCollision {
            recipient: "c".into(),
            first: "a".into(),
            second: "b".into(),
        };
        let text = collision.to_string();
        assert!(text.contains("\"c\""));
        assert!(text.contains("\"a\""));
        assert!(text.contains("\"b\""));

        let stuck = SolverError::Infeasible {
            stuck: Some("d".into()),
        };
        assert!(stuck.to_string().contains("\"d\""));

        let generic = SolverError::Infeasible { stuck: None };
        assert!(generic.to_string().contains("no valid assignment"));
    }
}
