//! Constraint graph construction and validation.

use super::types::{ConstraintGraph, ModelError, ParticipantConstraints};
use std::collections::BTreeSet;

impl ConstraintGraph {
    /// Builds the canonical constraint graph from raw declarations.
    ///
    /// `force` maps a giver to the recipient it must be paired with;
    /// `block` maps a giver to recipients it must not be paired with.
    /// Each two-way entry expands into both directed edges with the same
    /// polarity.
    ///
    /// Fails fast on anything that can be rejected without solving:
    /// empty or duplicated participant lists, references to non-members,
    /// self-references, a giver with two different forced recipients, and
    /// pairs that are both forced and blocked. No randomness, no I/O.
    pub fn build(
        names: &[String],
        twoway_force: &[(String, String)],
        twoway_block: &[(String, String)],
        force: &[(String, String)],
        block: &[(String, Vec<String>)],
    ) -> Result<ConstraintGraph, ModelError> {
        if names.is_empty() {
            return Err(ModelError::NoParticipants);
        }

        let mut members: BTreeSet<&str> = BTreeSet::new();
        for name in names {
            if !members.insert(name.as_str()) {
                return Err(ModelError::DuplicateParticipant { name: name.clone() });
            }
        }

        let mut graph = ConstraintGraph::default();

        for (giver, recipient) in force {
            check_member(giver, &members, "force")?;
            check_member(recipient, &members, "force")?;
            check_distinct(giver, recipient, "force")?;
            add_force(&mut graph, giver, recipient)?;
        }

        for (giver, recipients) in block {
            check_member(giver, &members, "block")?;
            for recipient in recipients {
                check_member(recipient, &members, "block")?;
                check_distinct(giver, recipient, "block")?;
                add_block(&mut graph, giver, recipient);
            }
        }

        for (left, right) in twoway_force {
            check_member(left, &members, "twoway_force")?;
            check_member(right, &members, "twoway_force")?;
            check_distinct(left, right, "twoway_force")?;
            add_force(&mut graph, left, right)?;
            add_force(&mut graph, right, left)?;
        }

        for (left, right) in twoway_block {
            check_member(left, &members, "twoway_block")?;
            check_member(right, &members, "twoway_block")?;
            check_distinct(left, right, "twoway_block")?;
            add_block(&mut graph, left, right);
            add_block(&mut graph, right, left);
        }

        // Force/block contradictions are checked after all expansion so
        // the outcome does not depend on declaration order.
        for (giver, constraints) in &graph.entries {
            if let Some(forced) = &constraints.forced {
                if constraints.blocked.contains(forced) {
                    return Err(ModelError::ForceBlockConflict {
                        giver: giver.clone(),
                        recipient: forced.clone(),
                    });
                }
            }
        }

        Ok(graph)
    }
}

fn check_member(
    name: &str,
    members: &BTreeSet<&str>,
    declared_in: &'static str,
) -> Result<(), ModelError> {
    if members.contains(name) {
        Ok(())
    } else {
        Err(ModelError::UnknownParticipant {
            name: name.to_owned(),
            declared_in,
        })
    }
}

fn check_distinct(a: &str, b: &str, declared_in: &'static str) -> Result<(), ModelError> {
    if a == b {
        Err(ModelError::SelfReference {
            name: a.to_owned(),
            declared_in,
        })
    } else {
        Ok(())
    }
}

fn add_force(graph: &mut ConstraintGraph, giver: &str, recipient: &str) -> Result<(), ModelError> {
    let entry = graph
        .entries
        .entry(giver.to_owned())
        .or_default();
    match &entry.forced {
        Some(existing) if existing != recipient => Err(ModelError::ConflictingForce {
            giver: giver.to_owned(),
            existing: existing.clone(),
            requested: recipient.to_owned(),
        }),
        _ => {
            entry.forced = Some(recipient.to_owned());
            Ok(())
        }
    }
}

fn add_block(graph: &mut ConstraintGraph, giver: &str, recipient: &str) {
    let entry = graph
        .entries
        .entry(giver.to_owned())
        .or_default();
    let _ = entry.blocked.insert(recipient.to_owned());
}
