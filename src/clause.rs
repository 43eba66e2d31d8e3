//! Clause splitting and canonical reordering.
//!
//! Sequences are split at coordinating conjunctions first; failing that, a
//! single dependent clause is carved out at the first subordinator. Each
//! clause is reordered independently into subject-verb-object order and the
//! pieces are reassembled with their conjunctions and punctuation.

use serde::{Deserialize, Serialize};

use crate::svo::extract_svo_components;
use crate::tag;
use crate::token::TaggedToken;

/// Partition of a tag sequence into main and dependent clause indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClausePartition {
    /// Indices belonging to the main clause
    pub main: Vec<usize>,
    /// Indices belonging to the dependent clause
    pub dependent: Vec<usize>,
    /// Positions of all subordinator tokens
    pub subordinator_positions: Vec<usize>,
}

/// Split the sequence into main and dependent clauses at the first
/// subordinator.
///
/// With no subordinator the whole sequence is one main clause. A
/// subordinator within the first three tokens puts the dependent clause
/// first, bounded by the first following comma or the sequence midpoint;
/// otherwise the main clause is the prefix and the dependent clause runs
/// from the subordinator to the end.
pub fn identify_clauses(tags: &[TaggedToken]) -> ClausePartition {
    let mut partition = ClausePartition::default();

    let subordinators: Vec<usize> = tags
        .iter()
        .enumerate()
        .filter(|(_, t)| tag::is_subordinator(&t.text))
        .map(|(i, _)| i)
        .collect();

    if subordinators.is_empty() {
        partition.main = (0..tags.len()).collect();
        return partition;
    }

    let first = subordinators[0];
    partition.subordinator_positions = subordinators;

    if first < 3 {
        let boundary = tags
            .iter()
            .enumerate()
            .skip(first + 1)
            .find(|(_, t)| t.text == ",")
            .map(|(i, _)| i)
            .unwrap_or(tags.len() / 2);
        partition.dependent = (first..=boundary).collect();
        partition.main = (boundary + 1..tags.len()).collect();
    } else {
        partition.main = (0..first).collect();
        partition.dependent = (first..tags.len()).collect();
    }

    partition
}

/// Linearize a single clause into subject, verb, object, prepositional
/// phrases, and leftovers. Empty categories contribute nothing.
pub fn reorder_clause(tags: &[TaggedToken]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let components = extract_svo_components(tags);
    let mut parts: Vec<String> = Vec::new();

    if !components.subject.is_empty() {
        parts.push(components.subject.join(" "));
    }
    if !components.verb.is_empty() {
        parts.push(components.verb.join(" "));
    }
    if !components.object.is_empty() {
        parts.push(components.object.join(" "));
    }
    for pp in &components.prepositional_phrases {
        let np = tags[pp.np_start..pp.np_end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(format!("{} {}", tags[pp.prep_idx].text, np));
    }
    if !components.other.is_empty() {
        parts.push(components.other.join(" "));
    }

    parts.join(" ")
}

/// Reorder each coordinated segment independently, re-inserting every
/// conjunction after the segment preceding it.
fn reorder_coordinated(tags: &[TaggedToken], positions: &[usize]) -> String {
    let mut clauses: Vec<(Vec<TaggedToken>, Option<String>)> = Vec::new();
    let mut start = 0;

    for &pos in positions {
        let segment = tags[start..pos].to_vec();
        if !segment.is_empty() {
            clauses.push((segment, None));
        }
        // A conjunction with no segment of its own re-targets the previous
        // clause; a sequence-initial one has nowhere to go and is dropped.
        if let Some(last) = clauses.last_mut() {
            last.1 = Some(tags[pos].text.clone());
        }
        start = pos + 1;
    }
    if start < tags.len() {
        clauses.push((tags[start..].to_vec(), None));
    }

    let mut parts = Vec::new();
    for (segment, conjunction) in &clauses {
        let reordered = reorder_clause(segment);
        match conjunction {
            Some(c) => parts.push(format!("{} {}", reordered, c)),
            None => parts.push(reordered),
        }
    }

    parts.join(" ")
}

/// Split on conjunctions, reorder each clause, and reassemble.
///
/// Coordinating conjunctions (tagged CC or surfaced and/but/or) take
/// precedence; only without them is the subordinate split attempted. A
/// leading dependent clause stays first in the output, joined to the main
/// clause with a comma; a trailing one follows the main clause.
pub fn handle_clauses(tags: &[TaggedToken]) -> String {
    let coordinators: Vec<usize> = tags
        .iter()
        .enumerate()
        .filter(|(_, t)| tag::is_coordinating(&t.tag) || tag::is_coordinator(&t.text))
        .map(|(i, _)| i)
        .collect();

    if !coordinators.is_empty() {
        return reorder_coordinated(tags, &coordinators);
    }

    let partition = identify_clauses(tags);
    if partition.dependent.is_empty() {
        return reorder_clause(tags);
    }

    let main_tokens: Vec<TaggedToken> = partition.main.iter().map(|&i| tags[i].clone()).collect();
    let dependent_tokens: Vec<TaggedToken> = partition
        .dependent
        .iter()
        .map(|&i| tags[i].clone())
        .collect();

    let main_part = reorder_clause(&main_tokens);

    let dependent_part = match dependent_tokens.split_first() {
        Some((subordinator, rest)) if !rest.is_empty() => {
            format!("{} {}", subordinator.text, reorder_clause(rest))
                .trim()
                .to_string()
        }
        Some((subordinator, _)) => subordinator.text.clone(),
        None => String::new(),
    };

    let dependent_first = partition
        .subordinator_positions
        .first()
        .is_some_and(|&p| p < 3);

    match (main_part.is_empty(), dependent_part.is_empty()) {
        (false, false) if dependent_first => format!("{}, {}", dependent_part, main_part),
        (false, false) => format!("{}, {}", main_part, dependent_part),
        (false, true) => main_part,
        (true, _) => dependent_part,
    }
}
