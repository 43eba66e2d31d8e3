//! Detection and repair of malformed token patterns.
//!
//! Three defect patterns are detected and repaired in sequence, each repair
//! a pure function from one tag sequence to a fresh one. Later detectors run
//! against the sequence as repaired so far, so a repair may shift the
//! positions a later pattern matches on; spans computed before a repair are
//! never reused after one.

use serde::{Deserialize, Serialize};

use crate::phrase::find_verb_groups;
use crate::tag;
use crate::token::TaggedToken;

/// The defect pattern a [`Problem`] records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemKind {
    /// Preposition followed by an adjective with no noun completing the phrase
    DanglingAdjective,
    /// Main verb with no noun or pronoun among the tokens preceding it
    VerbWithoutSubject,
    /// Sentence opening on a bare adjective or adverb
    UnusualOpening,
}

impl ProblemKind {
    /// String form used in diagnostic output
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::DanglingAdjective => "dangling_adjective",
            ProblemKind::VerbWithoutSubject => "verb_without_subject",
            ProblemKind::UnusualOpening => "unusual_opening",
        }
    }
}

/// A defect found by the detector, kept for reporting only; the repaired
/// sequence is the actual mutation artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Which pattern matched
    pub kind: ProblemKind,
    /// Position in the sequence at the moment of detection
    pub position: usize,
    /// Surface tokens that triggered the match
    pub original: Vec<String>,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.kind.as_str(),
            self.position,
            self.original.join(" ")
        )
    }
}

/// Scan for the three defect patterns and apply their repairs.
///
/// Returns the repaired sequence and the problems found. Detection of the
/// verb-without-subject pattern recomputes verb groups against the sequence
/// already repaired by the dangling-adjective pass.
pub fn detect_and_fix_problems(tags: &[TaggedToken]) -> (Vec<TaggedToken>, Vec<Problem>) {
    let mut fixed: Vec<TaggedToken> = tags.to_vec();
    let mut problems = Vec::new();

    // Preposition + adjective with no noun at the next position
    let mut i = 0;
    while i + 1 < fixed.len() {
        if tag::is_preposition(&fixed[i].tag) && tag::is_adjective(&fixed[i + 1].tag) {
            let has_noun = i + 2 < fixed.len() && tag::is_noun(&fixed[i + 2].tag);
            if !has_noun {
                problems.push(Problem {
                    kind: ProblemKind::DanglingAdjective,
                    position: i,
                    original: vec![fixed[i].text.clone(), fixed[i + 1].text.clone()],
                });
                fixed = fix_dangling_adjective(&fixed, i);
            }
        }
        i += 1;
    }

    // Main verbs lacking a nearby subject. Groups are computed once against
    // the sequence as repaired above; individual relocations within this
    // pass do not refresh the remaining group positions.
    let verb_groups = find_verb_groups(&fixed);
    for group in &verb_groups {
        if !group.is_main {
            continue;
        }
        let start = group.start;
        let has_subject =
            (start.saturating_sub(3)..start).any(|j| tag::is_nominal(&fixed[j].tag));
        if !has_subject && start > 0 {
            problems.push(Problem {
                kind: ProblemKind::VerbWithoutSubject,
                position: start,
                original: group.tokens.clone(),
            });
            fixed = fix_verb_without_subject(&fixed, start);
        }
    }

    // Sentence opening on a bare modifier
    if let Some(first) = fixed.first() {
        if (tag::is_adjective(&first.tag) || tag::is_adverb(&first.tag))
            && (fixed.len() < 3 || !tag::is_nominal(&fixed[1].tag))
        {
            problems.push(Problem {
                kind: ProblemKind::UnusualOpening,
                position: 0,
                original: vec![first.text.clone()],
            });
            fixed = fix_unusual_start(&fixed);
        }
    }

    (fixed, problems)
}

/// Repair a dangling preposition+adjective at `prep_idx` by pulling the
/// nearest following noun next to the adjective.
///
/// The lookahead window covers the four positions after the adjective; with
/// no noun there the sequence is returned unchanged.
pub fn fix_dangling_adjective(tags: &[TaggedToken], prep_idx: usize) -> Vec<TaggedToken> {
    let limit = tags.len().min(prep_idx + 5);
    let noun_idx = (prep_idx + 2..limit).find(|&j| tag::is_noun(&tags[j].tag));

    let Some(noun_idx) = noun_idx else {
        return tags.to_vec();
    };

    let mut out = Vec::with_capacity(tags.len());
    out.extend_from_slice(&tags[..=prep_idx]);
    out.push(tags[prep_idx + 1].clone());
    out.push(tags[noun_idx].clone());
    out.extend_from_slice(&tags[prep_idx + 2..noun_idx]);
    out.extend_from_slice(&tags[noun_idx + 1..]);
    out
}

/// Relocate the nearest noun/pronoun to immediately precede the verb at
/// `verb_idx`.
///
/// Searches a five-token window before the verb (nearest hit wins), then
/// after it (first hit wins). With no candidate, or a candidate already in
/// place, the sequence is returned unchanged.
pub fn fix_verb_without_subject(tags: &[TaggedToken], verb_idx: usize) -> Vec<TaggedToken> {
    let before = (verb_idx.saturating_sub(5)..verb_idx)
        .filter(|&j| tag::is_nominal(&tags[j].tag))
        .last();
    let subject_idx = before.or_else(|| {
        (verb_idx + 1..tags.len().min(verb_idx + 5)).find(|&j| tag::is_nominal(&tags[j].tag))
    });

    let Some(subject_idx) = subject_idx else {
        return tags.to_vec();
    };
    if subject_idx + 1 == verb_idx {
        return tags.to_vec();
    }

    let mut out = Vec::with_capacity(tags.len());
    if subject_idx < verb_idx {
        out.extend_from_slice(&tags[..subject_idx]);
        out.extend_from_slice(&tags[subject_idx + 1..verb_idx]);
        out.push(tags[subject_idx].clone());
        out.extend_from_slice(&tags[verb_idx..]);
    } else {
        out.extend_from_slice(&tags[..verb_idx]);
        out.push(tags[subject_idx].clone());
        out.extend_from_slice(&tags[verb_idx..subject_idx]);
        out.extend_from_slice(&tags[subject_idx + 1..]);
    }
    out
}

/// Relocate a bare opening modifier to immediately follow the first
/// noun/pronoun/verb found by forward scan; with none, no repair.
pub fn fix_unusual_start(tags: &[TaggedToken]) -> Vec<TaggedToken> {
    if tags.len() < 2 {
        return tags.to_vec();
    }

    let target =
        (1..tags.len()).find(|&j| tag::is_nominal(&tags[j].tag) || tag::is_verb(&tags[j].tag));
    let Some(target) = target else {
        return tags.to_vec();
    };

    let mut out = Vec::with_capacity(tags.len());
    out.extend_from_slice(&tags[1..=target]);
    out.push(tags[0].clone());
    out.extend_from_slice(&tags[target + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tags(pairs: &[(&str, &str)]) -> Vec<TaggedToken> {
        pairs
            .iter()
            .map(|(text, tag)| TaggedToken::new(*text, *tag))
            .collect()
    }

    fn texts(tags: &[TaggedToken]) -> Vec<&str> {
        tags.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_dangling_adjective_repair() {
        let tags = make_tags(&[
            ("in", "IN"),
            ("big", "JJ"),
            ("over", "IN"),
            ("house", "NN"),
        ]);
        let (fixed, problems) = detect_and_fix_problems(&tags);

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::DanglingAdjective);
        assert_eq!(problems[0].position, 0);
        assert_eq!(problems[0].original, vec!["in", "big"]);
        assert_eq!(texts(&fixed), vec!["in", "big", "house", "over"]);
    }

    #[test]
    fn test_dangling_adjective_no_candidate() {
        let tags = make_tags(&[("in", "IN"), ("big", "JJ")]);
        let fixed = fix_dangling_adjective(&tags, 0);
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_preposition_with_complete_phrase_untouched() {
        let tags = make_tags(&[("in", "IN"), ("big", "JJ"), ("house", "NN")]);
        let (fixed, problems) = detect_and_fix_problems(&tags);
        assert!(problems.is_empty());
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_subject_relocated_from_after_verb() {
        // Main verb at 2 with no nominal before it; the noun at 5 moves to
        // immediately precede the verb, shifting later tokens down by one.
        let tags = make_tags(&[
            ("quickly", "RB"),
            ("very", "RB"),
            ("runs", "VBZ"),
            ("in", "IN"),
            ("the", "DT"),
            ("dog", "NN"),
        ]);
        let fixed = fix_verb_without_subject(&tags, 2);

        assert_eq!(
            texts(&fixed),
            vec!["quickly", "very", "dog", "runs", "in", "the"]
        );
    }

    #[test]
    fn test_subject_relocated_from_before_verb() {
        let tags = make_tags(&[
            ("dog", "NN"),
            ("quickly", "RB"),
            ("very", "RB"),
            ("runs", "VBZ"),
        ]);
        let fixed = fix_verb_without_subject(&tags, 3);

        assert_eq!(texts(&fixed), vec!["quickly", "very", "dog", "runs"]);
    }

    #[test]
    fn test_subject_already_in_place() {
        let tags = make_tags(&[("the", "DT"), ("dog", "NN"), ("barks", "VBZ")]);
        let fixed = fix_verb_without_subject(&tags, 2);
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_no_subject_candidate_found() {
        let tags = make_tags(&[("quickly", "RB"), ("runs", "VBZ"), ("fast", "RB")]);
        let fixed = fix_verb_without_subject(&tags, 1);
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_unusual_start_relocation() {
        let tags = make_tags(&[
            ("Quickly", "RB"),
            ("the", "DT"),
            ("dog", "NN"),
            ("barks", "VBZ"),
        ]);
        let (fixed, problems) = detect_and_fix_problems(&tags);

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].kind, ProblemKind::UnusualOpening);
        assert_eq!(texts(&fixed), vec!["the", "dog", "Quickly", "barks"]);
    }

    #[test]
    fn test_unusual_start_without_landing_site() {
        let tags = make_tags(&[("Quickly", "RB"), ("away", "RB")]);
        let fixed = fix_unusual_start(&tags);
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_normal_opening_untouched() {
        let tags = make_tags(&[("the", "DT"), ("dog", "NN"), ("barks", "VBZ")]);
        let (fixed, problems) = detect_and_fix_problems(&tags);
        assert!(problems.is_empty());
        assert_eq!(fixed, tags);
    }

    #[test]
    fn test_repairs_preserve_length() {
        let tags = make_tags(&[
            ("Quickly", "RB"),
            ("runs", "VBZ"),
            ("the", "DT"),
            ("dog", "NN"),
        ]);
        let (fixed, _) = detect_and_fix_problems(&tags);
        assert_eq!(fixed.len(), tags.len());
    }
}
