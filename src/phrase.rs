//! Noun-phrase and verb-group chunking over a tag sequence.
//!
//! Both chunkers scan left to right with no backtracking beyond a single
//! position: when a prospective phrase opening fails to complete, the scan
//! resumes one token past the anchor. Spans within one category never
//! overlap, and re-running a chunker over identically tagged output yields
//! the same boundaries.

use serde::{Deserialize, Serialize};

use crate::tag;
use crate::token::TaggedToken;

/// A contiguous run of the tag sequence recognized as one noun phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounPhrase {
    /// Start index (inclusive) in the tag sequence
    pub start: usize,
    /// End index (exclusive)
    pub end: usize,
    /// Surface tokens covered by the span
    pub tokens: Vec<String>,
}

/// A contiguous run recognized as one verb group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbGroup {
    /// Start index (inclusive) in the tag sequence
    pub start: usize,
    /// End index (exclusive)
    pub end: usize,
    /// Surface tokens covered by the span
    pub tokens: Vec<String>,
    /// True iff the head verb is not in the auxiliary lexicon
    pub is_main: bool,
}

fn surfaces(tags: &[TaggedToken], start: usize, end: usize) -> Vec<String> {
    tags[start..end].iter().map(|t| t.text.clone()).collect()
}

/// Noun-phrase scanner states
#[derive(Clone, Copy)]
enum NpState {
    /// Optional determiner or possessive
    Opening,
    /// Zero or more adjectives
    Adjectives,
    /// Mandatory noun head
    Head,
}

/// Try to match a noun phrase anchored at `start`; returns the exclusive end
/// index on success.
fn match_noun_phrase(tags: &[TaggedToken], start: usize) -> Option<usize> {
    let mut state = NpState::Opening;
    let mut i = start;

    loop {
        let next = tags.get(i).map(|t| t.tag.as_str());
        match (state, next) {
            (NpState::Opening, Some(t)) if tag::is_determiner(t) || tag::is_possessive(t) => {
                i += 1;
                state = NpState::Adjectives;
            }
            (NpState::Opening, _) => state = NpState::Adjectives,
            (NpState::Adjectives, Some(t)) if tag::is_adjective(t) => i += 1,
            (NpState::Adjectives, _) => state = NpState::Head,
            (NpState::Head, Some(t)) if tag::is_noun(t) => return Some(i + 1),
            (NpState::Head, _) => return None,
        }
    }
}

/// Identify maximal noun phrases in the tag sequence.
///
/// Recognized shapes: an optional determiner/possessive, zero or more
/// adjectives, and a mandatory noun; a standalone pronoun; or a bare noun.
/// A failed opening advances the scan by exactly one position.
pub fn identify_noun_phrases(tags: &[TaggedToken]) -> Vec<NounPhrase> {
    let mut phrases = Vec::new();
    let mut i = 0;

    while i < tags.len() {
        if tag::is_pronoun(&tags[i].tag) {
            phrases.push(NounPhrase {
                start: i,
                end: i + 1,
                tokens: vec![tags[i].text.clone()],
            });
            i += 1;
            continue;
        }

        match match_noun_phrase(tags, i) {
            Some(end) => {
                phrases.push(NounPhrase {
                    start: i,
                    end,
                    tokens: surfaces(tags, i, end),
                });
                i = end;
            }
            None => i += 1,
        }
    }

    phrases
}

/// Try to match a verb group anchored at `start`.
fn match_verb_group(tags: &[TaggedToken], start: usize) -> Option<VerbGroup> {
    let mut i = start;

    // Optional leading modal or auxiliary verb form
    if tag::is_modal(&tags[i].tag)
        || (tag::is_verb(&tags[i].tag) && tag::is_auxiliary(&tags[i].text))
    {
        i += 1;
    }

    // Head verb; a trailing particle is absorbed into the group
    if i < tags.len() && tag::is_verb(&tags[i].tag) {
        let is_main = !tag::is_auxiliary(&tags[i].text);
        i += 1;
        if i < tags.len() && tag::is_particle(&tags[i].tag) {
            i += 1;
        }
        return Some(VerbGroup {
            start,
            end: i,
            tokens: surfaces(tags, start, i),
            is_main,
        });
    }

    // A consumed auxiliary with no following head still forms a group
    if i > start {
        return Some(VerbGroup {
            start,
            end: i,
            tokens: surfaces(tags, start, i),
            is_main: false,
        });
    }

    None
}

/// Identify verb groups, distinguishing main verbs from auxiliaries.
pub fn find_verb_groups(tags: &[TaggedToken]) -> Vec<VerbGroup> {
    let mut groups = Vec::new();
    let mut i = 0;

    while i < tags.len() {
        match match_verb_group(tags, i) {
            Some(group) => {
                i = group.end;
                groups.push(group);
            }
            None => i += 1,
        }
    }

    groups
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

    #[test]
    fn test_determiner_adjective_noun() {
        let tags = make_tags(&[("the", "DT"), ("big", "JJ"), ("dog", "NN")]);
        let phrases = identify_noun_phrases(&tags);

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].start, 0);
        assert_eq!(phrases[0].end, 3);
        assert_eq!(phrases[0].tokens, vec!["the", "big", "dog"]);
    }

    #[test]
    fn test_possessive_phrase() {
        let tags = make_tags(&[("my", "PRP$"), ("new", "JJ"), ("car", "NN")]);
        let phrases = identify_noun_phrases(&tags);

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].tokens, vec!["my", "new", "car"]);
    }

    #[test]
    fn test_standalone_pronoun_and_noun() {
        let tags = make_tags(&[("she", "PRP"), ("walked", "VBD"), ("home", "NN")]);
        let phrases = identify_noun_phrases(&tags);

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].tokens, vec!["she"]);
        assert_eq!((phrases[1].start, phrases[1].end), (2, 3));
    }

    #[test]
    fn test_failed_opening_backtracks_one() {
        // The first determiner opens a phrase that never reaches a noun; the
        // scan resumes at the second determiner and completes from there.
        let tags = make_tags(&[("the", "DT"), ("the", "DT"), ("dog", "NN")]);
        let phrases = identify_noun_phrases(&tags);

        assert_eq!(phrases.len(), 1);
        assert_eq!((phrases[0].start, phrases[0].end), (1, 3));
        assert_eq!(phrases[0].tokens, vec!["the", "dog"]);
    }

    #[test]
    fn test_no_phrase_in_modifier_run() {
        let tags = make_tags(&[("the", "DT"), ("quickly", "RB")]);
        assert!(identify_noun_phrases(&tags).is_empty());
    }

    #[test]
    fn test_noun_phrase_idempotence() {
        let tags = make_tags(&[("the", "DT"), ("big", "JJ"), ("dog", "NN"), ("ran", "VBD")]);
        let first = identify_noun_phrases(&tags);
        let second = identify_noun_phrases(&tags);
        assert_eq!(first, second);
    }

    #[test]
    fn test_main_verb_group() {
        let tags = make_tags(&[("the", "DT"), ("the", "DT"), ("dog", "NN"), ("barks", "VBZ")]);
        let groups = find_verb_groups(&tags);

        assert_eq!(groups.len(), 1);
        assert_eq!((groups[0].start, groups[0].end), (3, 4));
        assert_eq!(groups[0].tokens, vec!["barks"]);
        assert!(groups[0].is_main);
    }

    #[test]
    fn test_auxiliary_plus_main() {
        let tags = make_tags(&[("is", "VBZ"), ("running", "VBG")]);
        let groups = find_verb_groups(&tags);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tokens, vec!["is", "running"]);
        assert!(groups[0].is_main);
    }

    #[test]
    fn test_modal_plus_verb() {
        let tags = make_tags(&[("can", "MD"), ("swim", "VB")]);
        let groups = find_verb_groups(&tags);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tokens, vec!["can", "swim"]);
        assert!(groups[0].is_main);
    }

    #[test]
    fn test_lone_auxiliary_is_not_main() {
        let tags = make_tags(&[("is", "VBZ"), ("loud", "JJ")]);
        let groups = find_verb_groups(&tags);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tokens, vec!["is"]);
        assert!(!groups[0].is_main);
    }

    #[test]
    fn test_particle_absorbed() {
        let tags = make_tags(&[("picked", "VBD"), ("up", "RP"), ("it", "PRP")]);
        let groups = find_verb_groups(&tags);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tokens, vec!["picked", "up"]);
        assert_eq!(groups[0].end, 2);
    }

    #[test]
    fn test_verb_group_idempotence() {
        let tags = make_tags(&[("she", "PRP"), ("is", "VBZ"), ("running", "VBG")]);
        assert_eq!(find_verb_groups(&tags), find_verb_groups(&tags));
    }
}
