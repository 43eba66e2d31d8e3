//! Subject-verb-object extraction from a repaired tag sequence.
//!
//! The extractor derives every category fresh from the sequence it is given;
//! it keeps no state between calls. Each token index lands in at most one of
//! subject, verb, object, a prepositional phrase, or the leftover bucket.

use serde::{Deserialize, Serialize};

use crate::phrase::{find_verb_groups, identify_noun_phrases, NounPhrase};
use crate::tag;
use crate::token::TaggedToken;

/// Bare punctuation surfaces excluded from the leftover bucket
const PUNCTUATION: &[&str] = &[",", ".", "!", "?"];

/// A preposition with the noun phrase immediately following it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepPhrase {
    /// Index of the preposition token
    pub prep_idx: usize,
    /// Start index of the following noun phrase
    pub np_start: usize,
    /// End index (exclusive) of the noun phrase
    pub np_end: usize,
}

/// The five parallel component lists extracted from one clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvoComponents {
    /// Noun phrase nearest before the main verb
    pub subject: Vec<String>,
    /// Tokens of the main verb group
    pub verb: Vec<String>,
    /// First noun phrase after the main verb group
    pub object: Vec<String>,
    /// Prepositional phrases in original left-to-right order
    pub prepositional_phrases: Vec<PrepPhrase>,
    /// Unclassified leftover tokens, bare punctuation excluded
    pub other: Vec<String>,
}

/// Every preposition immediately followed by the start of a recognized noun
/// phrase, extending through that phrase's end.
pub fn extract_prepositional_phrases(
    tags: &[TaggedToken],
    noun_phrases: &[NounPhrase],
) -> Vec<PrepPhrase> {
    let mut phrases = Vec::new();

    for (i, token) in tags.iter().enumerate() {
        if tag::is_preposition(&token.tag) {
            if let Some(np) = noun_phrases.iter().find(|np| np.start == i + 1) {
                phrases.push(PrepPhrase {
                    prep_idx: i,
                    np_start: np.start,
                    np_end: np.end,
                });
            }
        }
    }

    phrases
}

/// Extract subject, verb, object, prepositional phrases, and leftovers.
///
/// The main verb group is the first one flagged main, else the first group
/// found, else none. The subject is the noun phrase ending nearest at or
/// before the main verb, scanned left to right so the first of two
/// equidistant candidates wins. The object is the first noun phrase starting
/// at or after the verb group's end.
pub fn extract_svo_components(tags: &[TaggedToken]) -> SvoComponents {
    let mut components = SvoComponents::default();

    let noun_phrases = identify_noun_phrases(tags);
    let verb_groups = find_verb_groups(tags);

    let main_group = verb_groups
        .iter()
        .find(|g| g.is_main)
        .or_else(|| verb_groups.first());

    if let Some(main) = main_group {
        components.verb = main.tokens.clone();
    }

    components.prepositional_phrases = extract_prepositional_phrases(tags, &noun_phrases);

    if let Some(main) = main_group {
        let mut closest: Option<&NounPhrase> = None;
        let mut closest_distance = usize::MAX;
        for np in &noun_phrases {
            if np.end <= main.start {
                let distance = main.start - np.end;
                if distance < closest_distance {
                    closest_distance = distance;
                    closest = Some(np);
                }
            }
        }
        if let Some(np) = closest {
            components.subject = np.tokens.clone();
        }

        if let Some(np) = noun_phrases.iter().find(|np| np.start >= main.end) {
            components.object = np.tokens.clone();
        }
    }

    // Everything not claimed above lands in the leftover bucket
    let mut used = vec![false; tags.len()];
    for np in &noun_phrases {
        if np.tokens == components.subject || np.tokens == components.object {
            for slot in &mut used[np.start..np.end] {
                *slot = true;
            }
        }
    }
    if let Some(main) = main_group {
        for slot in &mut used[main.start..main.end] {
            *slot = true;
        }
    }
    for pp in &components.prepositional_phrases {
        for slot in &mut used[pp.prep_idx..pp.np_end] {
            *slot = true;
        }
    }
    for (i, token) in tags.iter().enumerate() {
        if !used[i] && !PUNCTUATION.contains(&token.text.as_str()) {
            components.other.push(token.text.clone());
        }
    }

    components
}
