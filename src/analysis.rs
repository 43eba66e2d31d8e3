//! The reconstruction driver tying the analysis stages together.
//!
//! One call runs repair, chunking, clause handling, and final string
//! cleanup over a single sentence's tag sequence and returns everything the
//! downstream correction stage needs. All structures are created fresh per
//! invocation; nothing survives between sentences.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clause::{handle_clauses, identify_clauses, ClausePartition};
use crate::phrase::{find_verb_groups, identify_noun_phrases, NounPhrase, VerbGroup};
use crate::repair::{detect_and_fix_problems, Problem};
use crate::svo::{extract_svo_components, SvoComponents};
use crate::token::TaggedToken;

static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?])").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Everything produced for one sentence: the reconstruction plus the
/// intermediate structures the grammatical-correction stage reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntacticAnalysis {
    /// Space-joined original token sequence
    pub original: String,
    /// Final reconstructed, capitalized, punctuated sentence
    pub reconstructed: String,
    /// Noun phrases found in the repaired sequence
    pub noun_phrases: Vec<NounPhrase>,
    /// Verb groups found in the repaired sequence
    pub verb_groups: Vec<VerbGroup>,
    /// Defects detected and repaired
    pub problems_fixed: Vec<Problem>,
    /// Main/dependent clause partition
    pub clauses: ClausePartition,
    /// Subject-verb-object components of the repaired sequence
    pub svo_components: SvoComponents,
}

/// Run the full syntactic analysis over one sentence's tag sequence.
///
/// An empty sequence yields an empty result record rather than an error.
pub fn analyze(tags: &[TaggedToken]) -> SyntacticAnalysis {
    if tags.is_empty() {
        return SyntacticAnalysis::default();
    }

    let original = tags
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let (repaired, problems_fixed) = detect_and_fix_problems(tags);

    let noun_phrases = identify_noun_phrases(&repaired);
    let verb_groups = find_verb_groups(&repaired);
    let clauses = identify_clauses(&repaired);
    let svo_components = extract_svo_components(&repaired);
    let reconstructed = finalize(&handle_clauses(&repaired));

    SyntacticAnalysis {
        original,
        reconstructed,
        noun_phrases,
        verb_groups,
        problems_fixed,
        clauses,
        svo_components,
    }
}

/// Global cleanup applied once to the assembled string: no whitespace before
/// punctuation, single spaces, leading capital, terminal punctuation.
fn finalize(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    let text = MULTI_SPACE.replace_all(&text, " ");
    let mut text = capitalize_first(text.trim());

    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
