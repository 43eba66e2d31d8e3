//! Grammatical correction and smoothing over a reconstructed sentence.
//!
//! This stage consumes the record produced by [`crate::analysis::analyze`]:
//! spelling substitution, surface grammar rules over a re-derived tag
//! sequence, agreement rules driven by the extracted components, and final
//! text formatting. Every rule table is closed and the stage is fully
//! deterministic.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::SyntacticAnalysis;
use crate::phrase::{NounPhrase, VerbGroup};
use crate::svo::SvoComponents;
use crate::tag;
use crate::token::TaggedToken;

// --- closed lexicons for agreement rules ---

static SINGULAR_PRONOUNS: &[&str] = &[
    "i", "he", "she", "it", "this", "that", "everyone", "someone", "anyone", "no one", "nobody",
    "somebody", "everybody", "each", "either", "neither", "one",
];

static PLURAL_PRONOUNS: &[&str] = &["we", "they", "these", "those", "both", "few", "many", "several"];

// "you" is grammatically singular or plural but always takes plural forms
static SECOND_PERSON_PRONOUNS: &[&str] = &["you"];

static SINGULAR_DETERMINERS: &[&str] =
    &["a", "an", "this", "that", "every", "each", "either", "neither"];

static PLURAL_DETERMINERS: &[&str] =
    &["these", "those", "many", "few", "several", "both", "some", "all"];

/// Singular verb form paired with its plural counterpart
static VERB_AGREEMENT: &[(&str, &str)] = &[
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("does", "do"),
    ("are", "is"),
    ("were", "was"),
    ("have", "has"),
    ("do", "does"),
];

/// Common misspellings and apostrophe-less contractions
static SPELLING_CORRECTIONS: &[(&str, &str)] = &[
    (r"\brecieve\b", "receive"),
    (r"\boccured\b", "occurred"),
    (r"\bseperate\b", "separate"),
    (r"\bdefinately\b", "definitely"),
    (r"\bwierd\b", "weird"),
    (r"\bneccessary\b", "necessary"),
    (r"\boccassion\b", "occasion"),
    (r"\bpublically\b", "publicly"),
    (r"\bthier\b", "their"),
    (r"\bbeleive\b", "believe"),
    (r"\bbeggining\b", "beginning"),
    (r"\bcommited\b", "committed"),
    (r"\bexistance\b", "existence"),
    (r"\bconsious\b", "conscious"),
    (r"\bfourty\b", "forty"),
    (r"\buntill\b", "until"),
    (r"\bcant\b", "can't"),
    (r"\bdont\b", "don't"),
    (r"\bdidnt\b", "didn't"),
    (r"\bisnt\b", "isn't"),
    (r"\barent\b", "aren't"),
    (r"\bwasnt\b", "wasn't"),
    (r"\bwerent\b", "weren't"),
    (r"\bhasnt\b", "hasn't"),
    (r"\bhavent\b", "haven't"),
    (r"\bhadnt\b", "hadn't"),
    (r"\bwont\b", "won't"),
    (r"\bwouldnt\b", "wouldn't"),
    (r"\bshouldnt\b", "shouldn't"),
    (r"\bcouldnt\b", "couldn't"),
    (r"\balot\b", "a lot"),
    (r"\btheir are\b", "there are"),
    (r"\byour welcome\b", "you're welcome"),
];

static SPELLING_REGEXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SPELLING_CORRECTIONS
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(&format!("(?i){}", pattern)).unwrap(),
                *replacement,
            )
        })
        .collect()
});

/// Auxiliaries after a connective normalized toward a past-tense main verb
static PAST_TENSE_FIXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\b(and|then|but)\s+is\b", "$1 was"),
        (r"(?i)\b(and|then|but)\s+are\b", "$1 were"),
        (r"(?i)\b(and|then|but)\s+has\b", "$1 had"),
        (r"(?i)\b(and|then|but)\s+have\b", "$1 had"),
        (r"(?i)\b(and|then|but)\s+does\b", "$1 did"),
        (r"(?i)\b(and|then|but)\s+do\b", "$1 did"),
    ]
    .iter()
    .map(|&(p, r)| (Regex::new(p).unwrap(), r))
    .collect()
});

/// Auxiliaries after a connective normalized toward a present-tense main verb
static PRESENT_TENSE_FIXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\b(and|then|but)\s+was\b", "$1 is"),
        (r"(?i)\b(and|then|but)\s+were\b", "$1 are"),
        (r"(?i)\b(and|then|but)\s+had\b", "$1 has"),
        (r"(?i)\b(and|then|but)\s+did\b", "$1 does"),
    ]
    .iter()
    .map(|&(p, r)| (Regex::new(p).unwrap(), r))
    .collect()
});

static ORPHAN_DETERMINER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(a|an|the)\s+([.,!?;:])").unwrap());

static WORD_OR_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w'-]+|[.,!?;:]").unwrap());

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?;:])").unwrap());
static SPACE_BEFORE_TERMINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?])").unwrap());
static MISSING_SPACE_AFTER_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.,!?;:])([A-Za-z])").unwrap());
static REPEATED_PERIODS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static REPEATED_BANGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static REPEATED_QUESTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?{2,}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tense {
    Past,
    Present,
    Base,
}

/// Re-derive tags for a reconstructed string.
///
/// Reconstruction permutes the original surfaces, so positions no longer
/// line up with the input sequence; surfaces still do. Words are looked up
/// (case-insensitively) in the source sequence, punctuation tags as itself,
/// and anything unseen defaults to a noun reading.
pub fn retag(text: &str, source: &[TaggedToken]) -> Vec<TaggedToken> {
    let mut map: HashMap<String, &str> = HashMap::new();
    for token in source {
        map.entry(token.text.to_lowercase())
            .or_insert(token.tag.as_str());
    }

    WORD_OR_PUNCT
        .find_iter(text)
        .map(|m| {
            let piece = m.as_str();
            if piece.len() == 1 && ".,!?;:".contains(piece) {
                TaggedToken::new(piece, piece)
            } else {
                let tag = map
                    .get(&piece.to_lowercase())
                    .copied()
                    .unwrap_or("NN");
                TaggedToken::new(piece, tag)
            }
        })
        .collect()
}

/// Substitute common misspellings from the closed correction table.
pub fn apply_spelling_correction(text: &str) -> String {
    let mut corrected = text.to_string();
    for (pattern, replacement) in SPELLING_REGEXES.iter() {
        corrected = pattern.replace_all(&corrected, *replacement).into_owned();
    }
    corrected
}

/// Surface-level grammar rules over a re-derived tag sequence.
///
/// Removes doubled determiners, orphan sentence-final modifiers, adjacent
/// duplicate words, over-long adjective runs, and stray prepositions. With
/// no tags available only the conservative string-level cleanup runs.
pub fn apply_surface_grammar_rules(text: &str, tags: &[TaggedToken]) -> String {
    if tags.is_empty() {
        return apply_string_level_cleanup(text);
    }

    let mut cleaned: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < tags.len() {
        let token = &tags[i];

        // Doubled determiners (the the, a a)
        if tag::is_determiner(&token.tag) && i + 1 < tags.len() {
            let next = &tags[i + 1];
            if tag::is_determiner(&next.tag) && token.text.eq_ignore_ascii_case(&next.text) {
                i += 1;
                continue;
            }
        }

        // Sentence-final adjective with nothing left to modify
        if tag::is_adjective(&token.tag) && i == tags.len() - 1 {
            i += 1;
            continue;
        }

        // Adjacent duplicate words keep one copy
        if i + 1 < tags.len() && token.text.eq_ignore_ascii_case(&tags[i + 1].text) {
            cleaned.push(&token.text);
            i += 2;
            continue;
        }

        // Sentence-final determiner
        if tag::is_determiner(&token.tag) && i == tags.len() - 1 {
            i += 1;
            continue;
        }

        // Runs of more than three adjectives keep the last two
        if tag::is_adjective(&token.tag) {
            let mut j = i + 1;
            while j < tags.len() && tag::is_adjective(&tags[j].tag) {
                j += 1;
            }
            let run = j - i;
            if run > 3 {
                i += run - 2;
                continue;
            }
        }

        // Sentence-final preposition
        if tag::is_preposition(&token.tag) && i == tags.len() - 1 {
            i += 1;
            continue;
        }

        // Consecutive prepositions keep the first
        if tag::is_preposition(&token.tag)
            && i + 1 < tags.len()
            && tag::is_preposition(&tags[i + 1].tag)
        {
            cleaned.push(&token.text);
            i += 2;
            continue;
        }

        cleaned.push(&token.text);
        i += 1;
    }

    cleaned.join(" ")
}

/// Tag-free cleanup: collapse adjacent duplicate words.
pub fn apply_string_level_cleanup(text: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if words
            .last()
            .is_some_and(|prev| prev.eq_ignore_ascii_case(word))
        {
            continue;
        }
        words.push(word);
    }
    words.join(" ")
}

fn subject_number(subject: &[String], tags: &[TaggedToken]) -> Option<Number> {
    let head = subject.last()?.to_lowercase();

    if SINGULAR_PRONOUNS.contains(&head.as_str()) {
        return Some(Number::Singular);
    }
    if PLURAL_PRONOUNS.contains(&head.as_str()) || SECOND_PERSON_PRONOUNS.contains(&head.as_str()) {
        return Some(Number::Plural);
    }

    for token in tags {
        if token.text.to_lowercase() == head {
            match token.tag.as_str() {
                "NNS" | "NNPS" => return Some(Number::Plural),
                "NN" | "NNP" => return Some(Number::Singular),
                _ => {}
            }
        }
    }

    None
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Enforce subject-verb agreement using the extracted components: singular
/// subjects take is/was/has/does, plural subjects the counterpart forms.
pub fn apply_subject_verb_agreement(
    text: &str,
    tags: &[TaggedToken],
    svo: &SvoComponents,
) -> String {
    if svo.subject.is_empty() || svo.verb.is_empty() || tags.is_empty() {
        return text.to_string();
    }
    let Some(number) = subject_number(&svo.subject, tags) else {
        return text.to_string();
    };

    let mut corrected = text.to_string();
    for verb_token in &svo.verb {
        let verb_lower = verb_token.to_lowercase();
        let Some((_, replacement)) = VERB_AGREEMENT
            .iter()
            .copied()
            .find(|(form, _)| *form == verb_lower)
        else {
            continue;
        };

        let is_singular_form = matches!(verb_lower.as_str(), "is" | "was" | "has" | "does");
        if (number == Number::Singular) == is_singular_form {
            continue;
        }

        let mut correct_form = replacement.to_string();
        if verb_token.chars().next().is_some_and(|c| c.is_uppercase()) {
            correct_form = capitalize_first(&correct_form);
        }

        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(verb_token))).unwrap();
        corrected = pattern.replace(&corrected, correct_form.as_str()).into_owned();
    }

    corrected
}

fn main_verb_tense(verb_groups: &[VerbGroup], tags: &[TaggedToken]) -> Option<Tense> {
    let group = verb_groups
        .iter()
        .find(|g| g.is_main)
        .or_else(|| verb_groups.first())?;

    for i in group.start..group.end.min(tags.len()) {
        match tags[i].tag.as_str() {
            "VBD" => return Some(Tense::Past),
            "VBZ" | "VBP" | "VBG" => return Some(Tense::Present),
            "VB" => return Some(Tense::Base),
            _ => {}
        }
    }

    None
}

/// Normalize auxiliary tense after connectives toward the main verb's tense.
/// Only surface-level fixes; no new tense is inferred.
pub fn apply_morphological_consistency(
    text: &str,
    tags: &[TaggedToken],
    verb_groups: &[VerbGroup],
) -> String {
    if verb_groups.len() <= 1 || tags.is_empty() {
        return text.to_string();
    }

    let fixes = match main_verb_tense(verb_groups, tags) {
        Some(Tense::Past) => &*PAST_TENSE_FIXES,
        Some(Tense::Present) => &*PRESENT_TENSE_FIXES,
        Some(Tense::Base) | None => return text.to_string(),
    };

    let mut corrected = text.to_string();
    for (pattern, replacement) in fixes {
        corrected = pattern.replace_all(&corrected, *replacement).into_owned();
    }
    corrected
}

fn noun_phrase_number(phrase: &[String], tags: &[TaggedToken]) -> Option<Number> {
    for token in phrase.iter().rev() {
        let lower = token.to_lowercase();
        for candidate in tags {
            if candidate.text.to_lowercase() == lower {
                match candidate.tag.as_str() {
                    "NNS" | "NNPS" => return Some(Number::Plural),
                    "NN" | "NNP" => return Some(Number::Singular),
                    _ => {}
                }
            }
        }
    }
    None
}

fn replace_phrase_once(text: &str, phrase: &str, replacement: &str) -> String {
    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).unwrap();
    pattern.replace(text, replacement).into_owned()
}

/// Enforce determiner-noun number consistency inside extracted noun phrases
/// and drop determiners orphaned before punctuation.
pub fn apply_determiner_noun_consistency(
    text: &str,
    tags: &[TaggedToken],
    noun_phrases: &[NounPhrase],
) -> String {
    let mut corrected = text.to_string();

    for np in noun_phrases {
        if np.tokens.len() < 2 {
            continue;
        }
        let first = np.tokens[0].to_lowercase();
        if tags.get(np.start).map(|t| t.tag.as_str()) != Some("DT") {
            continue;
        }
        let Some(number) = noun_phrase_number(&np.tokens[1..], tags) else {
            continue;
        };

        let phrase_str = np.tokens.join(" ");
        let rest = np.tokens[1..].join(" ");

        if SINGULAR_DETERMINERS.contains(&first.as_str()) && number == Number::Plural {
            match first.as_str() {
                "a" | "an" => corrected = corrected.replacen(&phrase_str, &rest, 1),
                "this" => {
                    corrected =
                        replace_phrase_once(&corrected, &phrase_str, &format!("these {}", rest))
                }
                "that" => {
                    corrected =
                        replace_phrase_once(&corrected, &phrase_str, &format!("those {}", rest))
                }
                _ => {}
            }
        } else if PLURAL_DETERMINERS.contains(&first.as_str()) && number == Number::Singular {
            match first.as_str() {
                "these" => {
                    corrected =
                        replace_phrase_once(&corrected, &phrase_str, &format!("this {}", rest))
                }
                "those" => {
                    corrected =
                        replace_phrase_once(&corrected, &phrase_str, &format!("that {}", rest))
                }
                _ => {}
            }
        }
    }

    ORPHAN_DETERMINER.replace_all(&corrected, "$2").into_owned()
}

/// Final text formatting: spacing, capitalization, terminal punctuation,
/// punctuation de-duplication.
pub fn apply_post_processing(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = MULTI_SPACE.replace_all(text.trim(), " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = MISSING_SPACE_AFTER_PUNCT.replace_all(&text, "$1 $2");

    let mut text = capitalize_first(&text);
    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }

    let text = REPEATED_PERIODS.replace_all(&text, ".");
    let text = REPEATED_BANGS.replace_all(&text, "!");
    let text = REPEATED_QUESTIONS.replace_all(&text, "?");
    SPACE_BEFORE_TERMINAL.replace_all(&text, "$1").into_owned()
}

/// Run the full correction pass over a reconstructed sentence.
///
/// `source` supplies the tag sequence the sentence was reconstructed from;
/// its surfaces are used to re-derive tags after each text-changing step.
/// Without an analysis record only spelling, surface rules, and formatting
/// run.
pub fn correct(text: &str, source: &[TaggedToken], analysis: Option<&SyntacticAnalysis>) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let mut corrected = apply_spelling_correction(text);

    let retagged = retag(&corrected, source);
    corrected = apply_surface_grammar_rules(&corrected, &retagged);

    if let Some(analysis) = analysis {
        let retagged = retag(&corrected, source);
        corrected = apply_subject_verb_agreement(&corrected, &retagged, &analysis.svo_components);
        corrected = apply_morphological_consistency(&corrected, &retagged, &analysis.verb_groups);
        corrected =
            apply_determiner_noun_consistency(&corrected, &retagged, &analysis.noun_phrases);
    }

    apply_post_processing(&corrected)
}
