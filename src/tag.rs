//! Part-of-speech tag classification and closed word lexicons.
//!
//! Tags follow the Penn Treebank conventions of the upstream tagger. All
//! predicates are pure functions over a single tag or surface form; unknown
//! tags are simply never matched and fall through as unclassified tokens.

/// Auxiliary verb forms. A verb-group head drawn from this set is never a
/// main verb.
pub static AUXILIARY_VERBS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "will", "would", "shall", "should", "may", "might", "must", "can",
    "could", "ought",
];

/// Words that introduce a dependent clause.
pub static SUBORDINATORS: &[&str] = &[
    "although", "because", "if", "when", "while", "since", "unless", "until", "whereas", "though",
    "after", "before", "as",
];

/// Coordinating conjunction surfaces recognized even when the tagger missed
/// the CC tag.
pub static COORDINATORS: &[&str] = &["and", "but", "or"];

/// Noun tags: common/proper, singular/plural.
pub fn is_noun(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "NNP" | "NNPS")
}

/// Personal pronoun.
pub fn is_pronoun(tag: &str) -> bool {
    tag == "PRP"
}

/// Possessive pronoun (e.g. "my").
pub fn is_possessive(tag: &str) -> bool {
    tag == "PRP$"
}

/// Determiner (e.g. "the").
pub fn is_determiner(tag: &str) -> bool {
    tag == "DT"
}

/// Adjective, base/comparative/superlative.
pub fn is_adjective(tag: &str) -> bool {
    matches!(tag, "JJ" | "JJR" | "JJS")
}

/// Adverb, base/comparative/superlative.
pub fn is_adverb(tag: &str) -> bool {
    matches!(tag, "RB" | "RBR" | "RBS")
}

/// Any verb form (VB, VBD, VBG, VBN, VBP, VBZ).
pub fn is_verb(tag: &str) -> bool {
    tag.starts_with("VB")
}

/// Modal (e.g. "can", "should").
pub fn is_modal(tag: &str) -> bool {
    tag == "MD"
}

/// Preposition or subordinating conjunction.
pub fn is_preposition(tag: &str) -> bool {
    tag == "IN"
}

/// Coordinating conjunction tag.
pub fn is_coordinating(tag: &str) -> bool {
    tag == "CC"
}

/// Phrasal-verb particle (e.g. "up" in "pick up").
pub fn is_particle(tag: &str) -> bool {
    tag == "RP"
}

/// A token that can stand as a subject: noun or personal pronoun.
pub fn is_nominal(tag: &str) -> bool {
    is_noun(tag) || is_pronoun(tag)
}

/// Check a surface form against the auxiliary-verb lexicon.
pub fn is_auxiliary(word: &str) -> bool {
    let lower = word.to_lowercase();
    AUXILIARY_VERBS.iter().any(|w| *w == lower)
}

/// Check a surface form against the subordinator lexicon.
pub fn is_subordinator(word: &str) -> bool {
    let lower = word.to_lowercase();
    SUBORDINATORS.iter().any(|w| *w == lower)
}

/// Check a surface form against the coordinating-conjunction lexicon.
pub fn is_coordinator(word: &str) -> bool {
    let lower = word.to_lowercase();
    COORDINATORS.iter().any(|w| *w == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_tags() {
        assert!(is_noun("NN"));
        assert!(is_noun("NNPS"));
        assert!(!is_noun("NNX"));
        assert!(!is_noun("PRP"));
    }

    #[test]
    fn test_verb_family() {
        assert!(is_verb("VB"));
        assert!(is_verb("VBZ"));
        assert!(is_verb("VBG"));
        assert!(!is_verb("MD"));
        assert!(is_modal("MD"));
    }

    #[test]
    fn test_auxiliary_lexicon() {
        assert!(is_auxiliary("is"));
        assert!(is_auxiliary("Could"));
        assert!(!is_auxiliary("barks"));
    }

    #[test]
    fn test_subordinator_lexicon() {
        assert!(is_subordinator("Because"));
        assert!(is_subordinator("while"));
        assert!(!is_subordinator("and"));
        assert!(is_coordinator("and"));
    }

    #[test]
    fn test_unknown_tag_unmatched() {
        for tag in ["FW", "UH", "SYM", ""] {
            assert!(!is_noun(tag));
            assert!(!is_adjective(tag));
            assert!(!is_verb(tag));
            assert!(!is_nominal(tag));
        }
    }
}
