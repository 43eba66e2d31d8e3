//! # syntagma
//!
//! A rule-based engine for syntactic analysis, sentence reconstruction, and
//! grammatical correction over part-of-speech tagged text.
//!
//! Given an ordered sequence of (token, tag) pairs from an external tagger,
//! the engine heuristically chunks noun phrases and verb groups, repairs a
//! small set of malformed patterns by token relocation, splits clauses at
//! conjunctions, and linearizes each clause into canonical
//! subject-verb-object order. A follow-up correction stage smooths the
//! reconstructed sentence with spelling, agreement, and formatting rules.
//!
//! All analysis is deterministic and operates on a flat tag sequence; there
//! is no tree, no learned model, and no state carried between sentences.
//!
//! ## Quick Start
//!
//! ```rust
//! use syntagma::{analyze, parse_tagged};
//!
//! let tags = parse_tagged("the/DT dog/NN barks/VBZ").unwrap();
//! let result = analyze(&tags);
//!
//! assert_eq!(result.reconstructed, "The dog barks.");
//! assert_eq!(result.noun_phrases[0].tokens, vec!["the", "dog"]);
//! ```
//!
//! ## Grammatical Correction
//!
//! The correction stage reads the analysis record produced above:
//!
//! ```rust
//! use syntagma::{analyze, grammar, parse_tagged};
//!
//! let tags = parse_tagged("the/DT dogs/NNS is/VBZ loud/JJ").unwrap();
//! let analysis = analyze(&tags);
//! let corrected = grammar::correct(&analysis.reconstructed, &tags, Some(&analysis));
//!
//! assert_eq!(corrected, "The dogs are loud.");
//! ```

pub mod analysis;
pub mod clause;
pub mod grammar;
pub mod phrase;
pub mod repair;
pub mod svo;
pub mod tag;
pub mod token;

// Re-export main types for convenience
pub use analysis::{analyze, SyntacticAnalysis};
pub use clause::{handle_clauses, identify_clauses, reorder_clause, ClausePartition};
pub use phrase::{find_verb_groups, identify_noun_phrases, NounPhrase, VerbGroup};
pub use repair::{detect_and_fix_problems, Problem, ProblemKind};
pub use svo::{extract_svo_components, PrepPhrase, SvoComponents};
pub use token::{parse_tagged, parse_tsv, ParseError, TaggedToken};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let tags = parse_tagged(
            "quickly/RB the/DT dog/NN chased/VBD the/DT cat/NN in/IN the/DT garden/NN",
        )
        .unwrap();

        let result = analyze(&tags);

        assert!(!result.reconstructed.is_empty());
        assert!(result.reconstructed.chars().next().unwrap().is_uppercase());
        assert!(result.reconstructed.ends_with('.'));
        assert!(!result.noun_phrases.is_empty());
        assert!(result.verb_groups.iter().any(|g| g.is_main));

        let corrected = grammar::correct(&result.reconstructed, &tags, Some(&result));
        assert!(corrected.ends_with('.'));
    }

    #[test]
    fn test_empty_pipeline() {
        let result = analyze(&[]);
        assert_eq!(result.reconstructed, "");
        assert!(result.noun_phrases.is_empty());
    }
}
