//! Tagged-token representation and input parsing.
//!
//! A [`TaggedToken`] pairs one surface token with the part-of-speech tag the
//! upstream tagger assigned to it. Position in the sequence is the only
//! addressing mechanism used by the analysis stages.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// One (surface, tag) pair from the tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// The surface form of the token
    pub text: String,

    /// Part-of-speech tag assigned by the tagger
    pub tag: String,
}

impl TaggedToken {
    /// Create a token from a surface form and a tag
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        TaggedToken {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

impl std::fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.text, self.tag)
    }
}

/// Errors from the tagged-input parsers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An item had no `/` (or tab) separating surface from tag
    #[error("missing tag separator in item '{0}'")]
    MissingTag(String),

    /// An item had a separator but an empty surface or tag
    #[error("empty surface or tag in item '{0}'")]
    EmptyField(String),
}

/// Parse whitespace-separated `word/TAG` items into a tag sequence.
///
/// The input is NFC-normalized first. The tag is taken after the last `/`,
/// so surfaces containing slashes keep everything before it.
pub fn parse_tagged(text: &str) -> Result<Vec<TaggedToken>, ParseError> {
    let normalized: String = text.nfc().collect();

    normalized
        .split_whitespace()
        .map(|item| {
            let (surface, tag) = item
                .rsplit_once('/')
                .ok_or_else(|| ParseError::MissingTag(item.to_string()))?;
            if surface.is_empty() || tag.is_empty() {
                return Err(ParseError::EmptyField(item.to_string()));
            }
            Ok(TaggedToken::new(surface, tag))
        })
        .collect()
}

/// Parse two-column TSV input, one `surface<TAB>tag` pair per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_tsv(text: &str) -> Result<Vec<TaggedToken>, ParseError> {
    let normalized: String = text.nfc().collect();

    normalized
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (surface, tag) = line
                .split_once('\t')
                .ok_or_else(|| ParseError::MissingTag(line.to_string()))?;
            let (surface, tag) = (surface.trim(), tag.trim());
            if surface.is_empty() || tag.is_empty() {
                return Err(ParseError::EmptyField(line.to_string()));
            }
            Ok(TaggedToken::new(surface, tag))
        })
        .collect()
}
