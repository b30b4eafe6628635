pub mod cli;
pub mod config;
pub mod corrector;
pub mod error;

pub use config::Config;
pub use corrector::dictionary::Dictionary;
pub use corrector::distance::Algorithm;
pub use corrector::Autocorrector;
pub use error::{AutocorrectError, Result};

/// Outcome of a nearest-match search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The word is in the dictionary
    Correct,
    /// Nothing in the word's bucket came within the threshold, or there is
    /// no bucket at all
    NoCandidates,
    /// Closest words, all at the same distance
    Suggestions(Vec<String>),
}

impl Correction {
    pub fn suggestions(&self) -> &[String] {
        match self {
            Correction::Suggestions(words) => words,
            _ => &[],
        }
    }

    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            Correction::Suggestions(words) => words,
            _ => Vec::new(),
        }
    }
}
