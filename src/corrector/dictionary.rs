use crate::error::{AutocorrectError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Word list grouped by first character. Each bucket is an ordered set, so
/// duplicates collapse and iteration is lexicographic.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    buckets: BTreeMap<char, BTreeSet<String>>,
}

impl Dictionary {
    /// Load a newline-delimited word list from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AutocorrectError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary =
            Self::from_reader(BufReader::new(file)).map_err(|source| AutocorrectError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            path = %path.display(),
            words = dictionary.len(),
            letters = dictionary.buckets.len(),
            "loaded dictionary"
        );

        Ok(dictionary)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut dictionary = Self::default();
        for line in reader.lines() {
            dictionary.insert(line?);
        }
        Ok(dictionary)
    }

    /// Build from lines that have already been read
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = Self::default();
        for line in lines {
            dictionary.insert(line.into());
        }
        dictionary
    }

    fn insert(&mut self, mut word: String) {
        // `lines()` strips "\n" and "\r\n"; a lone trailing "\r" can still
        // survive when lines are handed in directly
        if word.ends_with('\r') {
            word.pop();
        }

        let Some(first) = word.chars().next() else {
            debug!("skipping empty dictionary line");
            return;
        };

        self.buckets.entry(first).or_default().insert(word);
    }

    /// Words sharing the given first character
    pub fn bucket(&self, letter: char) -> Option<&BTreeSet<String>> {
        self.buckets.get(&letter)
    }

    pub fn contains(&self, word: &str) -> bool {
        word.chars()
            .next()
            .and_then(|first| self.buckets.get(&first))
            .is_some_and(|bucket| bucket.contains(word))
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
