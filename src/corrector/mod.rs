pub mod dictionary;
pub mod distance;

use crate::error::{AutocorrectError, Result};
use crate::Correction;
use dictionary::Dictionary;
use distance::Algorithm;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Nearest-match search over a read-only dictionary.
///
/// Only words sharing the query's first character are considered. The
/// dictionary is never mutated after construction, so one instance can be
/// shared across threads behind an `Arc`.
pub struct Autocorrector {
    dictionary: Dictionary,
}

impl Autocorrector {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(Dictionary::load(path)?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Dictionary words closest to `word`, all tied at the same distance.
    ///
    /// Empty means the word is already correct or nothing shares its first
    /// letter; use [`Autocorrector::diagnose`] to tell the two apart.
    pub fn correct(&self, word: &str, algorithm: Algorithm) -> Result<Vec<String>> {
        Ok(self.diagnose(word, algorithm)?.into_suggestions())
    }

    pub fn correct_levenshtein(&self, word: &str) -> Result<Vec<String>> {
        self.correct(word, Algorithm::Levenshtein)
    }

    pub fn correct_lcs(&self, word: &str) -> Result<Vec<String>> {
        self.correct(word, Algorithm::LcsOffset)
    }

    pub fn diagnose(&self, word: &str, algorithm: Algorithm) -> Result<Correction> {
        let Some(first) = word.chars().next() else {
            return Err(AutocorrectError::InvalidArgument(
                "word to correct must not be empty".to_string(),
            ));
        };

        let Some(bucket) = self.dictionary.bucket(first) else {
            debug!(word, %first, "no dictionary words share the first letter");
            return Ok(Correction::NoCandidates);
        };

        let mut threshold = algorithm.initial_threshold(word);
        let mut suggestions: Vec<String> = Vec::new();

        for candidate in bucket {
            let distance = algorithm.distance(word, candidate);

            // lcs-offset can reach zero for a word that is not in the
            // dictionary; the search still stops, but it is not "correct"
            if distance == 0 {
                if self.dictionary.contains(word) {
                    return Ok(Correction::Correct);
                }
                debug!(word, candidate = %candidate, "zero distance to a different word");
                return Ok(Correction::NoCandidates);
            }

            if distance < threshold {
                threshold = distance;
                suggestions.clear();
                suggestions.push(candidate.clone());
            } else if distance == threshold {
                suggestions.push(candidate.clone());
            }
        }

        debug!(
            word,
            %algorithm,
            candidates = bucket.len(),
            found = suggestions.len(),
            threshold,
            "search finished"
        );

        if suggestions.is_empty() {
            Ok(Correction::NoCandidates)
        } else {
            Ok(Correction::Suggestions(suggestions))
        }
    }

    /// Same search as [`Autocorrector::correct_lcs`], delivered through a
    /// one-shot slot. Exactly one value is always sent: an empty word sends
    /// an empty result. A dropped receiver discards the result.
    pub fn correct_parallel(&self, word: String, slot: oneshot::Sender<Vec<String>>) {
        let suggestions = match self.correct_lcs(&word) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(word = %word, "background correction failed: {}", e);
                Vec::new()
            }
        };

        if slot.send(suggestions).is_err() {
            debug!(word = %word, "correction receiver dropped before result arrived");
        }
    }

    /// Run [`Autocorrector::correct_parallel`] on a worker thread and hand
    /// back the receiving end of its slot.
    pub fn spawn_correction(
        self: &Arc<Self>,
        word: String,
    ) -> Result<oneshot::Receiver<Vec<String>>> {
        let (sender, receiver) = oneshot::channel();
        let corrector = Arc::clone(self);

        thread::Builder::new()
            .name("autocorrect-worker".to_string())
            .spawn(move || corrector.correct_parallel(word, sender))
            .map_err(AutocorrectError::WorkerSpawn)?;

        Ok(receiver)
    }

    /// Run [`Autocorrector::spawn_correction`] for every word, never keeping
    /// more than `max_in_flight` workers alive at once. Results keep input order.
    pub fn correct_in_background(
        self: &Arc<Self>,
        words: &[String],
        max_in_flight: usize,
    ) -> Result<Vec<Vec<String>>> {
        let mut results = Vec::with_capacity(words.len());

        for chunk in words.chunks(max_in_flight.max(1)) {
            let receivers = chunk
                .iter()
                .map(|word| self.spawn_correction(word.clone()))
                .collect::<Result<Vec<_>>>()?;
            debug!(workers = receivers.len(), "dispatched background corrections");

            for (word, receiver) in chunk.iter().zip(receivers) {
                let suggestions = receiver
                    .blocking_recv()
                    .map_err(|_| AutocorrectError::WorkerLost(word.clone()))?;
                results.push(suggestions);
            }
        }

        Ok(results)
    }

    /// Correct many words at once, keeping input order
    pub fn correct_many<S>(
        &self,
        words: &[S],
        algorithm: Algorithm,
    ) -> Vec<(String, Result<Correction>)>
    where
        S: AsRef<str> + Sync,
    {
        words
            .par_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_string(), self.diagnose(word, algorithm))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector(words: &[&str]) -> Autocorrector {
        Autocorrector::new(Dictionary::from_lines(words.iter().copied()))
    }

    #[test]
    fn test_closest_match_levenshtein() {
        let c = corrector(&["cat", "car", "can"]);
        assert_eq!(c.correct_levenshtein("cqt").unwrap(), vec!["cat"]);
    }

    #[test]
    fn test_exact_match_is_correct() {
        let c = corrector(&["cat"]);
        assert!(c.correct_levenshtein("cat").unwrap().is_empty());
        assert!(c.correct_lcs("cat").unwrap().is_empty());
        assert_eq!(c.diagnose("cat", Algorithm::Levenshtein).unwrap(), Correction::Correct);
    }

    #[test]
    fn test_zero_lcs_distance_to_other_word_is_not_correct() {
        let c = corrector(&["cat"]);
        assert_eq!(distance::lcs_offset("ca", "cat"), 0);
        assert_eq!(c.diagnose("ca", Algorithm::LcsOffset).unwrap(), Correction::NoCandidates);
        assert!(c.correct_lcs("ca").unwrap().is_empty());
        assert_eq!(c.diagnose("cat", Algorithm::LcsOffset).unwrap(), Correction::Correct);
    }

    #[test]
    fn test_exact_match_discards_earlier_candidates() {
        // "caa" and "cab" sort before "cat" and are accumulated first
        let c = corrector(&["caa", "cab", "cat"]);
        assert!(c.correct_levenshtein("cat").unwrap().is_empty());
        assert!(c.correct_lcs("cat").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_first_letter() {
        let c = corrector(&["dog"]);
        assert!(c.correct_levenshtein("cat").unwrap().is_empty());
        assert!(c.correct_lcs("cat").unwrap().is_empty());
        assert_eq!(c.diagnose("cat", Algorithm::LcsOffset).unwrap(), Correction::NoCandidates);
    }

    #[test]
    fn test_empty_word_rejected() {
        let c = corrector(&["cat"]);
        assert!(matches!(
            c.correct_levenshtein(""),
            Err(AutocorrectError::InvalidArgument(_))
        ));
        assert!(matches!(c.correct_lcs(""), Err(AutocorrectError::InvalidArgument(_))));
    }

    #[test]
    fn test_ties_accumulate_in_order() {
        let c = corrector(&["bat", "bit", "but", "bxxxxx"]);
        assert_eq!(c.correct_levenshtein("bet").unwrap(), vec!["bat", "bit", "but"]);
    }

    #[test]
    fn test_levenshtein_threshold_includes_three() {
        let c = corrector(&["abcdef"]);
        // three substitutions away
        assert_eq!(c.correct_levenshtein("abcxyz").unwrap(), vec!["abcdef"]);
        // four is past the cap
        assert_eq!(
            c.diagnose("abwxyz", Algorithm::Levenshtein).unwrap(),
            Correction::NoCandidates
        );
    }

    #[test]
    fn test_lcs_threshold_is_query_length() {
        let c = corrector(&["cxyzw"]);
        // distance = (3 + 5) / 2 - 1 = 3 == len("cab"), so still accepted
        assert_eq!(c.correct_lcs("cab").unwrap(), vec!["cxyzw"]);
        let c = corrector(&["cxyzwvu"]);
        // distance = (3 + 7) / 2 - 1 = 4 > 3
        assert!(c.correct_lcs("cab").unwrap().is_empty());
    }

    #[test]
    fn test_results_share_minimum_distance() {
        let words = ["cat", "car", "can", "cart", "coat", "cast", "chat", "cab", "cattle"];
        let c = corrector(&words);
        for algorithm in [Algorithm::Levenshtein, Algorithm::LcsOffset] {
            for query in ["cqt", "ct", "caat", "cxx", "cabt", "cattel"] {
                let result = c.correct(query, algorithm).unwrap();
                if result.is_empty() {
                    continue;
                }
                let best = algorithm.distance(query, &result[0]);
                for word in &result {
                    assert_eq!(algorithm.distance(query, word), best);
                }
                for word in words {
                    assert!(algorithm.distance(query, word) >= best, "{query} {word}");
                }
            }
        }
    }

    #[test]
    fn test_correct_many_keeps_order() {
        let c = corrector(&["cat", "car", "dog"]);
        let results = c.correct_many(&["cqt", "dog", "", "zebra"], Algorithm::Levenshtein);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].0, "cqt");
        assert_eq!(
            results[0].1.as_ref().unwrap(),
            &Correction::Suggestions(vec!["cat".to_string()])
        );
        assert_eq!(results[1].1.as_ref().unwrap(), &Correction::Correct);
        assert!(results[2].1.is_err());
        assert_eq!(results[3].1.as_ref().unwrap(), &Correction::NoCandidates);
    }

    #[test]
    fn test_parallel_matches_sync() {
        let c = Arc::new(corrector(&["cat", "car", "can"]));
        let receiver = c.spawn_correction("cqt".to_string()).unwrap();
        let published = receiver.blocking_recv().unwrap();
        assert_eq!(published, c.correct_lcs("cqt").unwrap());
        assert_eq!(published, vec!["cat"]);
    }

    #[test]
    fn test_parallel_empty_word_publishes_empty() {
        let c = Arc::new(corrector(&["cat"]));
        let receiver = c.spawn_correction(String::new()).unwrap();
        assert!(receiver.blocking_recv().unwrap().is_empty());
    }

    #[test]
    fn test_parallel_tolerates_dropped_receiver() {
        let c = corrector(&["cat"]);
        let (sender, receiver) = oneshot::channel();
        drop(receiver);
        c.correct_parallel("cqt".to_string(), sender);
    }

    #[test]
    fn test_background_batch_is_bounded_and_ordered() {
        let c = Arc::new(corrector(&["cat", "car", "can", "dog"]));
        let words: Vec<String> = ["cqt", "dxg", "can", "zebra", "cxr"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        for max_in_flight in [0, 1, 2, 16] {
            let results = c.correct_in_background(&words, max_in_flight).unwrap();
            assert_eq!(results.len(), words.len());
            for (word, result) in words.iter().zip(&results) {
                assert_eq!(result, &c.correct_lcs(word).unwrap(), "{word}");
            }
        }
    }

    #[tokio::test]
    async fn test_parallel_awaited() {
        let c = Arc::new(corrector(&["cat", "car", "can"]));
        let receivers: Vec<_> = ["cqt", "can", "cxr"]
            .iter()
            .map(|w| c.spawn_correction(w.to_string()).unwrap())
            .collect();

        let mut results = Vec::new();
        for receiver in receivers {
            results.push(receiver.await.unwrap());
        }

        assert_eq!(results[0], vec!["cat"]);
        assert!(results[1].is_empty());
        assert_eq!(results[2], c.correct_lcs("cxr").unwrap());
    }
}
