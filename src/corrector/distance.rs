use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest Levenshtein distance a suggestion may have before any candidate
/// has been seen.
pub const LEVENSHTEIN_THRESHOLD: usize = 3;

/// Distance metric used by the nearest-match search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exact edit distance (insert, delete, substitute)
    #[default]
    Levenshtein,
    /// Fast approximation based on aligned common characters
    LcsOffset,
}

impl Algorithm {
    pub fn distance(self, a: &str, b: &str) -> usize {
        match self {
            Algorithm::Levenshtein => levenshtein(a, b),
            Algorithm::LcsOffset => lcs_offset(a, b),
        }
    }

    /// Starting threshold for a search. The two metrics live on different
    /// scales, so each keeps its own cutoff.
    pub fn initial_threshold(self, query: &str) -> usize {
        match self {
            Algorithm::Levenshtein => LEVENSHTEIN_THRESHOLD,
            Algorithm::LcsOffset => query.chars().count(),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "levenshtein" => Ok(Algorithm::Levenshtein),
            "lcs-offset" | "lcs" => Ok(Algorithm::LcsOffset),
            _ => Err(format!("Unknown algorithm: {}", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Levenshtein => write!(f, "levenshtein"),
            Algorithm::LcsOffset => write!(f, "lcs-offset"),
        }
    }
}

/// Calculate Levenshtein distance between two strings using a single
/// rolling row of costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut costs: Vec<usize> = (0..=n).collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        costs[0] = i + 1;
        // costs[j] of the previous row, i.e. the diagonal neighbour
        let mut corner = i;

        for (j, b_char) in b_chars.iter().enumerate() {
            let upper = costs[j + 1];
            costs[j + 1] = if a_char == b_char {
                corner
            } else {
                costs[j].min(upper).min(corner) + 1
            };
            corner = upper;
        }
    }

    costs[n]
}

/// Approximate distance from the number of characters that line up while
/// letting either string drift ahead by a small offset.
///
/// On a mismatch the offsets reset. If the characters at the bare cursor
/// agree the cursor simply moves on; otherwise the smallest drift `i` is
/// searched, trying `a` ahead of `b` before `b` ahead of `a` at each `i`.
///
/// The result is `floor((len(a) + len(b)) / 2) - lcs`, saturating at zero.
pub fn lcs_offset(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    ((m + n) / 2).saturating_sub(aligned_matches(&a, &b))
}

fn aligned_matches(a: &[char], b: &[char]) -> usize {
    let (m, n) = (a.len(), b.len());
    let max_offset = m;
    let mut c = 0;
    let mut offset1 = 0;
    let mut offset2 = 0;
    let mut lcs = 0;

    while c + offset1 < m && c + offset2 < n {
        if a[c + offset1] == b[c + offset2] {
            lcs += 1;
        } else {
            offset1 = 0;
            offset2 = 0;
            if a[c] == b[c] {
                c += 1;
                continue;
            }
            for i in 1..max_offset {
                if c + i < m && a[c + i] == b[c] {
                    offset1 = i;
                    break;
                }
                if c + i < n && a[c] == b[c + i] {
                    offset2 = i;
                    break;
                }
            }
        }
        c += 1;
    }

    lcs
}
