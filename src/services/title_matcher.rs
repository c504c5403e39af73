use serde::{Deserialize, Serialize};

use crate::models::MovieId;

/// String similarity metric used to compare a query with catalog titles
///
/// Every variant yields a normalized score in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAlgorithm {
    /// 1 - edit distance / longer length
    #[default]
    Levenshtein,
    JaroWinkler,
    /// Bigram overlap
    SorensenDice,
}

impl MatchAlgorithm {
    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            MatchAlgorithm::Levenshtein => strsim::normalized_levenshtein(a, b),
            MatchAlgorithm::JaroWinkler => strsim::jaro_winkler(a, b),
            MatchAlgorithm::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }
}

/// A catalog title that matched a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch {
    pub id: MovieId,
    pub score: f64,
}

/// Resolves free-text queries to catalog titles
///
/// Comparison ignores case and surrounding whitespace. A title matches when
/// its score is at least `threshold`.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    algorithm: MatchAlgorithm,
    threshold: f64,
    titles: Vec<String>,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl TitleMatcher {
    pub fn new<'a>(
        titles: impl IntoIterator<Item = &'a str>,
        algorithm: MatchAlgorithm,
        threshold: f64,
    ) -> Self {
        Self {
            algorithm,
            threshold,
            titles: titles.into_iter().map(normalize).collect(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn algorithm(&self) -> MatchAlgorithm {
        self.algorithm
    }

    /// Scores every title meeting the threshold, in catalog order
    fn candidates(&self, query: &str) -> Vec<TitleMatch> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        self.titles
            .iter()
            .enumerate()
            .map(|(id, title)| TitleMatch {
                id,
                score: self.algorithm.score(&query, title),
            })
            .filter(|m| m.score >= self.threshold)
            .collect()
    }

    /// The single best title for `query`
    ///
    /// Ties go to the earliest catalog entry. Returns `None` for a blank
    /// query or when no title meets the threshold.
    pub fn best_match(&self, query: &str) -> Option<TitleMatch> {
        self.candidates(query)
            .into_iter()
            .fold(None, |best: Option<TitleMatch>, candidate| match best {
                Some(b) if b.score >= candidate.score => Some(b),
                _ => Some(candidate),
            })
    }

    /// Up to `n` titles meeting the threshold, best first
    pub fn close_matches(&self, query: &str, n: usize) -> Vec<TitleMatch> {
        let mut matches = self.candidates(query);
        // Stable sort keeps catalog order among equal scores
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(n);
        matches
    }
}
