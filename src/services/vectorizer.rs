use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Tokens are runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Splits text into lowercase tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse vector over the model vocabulary, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists
    ///
    /// Products are accumulated in term order, so `a.dot(b)` and `b.dot(a)`
    /// are bit-for-bit equal.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// TF-IDF model fit over a whole corpus
///
/// Weighting:
/// - `tf` is the raw term count in the document
/// - `idf = ln((1 + n) / (1 + df)) + 1` (smoothed)
/// - every transformed vector is L2-normalized
///
/// The vocabulary is global, so every vector shares the same dimension.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfModel {
    /// Learns vocabulary and idf weights from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        // BTreeMap iteration gives alphabetical term indices
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push((((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as f32);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Fits the model and transforms the same documents
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let model = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|doc| model.transform(doc.as_ref()))
            .collect();
        (model, vectors)
    }

    /// Maps a document onto the fitted vocabulary
    ///
    /// Terms outside the vocabulary are dropped. A document with no known
    /// terms yields the zero vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(index, count)| (index, count as f32 * self.idf[index]))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let mut vector = SparseVector { entries };
        let norm = vector.norm();
        if norm > 0.0 {
            for (_, weight) in &mut vector.entries {
                *weight /= norm;
            }
        }
        vector
    }

    /// Number of terms in the vocabulary
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }
}
