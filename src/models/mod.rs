use serde::{Deserialize, Serialize};

/// Position of a movie in the catalog
pub type MovieId = usize;

/// Text attributes concatenated into a movie's combined text, in order
pub const COMBINED_ATTRIBUTES: [&str; 5] = ["genres", "keywords", "tagline", "cast", "director"];

/// A movie in the catalog
///
/// Every attribute is present; nulls from the source are normalized to the
/// empty string at load time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genres: String,
    pub keywords: String,
    pub tagline: String,
    pub cast: String,
    pub director: String,
}

impl Movie {
    /// Attributes joined with single spaces, in `COMBINED_ATTRIBUTES` order
    ///
    /// Leading and trailing separators are dropped, so a movie with no
    /// attributes has an empty combined text.
    pub fn combined_text(&self) -> String {
        [
            self.genres.as_str(),
            self.keywords.as_str(),
            self.tagline.as_str(),
            self.cast.as_str(),
            self.director.as_str(),
        ]
        .join(" ")
        .trim()
        .to_string()
    }
}

// ============================================================================
// Catalog Source Types
// ============================================================================

/// Raw row from the catalog CSV
///
/// Only the columns the recommender uses are read; anything else in the
/// file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl CatalogRecord {
    /// Converts the row at position `id` into a catalog movie
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title.unwrap_or_default(),
            genres: self.genres.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
            tagline: self.tagline.unwrap_or_default(),
            cast: self.cast.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
        }
    }
}

// ============================================================================
// API Types
// ============================================================================

/// A movie paired with a similarity score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMovie {
    pub id: MovieId,
    pub title: String,
    pub score: f64,
}

/// Response for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// The text the caller sent
    pub query: String,
    /// Catalog title the query resolved to
    pub matched_title: String,
    /// Recommended titles, most similar first
    pub titles: Vec<String>,
    /// Same recommendations with ids and scores
    pub results: Vec<ScoredMovie>,
}
