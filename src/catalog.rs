use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{
    error::CatalogError,
    models::{CatalogRecord, Movie, MovieId, COMBINED_ATTRIBUTES},
};

/// Immutable, position-indexed collection of movies
///
/// Built once at startup from a CSV source. A movie's id is its row
/// position, so `get(id)` is a plain slice lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Loads a catalog from a CSV file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(file)
    }

    /// Loads a catalog from any CSV reader
    ///
    /// The header must name `title` and every combined-text attribute.
    /// Other columns are ignored and empty fields become empty strings.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in std::iter::once("title").chain(COMBINED_ATTRIBUTES) {
            if !headers.iter().any(|h| h == column) {
                return Err(CatalogError::MissingColumn(column));
            }
        }

        let mut movies = Vec::new();
        for (id, record) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
            movies.push(record?.into_movie(id));
        }

        tracing::debug!(movies = movies.len(), "Catalog rows parsed");

        Ok(Self { movies })
    }

    /// Builds a catalog from already-normalized movies
    ///
    /// Ids are reassigned to match the vector positions.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let movies = movies
            .into_iter()
            .enumerate()
            .map(|(id, movie)| Movie { id, ..movie })
            .collect();
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Combined text of every movie, in catalog order
    pub fn combined_texts(&self) -> Vec<String> {
        self.movies.iter().map(Movie::combined_text).collect()
    }
}
