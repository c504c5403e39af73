use std::time::Instant;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{Movie, ScoredMovie},
    services::{
        similarity::SimilarityMatrix,
        title_matcher::{MatchAlgorithm, TitleMatcher},
        vectorizer::TfidfModel,
    },
};

/// Outcome of ranking the catalog against a query
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Catalog movie the query resolved to
    pub matched: ScoredMovie,
    /// Most similar movies first; the matched movie itself is included
    pub results: Vec<ScoredMovie>,
}

impl Ranking {
    pub fn titles(&self) -> Vec<String> {
        self.results.iter().map(|m| m.title.clone()).collect()
    }
}

/// Content-based movie recommender
///
/// Holds everything derived from the catalog: the TF-IDF model, the
/// pairwise similarity matrix and the title matcher. It is built once and
/// never mutated, so a single instance can be shared across requests.
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    model: TfidfModel,
    similarity: SimilarityMatrix,
    matcher: TitleMatcher,
}

impl Recommender {
    /// Vectorizes the catalog and precomputes all pairwise similarities
    pub fn build(catalog: Catalog, algorithm: MatchAlgorithm, threshold: f64) -> Self {
        let start = Instant::now();

        // 1. Vectorize combined text with a single catalog-wide vocabulary
        let documents = catalog.combined_texts();
        let (model, vectors) = TfidfModel::fit_transform(&documents);

        tracing::info!(
            movies = catalog.len(),
            vocabulary = model.dimension(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Feature vectors built"
        );

        // 2. Pairwise cosine similarity
        let similarity = SimilarityMatrix::from_vectors(&vectors);

        tracing::info!(
            size = similarity.size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity matrix built"
        );

        // 3. Title index for fuzzy lookups
        let matcher = TitleMatcher::new(catalog.titles(), algorithm, threshold);

        if catalog.is_empty() {
            tracing::warn!("Catalog is empty; every query will report no match");
        }

        Self {
            catalog,
            model,
            similarity,
            matcher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &TfidfModel {
        &self.model
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Resolves free text to the closest catalog movie
    pub fn resolve_title(&self, query: &str) -> AppResult<&Movie> {
        let found = self
            .matcher
            .best_match(query)
            .and_then(|m| self.catalog.get(m.id));

        match found {
            Some(movie) => Ok(movie),
            None => {
                tracing::debug!(query = %query, "No title match");
                Err(no_match(query))
            }
        }
    }

    /// Ranks every movie by similarity to the one `query` resolves to
    ///
    /// Scores are sorted descending with ties kept in catalog order, then
    /// truncated to `limit`.
    pub fn rank(&self, query: &str, limit: usize) -> AppResult<Ranking> {
        if limit == 0 {
            return Err(AppError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }

        let title_match = self.matcher.best_match(query).ok_or_else(|| {
            tracing::debug!(query = %query, "No title match");
            no_match(query)
        })?;

        let matched_movie = self
            .catalog
            .get(title_match.id)
            .ok_or_else(|| AppError::Internal(format!("movie {} missing", title_match.id)))?;

        let row = self.similarity.row(title_match.id).ok_or_else(|| {
            AppError::Internal(format!("similarity row {} missing", title_match.id))
        })?;

        let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        let results: Vec<ScoredMovie> = scored
            .into_iter()
            .filter_map(|(id, score)| {
                self.catalog.get(id).map(|movie| ScoredMovie {
                    id,
                    title: movie.title.clone(),
                    score: score as f64,
                })
            })
            .collect();

        tracing::info!(
            query = %query,
            matched = %matched_movie.title,
            match_score = title_match.score,
            results = results.len(),
            "Recommendations ranked"
        );

        Ok(Ranking {
            matched: ScoredMovie {
                id: matched_movie.id,
                title: matched_movie.title.clone(),
                score: title_match.score,
            },
            results,
        })
    }

    /// Titles of the `limit` movies most similar to the one `query` names
    pub fn recommend(&self, query: &str, limit: usize) -> AppResult<Vec<String>> {
        self.rank(query, limit).map(|ranking| ranking.titles())
    }

    /// Catalog titles close to `query`, best first, scored by the matcher
    pub fn close_matches(&self, query: &str, n: usize) -> Vec<ScoredMovie> {
        self.matcher
            .close_matches(query, n)
            .into_iter()
            .filter_map(|m| {
                self.catalog.get(m.id).map(|movie| ScoredMovie {
                    id: m.id,
                    title: movie.title.clone(),
                    score: m.score,
                })
            })
            .collect()
    }
}

fn no_match(query: &str) -> AppError {
    AppError::NotFound(format!("No movie found matching '{}'", query.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
title,genres,keywords,tagline,cast,director
Avatar,Action Adventure Fantasy,space war future alien,Enter the World of Pandora.,Sam Worthington Zoe Saldana,James Cameron
Aliens,Action Horror Science Fiction,space alien marine,This time it's war.,Sigourney Weaver,James Cameron
Titanic,Drama Romance,ship iceberg love,Nothing on Earth could come between them.,Leonardo DiCaprio Kate Winslet,James Cameron
The Notebook,Drama Romance,love letters,Behind every great love is a great story.,Ryan Gosling Rachel McAdams,Nick Cassavetes
Interstellar,Adventure Drama Science Fiction,space wormhole future,Mankind was born on Earth.,Matthew McConaughey,Christopher Nolan
Inception,Action Science Fiction,dream heist,Your mind is the scene of the crime.,Leonardo DiCaprio,Christopher Nolan
Untitled,,,,,
";

    fn recommender() -> Recommender {
        let catalog = Catalog::from_reader(CATALOG.as_bytes()).unwrap();
        Recommender::build(catalog, MatchAlgorithm::Levenshtein, 0.6)
    }

    #[test]
    fn test_exact_title_ranks_itself_first() {
        let titles = recommender().recommend("Avatar", 5).unwrap();

        assert_eq!(titles.len(), 5);
        assert_eq!(titles[0], "Avatar");
    }

    #[test]
    fn test_similar_movies_rank_above_unrelated() {
        let ranking = recommender().rank("Titanic", 7).unwrap();

        // Every other movie shares at least a genre, a director or a cast member
        assert_eq!(ranking.results[0].title, "Titanic");
        assert!(ranking.results[1..6].iter().all(|m| m.score > 0.0));
        assert_eq!(ranking.results[6].title, "Untitled");
        assert_eq!(ranking.results[6].score, 0.0);
    }

    #[test]
    fn test_result_count_never_exceeds_limit_or_catalog() {
        let recommender = recommender();

        assert_eq!(recommender.recommend("Avatar", 1).unwrap().len(), 1);
        assert_eq!(recommender.recommend("Avatar", 3).unwrap().len(), 3);
        assert_eq!(
            recommender.recommend("Avatar", 100).unwrap().len(),
            recommender.catalog().len()
        );
    }

    #[test]
    fn test_misspelled_query_resolves() {
        let ranking = recommender().rank("Intersteller", 3).unwrap();

        assert_eq!(ranking.matched.title, "Interstellar");
        assert_eq!(ranking.results[0].title, "Interstellar");
        assert_eq!(ranking.results[0].score, 1.0);
    }

    #[test]
    fn test_scores_are_descending() {
        let ranking = recommender().rank("Aliens", 7).unwrap();

        for pair in ranking.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_zero_score_ties_keep_catalog_order() {
        let ranking = recommender().rank("Untitled", 7).unwrap();

        assert_eq!(ranking.results[0].title, "Untitled");
        let rest: Vec<usize> = ranking.results[1..].iter().map(|m| m.id).collect();
        assert_eq!(rest, vec![0, 1, 2, 3, 4, 5]);
        assert!(ranking.results[1..].iter().all(|m| m.score == 0.0));
    }

    #[test]
    fn test_empty_query_is_not_found() {
        let recommender = recommender();

        assert!(matches!(recommender.recommend("", 5), Err(AppError::NotFound(_))));
        assert!(matches!(recommender.recommend("   ", 5), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let err = recommender().recommend("Qwxzqwxzqwxz", 5).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let err = recommender().recommend("Avatar", 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_catalog_never_matches() {
        let recommender = Recommender::build(Catalog::default(), MatchAlgorithm::Levenshtein, 0.0);

        assert!(matches!(
            recommender.recommend("Avatar", 5),
            Err(AppError::NotFound(_))
        ));
        assert!(recommender.close_matches("Avatar", 5).is_empty());
    }

    #[test]
    fn test_resolve_title() {
        let recommender = recommender();

        assert_eq!(recommender.resolve_title("inception").unwrap().id, 5);
        assert!(recommender.resolve_title("").is_err());
    }

    #[test]
    fn test_close_matches_carry_titles() {
        let matches = recommender().close_matches("Alien", 2);

        assert_eq!(matches[0].title, "Aliens");
        assert!(matches[0].score >= 0.6);
    }

    #[test]
    fn test_similarity_invariants_hold_for_built_catalog() {
        let recommender = recommender();
        let matrix = recommender.similarity();

        for i in 0..matrix.size() {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..matrix.size() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!(recommender.model().dimension() > 0);
    }
}
