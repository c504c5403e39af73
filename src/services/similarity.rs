use rayon::prelude::*;

use crate::services::vectorizer::SparseVector;

/// Dense, square cosine similarity matrix in row-major order
///
/// Entries lie in [0, 1] and the diagonal is always 1, including for items
/// whose feature vector is zero.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Computes pairwise cosine similarity of L2-normalized vectors
    ///
    /// Rows are filled in parallel. Each entry is a dot product, so the
    /// result is exactly symmetric.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        if size == 0 {
            return Self::default();
        }

        let mut values = vec![0.0f32; size * size];
        values
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if i == j {
                        1.0
                    } else {
                        vectors[i].dot(&vectors[j]).clamp(0.0, 1.0)
                    };
                }
            });

        Self { size, values }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.size || j >= self.size {
            return None;
        }
        Some(self.values[i * self.size + j])
    }

    /// Similarities between item `i` and every item, in catalog order
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.size {
            return None;
        }
        let start = i * self.size;
        Some(&self.values[start..start + self.size])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vectorizer::TfidfModel;

    fn build(docs: &[&str]) -> SimilarityMatrix {
        let (_, vectors) = TfidfModel::fit_transform(docs);
        SimilarityMatrix::from_vectors(&vectors)
    }

    #[test]
    fn test_diagonal_is_one() {
        let matrix = build(&["action space war", "action crime", "", "drama romance"]);

        for i in 0..matrix.size() {
            assert_eq!(matrix.get(i, i), Some(1.0));
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let matrix = build(&[
            "action space war hero",
            "action crime hero",
            "war drama",
            "space opera",
        ]);

        for i in 0..matrix.size() {
            for j in 0..matrix.size() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
    }

    #[test]
    fn test_entries_in_unit_range() {
        let matrix = build(&["action action space", "action space", "action", "other"]);

        for i in 0..matrix.size() {
            for &value in matrix.row(i).unwrap() {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_empty_item_has_zero_similarity_to_others() {
        let matrix = build(&["action space", "", "action"]);

        assert_eq!(matrix.get(1, 0), Some(0.0));
        assert_eq!(matrix.get(1, 2), Some(0.0));
        assert_eq!(matrix.get(1, 1), Some(1.0));
    }

    #[test]
    fn test_shared_terms_rank_higher() {
        let matrix = build(&["space war hero", "space war", "romance drama"]);

        let row = matrix.row(0).unwrap();
        assert!(row[1] > row[2]);
        assert_eq!(row[2], 0.0);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::from_vectors(&[]);

        assert_eq!(matrix.size(), 0);
        assert_eq!(matrix.row(0), None);
        assert_eq!(matrix.get(0, 0), None);
    }
}
