//! All-pairs cosine similarity
//!
//! Each unordered pair is scored once and mirrored, so the matrix is
//! exactly symmetric. Upper-triangle rows are computed in parallel.

use carmatch_core::{Error, Result, Vector};
use rayon::prelude::*;
use tracing::debug;

/// Dense N×N cosine similarity matrix, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Score every pair of vectors.
    ///
    /// The diagonal is 1.0; pairs involving a zero-magnitude vector score 0.0.
    pub fn compute(vectors: &[Vector]) -> Self {
        let n = vectors.len();

        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                vectors[i + 1..]
                    .iter()
                    .map(|other| vectors[i].cosine_similarity(other))
                    .collect()
            })
            .collect();

        let mut data = vec![0.0f32; n * n];
        for (i, row) in upper.iter().enumerate() {
            data[i * n + i] = 1.0;
            for (offset, score) in row.iter().enumerate() {
                let j = i + 1 + offset;
                data[i * n + j] = *score;
                data[j * n + i] = *score;
            }
        }

        debug!(entries = n, "Computed similarity matrix");
        Self { n, data }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    /// Scores of `i` against every position
    pub fn row(&self, i: usize) -> Result<&[f32]> {
        if i >= self.n {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: self.n,
            });
        }
        Ok(&self.data[i * self.n..(i + 1) * self.n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vectors() -> Vec<Vector> {
        vec![
            Vector::new(vec![1.0, 0.0, 0.5]),
            Vector::new(vec![0.9, 0.1, 0.4]),
            Vector::new(vec![-1.0, 2.0, 0.0]),
            Vector::new(vec![0.0, 0.0, 0.0]),
            Vector::new(vec![0.3, 0.3, 0.3]),
        ]
    }

    #[test]
    fn test_symmetry_and_diagonal() {
        let m = SimilarityMatrix::compute(&sample_vectors());
        assert_eq!(m.len(), 5);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_scores_in_range() {
        let m = SimilarityMatrix::compute(&sample_vectors());
        for i in 0..m.len() {
            for score in m.row(i).unwrap() {
                assert!((-1.0..=1.0).contains(score), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let m = SimilarityMatrix::compute(&sample_vectors());
        for j in [0, 1, 2, 4] {
            assert_eq!(m.get(3, j), Some(0.0));
        }
        assert_eq!(m.get(3, 3), Some(1.0));
    }

    #[test]
    fn test_row_out_of_range() {
        let m = SimilarityMatrix::compute(&sample_vectors());
        assert!(matches!(m.row(5), Err(Error::IndexOutOfRange { index: 5, len: 5 })));
        assert_eq!(m.get(0, 5), None);
    }

    #[test]
    fn test_empty() {
        let m = SimilarityMatrix::compute(&[]);
        assert!(m.is_empty());
    }
}
