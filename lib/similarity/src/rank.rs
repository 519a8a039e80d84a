//! Recommendation ranking over a precomputed similarity matrix

use crate::matrix::SimilarityMatrix;
use carmatch_core::Result;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

/// A catalog position with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredPosition {
    pub position: usize,
    pub score: f32,
}

/// Ranks catalog positions by similarity to a query position
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// Top `top_n` positions most similar to `query`.
    ///
    /// Sorted by descending score, ties by ascending position. The query's
    /// own position is never returned. Fails with `IndexOutOfRange` when
    /// `query` is not a valid row.
    pub fn rank(matrix: &SimilarityMatrix, query: usize, top_n: usize) -> Result<Vec<ScoredPosition>> {
        let row = matrix.row(query)?;
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<ScoredPosition> = row
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != query)
            .map(|(position, &score)| ScoredPosition { position, score })
            .collect();

        scored.sort_by_key(|s| (Reverse(OrderedFloat(s.score)), s.position));
        scored.truncate(top_n);
        Ok(scored)
    }
}
