//! Recommendation session
//!
//! Owns one catalog together with the features and similarity matrix
//! derived from it. Built once, read-only afterwards, so it can be shared
//! across threads behind an `Arc`.

use crate::explain::{DisplayRow, PreferenceRecommendation, Recommendation};
use crate::features::{FeatureBuilder, FeatureConfig, FeatureSet};
use crate::matcher::{BestMatch, FallbackPolicy, PreferenceMatcher, PreferenceQuery};
use crate::matrix::SimilarityMatrix;
use crate::rank::Ranker;
use carmatch_core::{Catalog, Result};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RecommendationSession {
    catalog: Catalog,
    features: FeatureSet,
    matrix: SimilarityMatrix,
    matcher: PreferenceMatcher,
}

impl RecommendationSession {
    /// Build features and the similarity matrix for `catalog`
    pub fn new(catalog: Catalog, config: FeatureConfig) -> Result<Self> {
        let features = FeatureBuilder::new(config)?.build(&catalog)?;
        let matrix = SimilarityMatrix::compute(features.vectors());

        info!(
            entries = catalog.len(),
            dim = features.dim(),
            "Recommendation session ready"
        );

        Ok(Self {
            catalog,
            features,
            matrix,
            matcher: PreferenceMatcher::default(),
        })
    }

    /// Replace the policy used when no entry meets every preference
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.matcher = PreferenceMatcher::new(fallback);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.matcher.fallback()
    }

    /// Entries most similar to the one at `query`
    pub fn recommend(&self, query: usize, top_n: usize) -> Result<Recommendation<'_>> {
        let ranked = Ranker::rank(&self.matrix, query, top_n)?;
        Ok(Recommendation::from_ranked(&self.catalog, query, &ranked))
    }

    pub fn find_best_match(&self, query: &PreferenceQuery) -> Option<BestMatch> {
        self.matcher.find_best_match(&self.catalog, query)
    }

    /// Match preferences to a base entry, then recommend around it.
    /// `Ok(None)` when no base entry could be chosen.
    pub fn recommend_for_preferences(
        &self,
        query: &PreferenceQuery,
        top_n: usize,
    ) -> Result<Option<PreferenceRecommendation<'_>>> {
        let Some(best) = self.find_best_match(query) else {
            return Ok(None);
        };

        let entry = self.catalog.entry(best.position)?;
        Ok(Some(PreferenceRecommendation {
            kind: best.kind,
            base: DisplayRow::project(&self.catalog, best.position, entry),
            recommendation: self.recommend(best.position, top_n)?,
        }))
    }
}
