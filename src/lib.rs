//! # carmatch
//!
//! Pre-owned car recommendations from a fixed catalog.
//!
//! carmatch turns every listing into a feature vector (TF-IDF over its
//! description and feature text, plus standardized price and distance
//! driven), scores all pairs with cosine similarity and ranks the closest
//! listings for a chosen entry. Buyer preferences are mapped to a base
//! entry first, with an explicit policy for when nothing matches exactly.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! carmatch --catalog cars.json similar --index 3 --top-n 5
//! carmatch --catalog cars.json match --name corolla --max-price 2000000 \
//!     --max-kms 50000 --fuel Petrol --transmission Manual
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use carmatch::prelude::*;
//!
//! let catalog = Catalog::from_json_file("cars.json", &ColumnMapping::default()).unwrap();
//! let session = RecommendationSession::new(catalog, FeatureConfig::default()).unwrap();
//!
//! let query = PreferenceQuery::new("corolla", 2_000_000.0, 50_000.0, "Petrol", "Manual");
//! if let Some(result) = session.recommend_for_preferences(&query, 5).unwrap() {
//!     println!("{:?} match: {}", result.kind, result.base.name);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`carmatch-core`](https://docs.rs/carmatch-core) - Catalog model, JSON ingestion, TF-IDF, vectors
//! - [`carmatch-similarity`](https://docs.rs/carmatch-similarity) - Features, similarity matrix, ranking, matching

pub mod config;

pub use config::CarmatchConfig;

// Re-export core types
pub use carmatch_core::{
    Catalog, CatalogEntry, ColumnMapping, Error, IndicatorFamily, IndicatorSchema, Result,
    TfidfVectorizer, Vector,
};

// Re-export similarity engine
pub use carmatch_similarity::{
    find_best_match, BestMatch, DisplayRow, FallbackPolicy, FeatureBuilder, FeatureConfig,
    FeatureSet, IndicatorFlags, MatchKind, PreferenceMatcher, PreferenceQuery,
    PreferenceRecommendation, Ranker, Recommendation, RecommendationSession, ScoredPosition,
    SimilarityMatrix,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogEntry, CarmatchConfig, ColumnMapping, Error, FallbackPolicy,
        FeatureConfig, MatchKind, PreferenceQuery, Recommendation, RecommendationSession, Result,
    };
}
