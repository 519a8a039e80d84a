//! # carmatch Similarity
//!
//! Similarity-based recommendations over a vehicle [`Catalog`](carmatch_core::Catalog).
//!
//! ## Features
//!
//! - **Feature Builder**: TF-IDF over description and feature text, plus standardized price and distance
//! - **Similarity Index**: exact all-pairs cosine similarity, symmetric by construction
//! - **Ranker**: top-N most similar entries for a catalog position
//! - **Preference Matcher**: buyer constraints to a single base entry, with an explicit fallback policy
//!
//! ## Example
//!
//! ```rust
//! use carmatch_core::{Catalog, CatalogEntry};
//! use carmatch_similarity::{FeatureConfig, PreferenceQuery, RecommendationSession};
//!
//! let catalog = Catalog::new(vec![
//!     CatalogEntry::new("Toyota Corolla", 1_800_000.0, 40_000.0).with_description("sedan alloy wheels"),
//!     CatalogEntry::new("Honda Civic", 2_200_000.0, 35_000.0).with_description("sedan sunroof"),
//!     CatalogEntry::new("Suzuki Jimny", 4_000_000.0, 5_000.0).with_description("offroad"),
//! ]);
//! let session = RecommendationSession::new(catalog, FeatureConfig::default()).unwrap();
//!
//! let similar = session.recommend(0, 2).unwrap();
//! assert_eq!(similar.positions(), vec![1, 2]);
//!
//! let query = PreferenceQuery::new("civic", 2_500_000.0, 50_000.0, "Petrol", "Manual");
//! assert_eq!(session.find_best_match(&query).map(|m| m.position), Some(1));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│  Features   │────>│   Matrix    │────>│   Ranker    │
//! │  (entries)  │     │ (tfidf+num) │     │  (cosine)   │     │   (top-N)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                                            ^
//!       │              ┌─────────────┐                               │
//!       └─────────────>│   Matcher   │───────── position ────────────┘
//!                      │(preferences)│
//!                      └─────────────┘
//! ```

pub mod explain;
pub mod features;
pub mod matcher;
pub mod matrix;
pub mod rank;
pub mod session;

// Re-export main types for convenience
pub use explain::{
    DisplayRow, IndicatorFlags, PreferenceRecommendation, Recommendation, RecommendedEntry,
};
pub use features::{FeatureBuilder, FeatureConfig, FeatureSet, StandardScaler, NUMERIC_DIM};
pub use matcher::{
    find_best_match, BestMatch, FallbackPolicy, MatchKind, PreferenceMatcher, PreferenceQuery,
};
pub use matrix::SimilarityMatrix;
pub use rank::{Ranker, ScoredPosition};
pub use session::RecommendationSession;
