//! # carmatch Core
//!
//! Core library for the carmatch recommender.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Catalog`] - Ordered, read-only list of vehicle listings
//! - [`CatalogEntry`] - A single listing with text, numeric and indicator fields
//! - [`IndicatorSchema`] - Declared fuel/transmission one-hot columns
//! - [`Vector`] - Dense feature vector with cosine similarity
//! - [`TfidfVectorizer`] - Capped-vocabulary TF-IDF weighting
//!
//! ## Example
//!
//! ```rust
//! use carmatch_core::{Catalog, ColumnMapping};
//!
//! let json = r#"[
//!     {"Car Name": "Toyota Corolla", "Price": 2500000, "KM's driven": 40000, "Fuel_Petrol": 1},
//!     {"Car Name": "Honda Civic", "Price": 3100000, "KM's driven": 12000, "Fuel_Petrol": 0}
//! ]"#;
//! let catalog = Catalog::from_json_str(json, &ColumnMapping::default()).unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.indicators().display_columns(), vec!["Fuel_Petrol"]);
//! ```

pub mod catalog;
pub mod error;
pub mod tfidf;
pub mod vector;

pub use catalog::{
    Catalog, CatalogEntry, ColumnMapping, IndicatorColumn, IndicatorFamily, IndicatorSchema,
};
pub use error::{Error, Result};
pub use tfidf::{TfidfVectorizer, MAX_VOCABULARY};
pub use vector::Vector;
