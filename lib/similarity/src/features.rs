//! Feature Builder
//!
//! Turns every catalog entry into one fixed-width vector:
//! a TF-IDF sub-vector over description + feature text, followed by the
//! standardized `[price, kms_driven]` pair. Both parts can be weighted.

use carmatch_core::{Catalog, Error, Result, TfidfVectorizer, Vector, MAX_VOCABULARY};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of numeric dimensions appended after the text features
pub const NUMERIC_DIM: usize = 2;

/// Feature weighting and vocabulary settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    /// Vocabulary cap, 1..=500
    pub max_vocabulary: usize,
    /// Multiplier applied to the TF-IDF sub-vector
    pub text_weight: f32,
    /// Multiplier applied to the standardized numeric sub-vector
    pub numeric_weight: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_vocabulary: MAX_VOCABULARY,
            text_weight: 1.0,
            numeric_weight: 1.0,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_vocabulary == 0 || self.max_vocabulary > MAX_VOCABULARY {
            return Err(Error::InvalidConfig(format!(
                "max_vocabulary must be between 1 and {}, got {}",
                MAX_VOCABULARY, self.max_vocabulary
            )));
        }
        for (name, weight) in [
            ("text_weight", self.text_weight),
            ("numeric_weight", self.numeric_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Zero-mean / unit-variance scaler for one numeric column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    /// Number of values the scaler was fitted on
    pub samples: usize,
}

impl StandardScaler {
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                samples: 0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std: variance.sqrt(),
            samples: values.len(),
        }
    }

    /// True when the column carries no spread to scale by.
    ///
    /// The variance of a constant column is only zero up to the rounding
    /// error of computing the mean, so anything within
    /// `n * eps * var + (n * mean * eps)^2` counts as constant.
    pub fn is_degenerate(&self) -> bool {
        if !self.std.is_finite() {
            return true;
        }
        let n = self.samples as f64;
        let variance = self.std * self.std;
        let bound = n * f64::EPSILON * variance + (n * self.mean * f64::EPSILON).powi(2);
        variance <= bound
    }

    /// `(value - mean) / std`, or 0.0 for a degenerate column
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.mean) / self.std
        }
    }
}

/// Fitted features for a whole catalog, indexed by catalog position
#[derive(Debug, Clone)]
pub struct FeatureSet {
    vectors: Vec<Vector>,
    vectorizer: TfidfVectorizer,
    price: StandardScaler,
    kms_driven: StandardScaler,
}

impl FeatureSet {
    #[inline]
    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&Vector> {
        self.vectors.get(position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Retained vocabulary, in column order
    pub fn vocabulary(&self) -> &[String] {
        self.vectorizer.vocabulary()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn text_dim(&self) -> usize {
        self.vectorizer.len()
    }

    /// Total vector width: text terms plus the numeric pair
    pub fn dim(&self) -> usize {
        self.text_dim() + NUMERIC_DIM
    }

    pub fn price_scaler(&self) -> StandardScaler {
        self.price
    }

    pub fn kms_scaler(&self) -> StandardScaler {
        self.kms_driven
    }
}

/// Builds [`FeatureSet`]s from catalogs
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn build(&self, catalog: &Catalog) -> Result<FeatureSet> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let documents: Vec<String> = catalog
            .entries()
            .iter()
            .map(|e| e.combined_text())
            .collect();
        let mut vectorizer = TfidfVectorizer::new(self.config.max_vocabulary);
        let text_vectors = vectorizer.fit_transform(&documents);

        let prices: Vec<f64> = catalog.entries().iter().map(|e| e.price).collect();
        let kms: Vec<f64> = catalog.entries().iter().map(|e| e.kms_driven).collect();
        let price = StandardScaler::fit(&prices);
        let kms_driven = StandardScaler::fit(&kms);

        let vectors = text_vectors
            .iter()
            .zip(prices.iter().zip(kms.iter()))
            .map(|(text, (p, k))| {
                let numeric = Vector::new(vec![price.scale(*p) as f32, kms_driven.scale(*k) as f32]);
                (text * self.config.text_weight).concat(&(&numeric * self.config.numeric_weight))
            })
            .collect();

        debug!(
            entries = catalog.len(),
            vocabulary = vectorizer.len(),
            price_degenerate = price.is_degenerate(),
            kms_degenerate = kms_driven.is_degenerate(),
            "Built catalog features"
        );

        Ok(FeatureSet {
            vectors,
            vectorizer,
            price,
            kms_driven,
        })
    }
}
