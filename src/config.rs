//! File-based configuration for the `carmatch` binary

use carmatch_core::{ColumnMapping, Result};
use carmatch_similarity::{FallbackPolicy, FeatureConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names, feature weighting and matching policy.
/// Every section is optional in the JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarmatchConfig {
    pub columns: ColumnMapping,
    pub features: FeatureConfig,
    pub fallback: FallbackPolicy,
}

impl CarmatchConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.features.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carmatch_core::Error;

    #[test]
    fn test_partial_config() {
        let config = CarmatchConfig::from_json_str(
            r#"{"columns": {"price": "cost"}, "fallback": "none"}"#,
        )
        .unwrap();
        assert_eq!(config.columns.price, "cost");
        assert_eq!(config.columns.name, "Car Name");
        assert_eq!(config.fallback, FallbackPolicy::None);
        assert_eq!(config.features, FeatureConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = CarmatchConfig::from_json_str(r#"{"features": {"max_vocabulary": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = CarmatchConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
