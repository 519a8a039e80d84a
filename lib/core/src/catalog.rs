//! Vehicle catalog model
//!
//! A [`Catalog`] is an ordered, immutable list of [`CatalogEntry`] values.
//! Each entry's position is its identity for similarity lookups.
//! One-hot fuel and transmission columns are described once, at load time,
//! by an [`IndicatorSchema`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use crate::{Error, Result};

/// One vehicle listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    pub price: f64,
    pub kms_driven: f64,
    #[serde(default)]
    pub condition: Option<String>,
    /// Indicator column name -> flag
    #[serde(default)]
    pub indicators: BTreeMap<String, bool>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, price: f64, kms_driven: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            features: None,
            price,
            kms_driven,
            condition: None,
            indicators: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_features(mut self, features: impl Into<String>) -> Self {
        self.features = Some(features.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_indicator(mut self, column: impl Into<String>, value: bool) -> Self {
        self.indicators.insert(column.into(), value);
        self
    }

    /// Description and feature text joined by a space, missing parts empty
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.description.as_deref().unwrap_or(""),
            self.features.as_deref().unwrap_or("")
        )
    }

    /// Value of an indicator column; absent columns read as false
    pub fn indicator(&self, column: &str) -> bool {
        self.indicators.get(column).copied().unwrap_or(false)
    }
}

/// Family of one-hot indicator columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFamily {
    Fuel,
    Transmission,
}

impl IndicatorFamily {
    pub const ALL: [IndicatorFamily; 2] = [IndicatorFamily::Fuel, IndicatorFamily::Transmission];
}

impl fmt::Display for IndicatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorFamily::Fuel => write!(f, "fuel"),
            IndicatorFamily::Transmission => write!(f, "transmission"),
        }
    }
}

/// A single indicator column: category label plus the column it lives in
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndicatorColumn {
    pub label: String,
    pub column: String,
}

/// Declared mapping from indicator family to the columns present in a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSchema {
    families: BTreeMap<IndicatorFamily, BTreeSet<IndicatorColumn>>,
}

impl IndicatorSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the schema from column names.
    ///
    /// A column belongs to a family when it starts with the family prefix
    /// followed by `_`; the remainder is the category label.
    pub fn discover<'a, I>(columns: I, mapping: &ColumnMapping) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut schema = Self::new();
        for column in columns {
            for family in IndicatorFamily::ALL {
                let prefix = format!("{}_", mapping.prefix(family));
                if let Some(label) = column.strip_prefix(prefix.as_str()) {
                    if !label.is_empty() {
                        schema.insert(family, label, column);
                    }
                }
            }
        }
        schema
    }

    pub fn insert(&mut self, family: IndicatorFamily, label: &str, column: &str) {
        self.families.entry(family).or_default().insert(IndicatorColumn {
            label: label.to_string(),
            column: column.to_string(),
        });
    }

    /// Columns of one family, ordered by label
    pub fn columns(&self, family: IndicatorFamily) -> impl Iterator<Item = &IndicatorColumn> {
        self.families.get(&family).into_iter().flatten()
    }

    /// Column for a category label, compared ASCII case-insensitively
    pub fn column_for(&self, family: IndicatorFamily, label: &str) -> Option<&str> {
        self.columns(family)
            .find(|c| c.label.eq_ignore_ascii_case(label.trim()))
            .map(|c| c.column.as_str())
    }

    /// Every indicator column name, fuel columns first
    pub fn display_columns(&self) -> Vec<&str> {
        IndicatorFamily::ALL
            .iter()
            .flat_map(|family| self.columns(*family))
            .map(|c| c.column.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.families.values().all(BTreeSet::is_empty)
    }
}

/// Names of the source columns a catalog is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub name: String,
    pub description: String,
    pub features: String,
    pub price: String,
    pub kms_driven: String,
    pub condition: String,
    pub fuel_prefix: String,
    pub transmission_prefix: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "Car Name".to_string(),
            description: "Description".to_string(),
            features: "Car Features".to_string(),
            price: "Price".to_string(),
            kms_driven: "KM's driven".to_string(),
            condition: "Condition".to_string(),
            fuel_prefix: "Fuel".to_string(),
            transmission_prefix: "Transmission".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn prefix(&self, family: IndicatorFamily) -> &str {
        match family {
            IndicatorFamily::Fuel => &self.fuel_prefix,
            IndicatorFamily::Transmission => &self.transmission_prefix,
        }
    }
}

/// Ordered, read-only vehicle catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    indicators: IndicatorSchema,
}

impl Catalog {
    /// Build a catalog from entries, discovering indicator families from
    /// the entries' indicator columns with the default prefixes
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let columns: BTreeSet<&str> = entries
            .iter()
            .flat_map(|e| e.indicators.keys().map(String::as_str))
            .collect();
        let indicators = IndicatorSchema::discover(columns, &ColumnMapping::default());
        Self::with_indicators(entries, indicators)
    }

    pub fn with_indicators(entries: Vec<CatalogEntry>, indicators: IndicatorSchema) -> Self {
        Self {
            entries,
            indicators,
        }
    }

    /// Build a catalog from records-style JSON rows (one object per listing)
    pub fn from_records(records: &[Value], mapping: &ColumnMapping) -> Result<Self> {
        let mut rows: Vec<&Map<String, Value>> = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| Error::InvalidValue {
                row,
                column: String::new(),
                reason: "record is not a JSON object".to_string(),
            })?;
            rows.push(object);
        }

        let columns: BTreeSet<&str> = rows
            .iter()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect();

        if !records.is_empty() {
            for required in [&mapping.price, &mapping.kms_driven] {
                if !columns.contains(required.as_str()) {
                    return Err(Error::MissingColumn(required.clone()));
                }
            }
        }

        let indicators = IndicatorSchema::discover(columns.iter().copied(), mapping);
        let indicator_columns = indicators.display_columns();

        let entries = rows
            .iter()
            .enumerate()
            .map(|(row, object)| -> Result<CatalogEntry> {
                let mut entry = CatalogEntry::new(
                    text_cell(object, &mapping.name).unwrap_or_default(),
                    numeric_cell(object, row, &mapping.price)?,
                    numeric_cell(object, row, &mapping.kms_driven)?,
                );
                entry.description = text_cell(object, &mapping.description);
                entry.features = text_cell(object, &mapping.features);
                entry.condition = text_cell(object, &mapping.condition);
                for column in &indicator_columns {
                    entry
                        .indicators
                        .insert(column.to_string(), flag_cell(object.get(*column)));
                }
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::with_indicators(entries, indicators))
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str, mapping: &ColumnMapping) -> Result<Self> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        Self::from_records(&records, mapping)
    }

    pub fn from_json_file(path: impl AsRef<Path>, mapping: &ColumnMapping) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json, mapping)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    /// Entry at `position`, or `IndexOutOfRange`
    pub fn entry(&self, position: usize) -> Result<&CatalogEntry> {
        self.entries.get(position).ok_or(Error::IndexOutOfRange {
            index: position,
            len: self.entries.len(),
        })
    }

    #[inline]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CatalogEntry)> {
        self.entries.iter().enumerate()
    }

    #[inline]
    pub fn indicators(&self) -> &IndicatorSchema {
        &self.indicators
    }
}

fn text_cell(object: &Map<String, Value>, column: &str) -> Option<String> {
    match object.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn numeric_cell(object: &Map<String, Value>, row: usize, column: &str) -> Result<f64> {
    let invalid = |reason: &str| Error::InvalidValue {
        row,
        column: column.to_string(),
        reason: reason.to_string(),
    };

    let value = match object.get(column) {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid("number out of range"))?,
        Some(Value::String(s)) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| invalid("not a number"))?,
        Some(Value::Null) | None => return Err(invalid("missing value")),
        Some(_) => return Err(invalid("not a number")),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid("not a finite number"))
    }
}

fn flag_cell(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|x| x != 0.0).unwrap_or(false),
        Some(Value::String(s)) => {
            let s = s.trim();
            s == "1" || s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<Value> {
        vec![
            json!({
                "Car Name": "Toyota Corolla",
                "Description": "Well maintained",
                "Car Features": "ABS, Sunroof",
                "Price": 2_500_000,
                "KM's driven": 40_000,
                "Condition": "Used",
                "Fuel_Petrol": 1,
                "Fuel_Diesel": 0,
                "Transmission_Manual": true,
                "Transmission_Automatic": false
            }),
            json!({
                "Car Name": "Honda Civic",
                "Description": null,
                "Price": "3,100,000",
                "KM's driven": 12000.5,
                "Fuel_Petrol": "0",
                "Fuel_Diesel": "1",
                "Transmission_Manual": 0,
                "Transmission_Automatic": 1
            }),
        ]
    }

    #[test]
    fn test_from_records() {
        let catalog = Catalog::from_records(&sample_records(), &ColumnMapping::default()).unwrap();
        assert_eq!(catalog.len(), 2);

        let corolla = catalog.get(0).unwrap();
        assert_eq!(corolla.name, "Toyota Corolla");
        assert_eq!(corolla.price, 2_500_000.0);
        assert_eq!(corolla.condition.as_deref(), Some("Used"));
        assert!(corolla.indicator("Fuel_Petrol"));
        assert!(!corolla.indicator("Fuel_Diesel"));

        let civic = catalog.get(1).unwrap();
        assert_eq!(civic.price, 3_100_000.0);
        assert_eq!(civic.description, None);
        assert_eq!(civic.features, None);
        assert!(civic.indicator("Fuel_Diesel"));
        assert!(civic.indicator("Transmission_Automatic"));
    }

    #[test]
    fn test_indicator_schema_discovery() {
        let catalog = Catalog::from_records(&sample_records(), &ColumnMapping::default()).unwrap();
        let schema = catalog.indicators();

        assert_eq!(
            schema.display_columns(),
            vec![
                "Fuel_Diesel",
                "Fuel_Petrol",
                "Transmission_Automatic",
                "Transmission_Manual"
            ]
        );
        assert_eq!(schema.column_for(IndicatorFamily::Fuel, "petrol"), Some("Fuel_Petrol"));
        assert_eq!(
            schema.column_for(IndicatorFamily::Transmission, "MANUAL"),
            Some("Transmission_Manual")
        );
        assert_eq!(schema.column_for(IndicatorFamily::Fuel, "Electric"), None);
    }

    #[test]
    fn test_discovery_requires_prefix_separator() {
        let schema = IndicatorSchema::discover(
            ["Fuel Type", "Fuel_", "Fuel_CNG", "Transmission"],
            &ColumnMapping::default(),
        );
        assert_eq!(schema.display_columns(), vec!["Fuel_CNG"]);
    }

    #[test]
    fn test_missing_price_column() {
        let records = vec![json!({"Car Name": "X", "KM's driven": 10})];
        let err = Catalog::from_records(&records, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Price"));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_invalid_numeric_cell() {
        let records = vec![
            json!({"Car Name": "A", "Price": 100, "KM's driven": 10}),
            json!({"Car Name": "B", "Price": "cheap", "KM's driven": 10}),
        ];
        let err = Catalog::from_records(&records, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 1, .. }));
    }

    #[test]
    fn test_non_object_record() {
        let records = vec![json!([1, 2, 3])];
        let err = Catalog::from_records(&records, &ColumnMapping::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn test_empty_records() {
        let catalog = Catalog::from_records(&[], &ColumnMapping::default()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.indicators().is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&sample_records()).unwrap()).unwrap();

        let catalog = Catalog::from_json_file(&path, &ColumnMapping::default()).unwrap();
        assert_eq!(catalog.len(), 2);

        let missing = Catalog::from_json_file(dir.path().join("nope.json"), &ColumnMapping::default());
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = ColumnMapping {
            name: "model".to_string(),
            price: "cost".to_string(),
            kms_driven: "odometer".to_string(),
            fuel_prefix: "fuel".to_string(),
            ..ColumnMapping::default()
        };
        let records = vec![json!({"model": "Swift", "cost": 1.5, "odometer": 3, "fuel_LPG": 1})];
        let catalog = Catalog::from_records(&records, &mapping).unwrap();
        assert_eq!(catalog.get(0).unwrap().name, "Swift");
        assert_eq!(catalog.indicators().column_for(IndicatorFamily::Fuel, "lpg"), Some("fuel_LPG"));
    }

    #[test]
    fn test_new_discovers_indicators_from_entries() {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("A", 1.0, 1.0).with_indicator("Fuel_Petrol", true),
            CatalogEntry::new("B", 1.0, 1.0).with_indicator("Transmission_Manual", false),
        ]);
        assert_eq!(
            catalog.indicators().display_columns(),
            vec!["Fuel_Petrol", "Transmission_Manual"]
        );
        assert!(matches!(
            catalog.entry(5),
            Err(Error::IndexOutOfRange { index: 5, len: 2 })
        ));
    }
}
