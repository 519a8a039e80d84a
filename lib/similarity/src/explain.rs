//! Result structures handed to presentation layers
//!
//! Recommendations borrow catalog entries and expose a fixed display
//! projection: name, price, distance driven, condition and every
//! indicator column the catalog declares.

use crate::matcher::MatchKind;
use crate::rank::ScoredPosition;
use carmatch_core::{Catalog, CatalogEntry, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Indicator flags in schema order: fuel columns, then transmission columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFlags<'a>(Vec<(&'a str, bool)>);

impl<'a> IndicatorFlags<'a> {
    pub fn get(&self, column: &str) -> Option<bool> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, set)| *set)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, bool)> + '_ {
        self.0.iter().copied()
    }

    /// Columns whose flag is set
    pub fn set_columns(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.iter().filter(|(_, set)| *set).map(|(column, _)| column)
    }
}

impl<'a> FromIterator<(&'a str, bool)> for IndicatorFlags<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for IndicatorFlags<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, set) in &self.0 {
            map.serialize_entry(column, set)?;
        }
        map.end()
    }
}

/// Display columns of one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow<'a> {
    pub position: usize,
    pub name: &'a str,
    pub price: f64,
    pub kms_driven: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<&'a str>,
    pub indicators: IndicatorFlags<'a>,
}

impl<'a> DisplayRow<'a> {
    pub fn project(catalog: &'a Catalog, position: usize, entry: &'a CatalogEntry) -> Self {
        Self {
            position,
            name: &entry.name,
            price: entry.price,
            kms_driven: entry.kms_driven,
            condition: entry.condition.as_deref(),
            indicators: catalog
                .indicators()
                .display_columns()
                .into_iter()
                .map(|column| (column, entry.indicator(column)))
                .collect(),
        }
    }
}

/// One recommended entry
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedEntry<'a> {
    #[serde(skip)]
    pub entry: &'a CatalogEntry,
    pub score: f32,
    #[serde(flatten)]
    pub display: DisplayRow<'a>,
}

/// Ranked recommendations for one query position
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub query: usize,
    pub items: Vec<RecommendedEntry<'a>>,
}

impl<'a> Recommendation<'a> {
    /// Attach catalog entries to ranked positions
    pub fn from_ranked(catalog: &'a Catalog, query: usize, ranked: &[ScoredPosition]) -> Self {
        let items = ranked
            .iter()
            .filter_map(|scored| {
                let entry = catalog.get(scored.position)?;
                Some(RecommendedEntry {
                    entry,
                    score: scored.score,
                    display: DisplayRow::project(catalog, scored.position, entry),
                })
            })
            .collect();
        Self { query, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecommendedEntry<'a>> {
        self.items.iter()
    }

    pub fn positions(&self) -> Vec<usize> {
        self.items.iter().map(|i| i.display.position).collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Base entry chosen from buyer preferences plus its recommendations
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRecommendation<'a> {
    pub kind: MatchKind,
    pub base: DisplayRow<'a>,
    pub recommendation: Recommendation<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use carmatch_core::ColumnMapping;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CatalogEntry::new("Civic", 3.0, 30.0)
                .with_condition("Used")
                .with_indicator("Fuel_Petrol", true)
                .with_indicator("Transmission_Automatic", true),
            CatalogEntry::new("Corolla", 2.0, 20.0).with_indicator("Fuel_Petrol", false),
        ])
    }

    #[test]
    fn test_display_projection_includes_declared_indicators() {
        let catalog = catalog();
        let row = DisplayRow::project(&catalog, 1, catalog.get(1).unwrap());

        assert_eq!(row.name, "Corolla");
        assert_eq!(row.condition, None);
        assert_eq!(row.indicators.len(), 2);
        assert_eq!(row.indicators.get("Fuel_Petrol"), Some(false));
        assert_eq!(row.indicators.get("Transmission_Automatic"), Some(false));
    }

    #[test]
    fn test_indicators_keep_schema_order() {
        let mapping = ColumnMapping {
            fuel_prefix: "fuel".to_string(),
            ..ColumnMapping::default()
        };
        let records = vec![serde_json::json!({
            "Car Name": "Swift", "Price": 1.5, "KM's driven": 3,
            "fuel_Petrol": 1, "Transmission_Manual": 1
        })];
        let catalog = Catalog::from_records(&records, &mapping).unwrap();
        let row = DisplayRow::project(&catalog, 0, catalog.get(0).unwrap());

        let columns: Vec<&str> = row.indicators.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, catalog.indicators().display_columns());
        assert_eq!(
            serde_json::to_string(&row.indicators).unwrap(),
            r#"{"fuel_Petrol":true,"Transmission_Manual":true}"#
        );
    }

    #[test]
    fn test_recommendation_references_entries() {
        let catalog = catalog();
        let ranked = [ScoredPosition { position: 0, score: 0.75 }];
        let rec = Recommendation::from_ranked(&catalog, 1, &ranked);

        assert_eq!(rec.len(), 1);
        assert!(std::ptr::eq(rec.items[0].entry, catalog.get(0).unwrap()));
        assert_eq!(rec.positions(), vec![0]);
    }

    #[test]
    fn test_recommendation_serialization() {
        let catalog = catalog();
        let ranked = [ScoredPosition { position: 0, score: 0.75 }];
        let json = Recommendation::from_ranked(&catalog, 1, &ranked).to_json().unwrap();

        assert_eq!(json["query"], 1);
        assert_eq!(json["items"][0]["name"], "Civic");
        assert_eq!(json["items"][0]["condition"], "Used");
        assert_eq!(json["items"][0]["score"], 0.75);
        assert_eq!(json["items"][0]["indicators"]["Fuel_Petrol"], true);
    }
}
