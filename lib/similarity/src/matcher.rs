//! Preference matching
//!
//! Picks one representative catalog entry for a buyer's constraints.
//! Entries must satisfy every filter; when none does, the matcher's
//! [`FallbackPolicy`] decides whether to relax to the nearest price.

use carmatch_core::{Catalog, CatalogEntry, IndicatorFamily, IndicatorSchema};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Buyer-supplied constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceQuery {
    /// Case-insensitive substring of the display name
    pub name_fragment: String,
    pub max_price: f64,
    pub max_kms: f64,
    /// Fuel category label, e.g. "Petrol"
    pub fuel: String,
    /// Transmission category label, e.g. "Manual"
    pub transmission: String,
}

impl PreferenceQuery {
    pub fn new(
        name_fragment: impl Into<String>,
        max_price: f64,
        max_kms: f64,
        fuel: impl Into<String>,
        transmission: impl Into<String>,
    ) -> Self {
        Self {
            name_fragment: name_fragment.into(),
            max_price,
            max_kms,
            fuel: fuel.into(),
            transmission: transmission.into(),
        }
    }

    fn label(&self, family: IndicatorFamily) -> &str {
        match family {
            IndicatorFamily::Fuel => &self.fuel,
            IndicatorFamily::Transmission => &self.transmission,
        }
    }
}

/// What to do when no entry satisfies every constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Relax all constraints and take the entry priced closest to the budget
    #[default]
    NearestPrice,
    /// Report no match
    None,
}

/// How a match was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Every constraint held
    Exact,
    /// Constraints were relaxed to the nearest price
    NearestPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestMatch {
    pub position: usize,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceMatcher {
    fallback: FallbackPolicy,
}

impl PreferenceMatcher {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// First entry in catalog order satisfying every constraint, else the
    /// fallback. `None` for an empty catalog, or when the policy is
    /// [`FallbackPolicy::None`] and nothing matched.
    pub fn find_best_match(&self, catalog: &Catalog, query: &PreferenceQuery) -> Option<BestMatch> {
        let fragment = query.name_fragment.to_lowercase();
        let exact = catalog
            .iter()
            .find(|(_, entry)| Self::satisfies(entry, query, &fragment, catalog.indicators()))
            .map(|(position, _)| BestMatch {
                position,
                kind: MatchKind::Exact,
            });
        if exact.is_some() {
            return exact;
        }

        match self.fallback {
            FallbackPolicy::None => None,
            FallbackPolicy::NearestPrice => {
                let position = Self::nearest_price(catalog, query.max_price)?;
                info!(
                    position,
                    max_price = query.max_price,
                    "No exact match, falling back to closest price"
                );
                Some(BestMatch {
                    position,
                    kind: MatchKind::NearestPrice,
                })
            }
        }
    }

    /// Position of the entry priced closest to `target`, lowest position on ties
    pub fn nearest_price(catalog: &Catalog, target: f64) -> Option<usize> {
        catalog
            .iter()
            .min_by_key(|(position, entry)| (OrderedFloat((entry.price - target).abs()), *position))
            .map(|(position, _)| position)
    }

    fn satisfies(
        entry: &CatalogEntry,
        query: &PreferenceQuery,
        fragment: &str,
        indicators: &IndicatorSchema,
    ) -> bool {
        entry.price <= query.max_price
            && entry.kms_driven <= query.max_kms
            && entry.name.to_lowercase().contains(fragment)
            && IndicatorFamily::ALL.iter().all(|family| {
                // a category the catalog has no column for is "don't care"
                match indicators.column_for(*family, query.label(*family)) {
                    Some(column) => entry.indicator(column),
                    None => true,
                }
            })
    }
}

/// Convenience wrapper using the default nearest-price fallback
pub fn find_best_match(catalog: &Catalog, query: &PreferenceQuery) -> Option<usize> {
    PreferenceMatcher::default()
        .find_best_match(catalog, query)
        .map(|m| m.position)
}
