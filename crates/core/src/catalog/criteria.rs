//! Filter criteria: search text plus categorical constraints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::item::CatalogItem;
use super::search::{fold_case, matches_folded};

/// Filter value meaning "no constraint on this dimension".
pub const ALL: &str = "all";

/// The full set of filters for one listing page.
///
/// Criteria are rebuilt on every input event rather than patched, so the type
/// is a plain value with a consuming builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Raw search box input.
    #[serde(default)]
    pub search_text: String,
    /// Selected value per dimension name; [`ALL`] disables the dimension.
    #[serde(default)]
    pub category_filters: BTreeMap<String, String>,
}

impl FilterCriteria {
    /// Criteria that match every item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Constrain `dimension` to `value` (or clear it with [`ALL`]).
    #[must_use]
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.category_filters.insert(dimension.into(), value.into());
        self
    }

    /// Dimensions that actually constrain results.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.category_filters
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(dimension, value)| (dimension.as_str(), value.as_str()))
    }

    /// Whether these criteria let every item through.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.active_filters().next().is_none()
    }

    /// Whether `item` satisfies the search text and every active dimension.
    pub fn matches<T: CatalogItem + ?Sized>(&self, item: &T) -> bool {
        self.matches_folded(item, &fold_case(&self.search_text))
    }

    /// Categorical check only, ignoring the search text.
    ///
    /// Values compare exactly; an item without a constrained dimension fails.
    pub fn matches_categories<T: CatalogItem + ?Sized>(&self, item: &T) -> bool {
        self.active_filters()
            .all(|(dimension, value)| item.dimension(dimension) == Some(value))
    }

    pub(crate) fn matches_folded<T: CatalogItem + ?Sized>(&self, item: &T, needle: &str) -> bool {
        matches_folded(item, needle) && self.matches_categories(item)
    }
}
