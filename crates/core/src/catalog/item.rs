//! The record contract and the catalog snapshot.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::criteria::FilterCriteria;
use super::search::fold_case;
use super::sort::{SortKey, compare};

/// A record that can be searched, filtered, sorted and put in a cart.
///
/// Implementations are plain field accessors; the engine never mutates a
/// record.
pub trait CatalogItem {
    /// Stable identifier, unique within one catalog.
    type Id: Clone + Ord + fmt::Debug;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Text fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the categorical field `name`, or `None` if the record has no
    /// such dimension.
    fn dimension(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Unit price, for records that can be ordered.
    fn price(&self) -> Option<Decimal> {
        None
    }
}

/// An ordered, immutable snapshot of records loaded for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog<T> {
    items: Vec<T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Catalog<T> {
    /// Wrap a list of records, preserving their order.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// All records in load order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Unwrap into the underlying records.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: CatalogItem> Catalog<T> {
    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Records matching `criteria`, in load order.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&T> {
        let needle = fold_case(&criteria.search_text);
        self.items
            .iter()
            .filter(|item| criteria.matches_folded(*item, &needle))
            .collect()
    }

    /// Records matching `criteria`, ordered by `sort` when one is given.
    ///
    /// The sort is stable, so records that compare equal keep load order.
    #[must_use]
    pub fn filter_sorted(&self, criteria: &FilterCriteria, sort: Option<&SortKey<T>>) -> Vec<&T> {
        let mut view = self.filter(criteria);
        if let Some(key) = sort {
            view.sort_by(|a, b| compare(*a, *b, key));
        }
        view
    }

    /// Count records per value of `dimension`.
    ///
    /// Records without the dimension are not counted.
    #[must_use]
    pub fn facet_counts(&self, dimension: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for value in self.items.iter().filter_map(|item| item.dimension(dimension)) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl<T> From<Vec<T>> for Catalog<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
