//! Named sort keys and the comparator they select.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::search::fold_case;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// How two records are compared, with the accessor for the sort field.
pub enum Comparator<T> {
    /// Case-folded lexicographic order, ties broken by exact text.
    Text(fn(&T) -> Option<&str>),
    /// Numeric order.
    Numeric(fn(&T) -> Option<Decimal>),
    /// Calendar order.
    Date(fn(&T) -> Option<NaiveDate>),
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Comparator<T> {}

/// A named field-and-direction ordering for one record type.
pub struct SortKey<T> {
    name: &'static str,
    comparator: Comparator<T>,
    direction: SortDirection,
}

impl<T> SortKey<T> {
    /// Alphabetical, A to Z.
    #[must_use]
    pub const fn text(name: &'static str, field: fn(&T) -> Option<&str>) -> Self {
        Self {
            name,
            comparator: Comparator::Text(field),
            direction: SortDirection::Ascending,
        }
    }

    /// Smallest first.
    #[must_use]
    pub const fn numeric(name: &'static str, field: fn(&T) -> Option<Decimal>) -> Self {
        Self {
            name,
            comparator: Comparator::Numeric(field),
            direction: SortDirection::Ascending,
        }
    }

    /// Most recent first.
    #[must_use]
    pub const fn date(name: &'static str, field: fn(&T) -> Option<NaiveDate>) -> Self {
        Self {
            name,
            comparator: Comparator::Date(field),
            direction: SortDirection::Descending,
        }
    }

    /// The same key in the opposite direction.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.direction = self.direction.reversed();
        self
    }

    /// Key name as offered to the user (e.g. `"lastVisit"`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    #[must_use]
    pub const fn comparator(&self) -> Comparator<T> {
        self.comparator
    }
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortKey<T> {}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Order `a` relative to `b` under `key`.
///
/// Records missing the sort value always go last, whatever the direction.
pub fn compare<T>(a: &T, b: &T, key: &SortKey<T>) -> Ordering {
    let ordering = match key.comparator {
        Comparator::Text(field) => compare_present(field(a), field(b), |x, y| {
            fold_case(x).cmp(&fold_case(y)).then_with(|| x.cmp(y))
        }),
        Comparator::Numeric(field) => compare_present(field(a), field(b), |x, y| x.cmp(&y)),
        Comparator::Date(field) => compare_present(field(a), field(b), |x, y| x.cmp(&y)),
    };

    match (ordering, key.direction) {
        (Presence::Both(order), SortDirection::Ascending) => order,
        (Presence::Both(order), SortDirection::Descending) => order.reverse(),
        (Presence::Missing(order), _) => order,
    }
}

enum Presence {
    Both(Ordering),
    Missing(Ordering),
}

fn compare_present<V>(a: Option<V>, b: Option<V>, cmp: impl FnOnce(V, V) -> Ordering) -> Presence {
    match (a, b) {
        (Some(x), Some(y)) => Presence::Both(cmp(x, y)),
        (Some(_), None) => Presence::Missing(Ordering::Less),
        (None, Some(_)) => Presence::Missing(Ordering::Greater),
        (None, None) => Presence::Missing(Ordering::Equal),
    }
}

/// Error returned when a sort key name is not offered by a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{name}' (available: {available})")]
pub struct SortKeyError {
    pub name: String,
    pub available: String,
}

/// Record types that offer named sort keys.
pub trait Sortable: Sized {
    /// Every key the page offers, default first.
    fn sort_keys() -> Vec<SortKey<Self>>;

    /// The key applied when the user has not chosen one.
    fn default_sort() -> Option<SortKey<Self>> {
        Self::sort_keys().into_iter().next()
    }

    /// Look up a key by name. A leading `-` reverses its direction.
    ///
    /// # Errors
    ///
    /// Returns [`SortKeyError`] if no key has that name.
    fn sort_key(name: &str) -> Result<SortKey<Self>, SortKeyError> {
        let (lookup, reverse) = name
            .strip_prefix('-')
            .map_or((name, false), |rest| (rest, true));
        let keys = Self::sort_keys();
        keys.iter()
            .find(|key| key.name() == lookup)
            .map(|key| if reverse { key.reversed() } else { *key })
            .ok_or_else(|| SortKeyError {
                name: name.to_string(),
                available: keys
                    .iter()
                    .map(SortKey::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::criteria::FilterCriteria;
    use super::super::item::Catalog;
    use super::super::item::testing::{Med, med};
    use super::*;

    struct Visit {
        name: &'static str,
        last_visit: Option<NaiveDate>,
    }

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    impl Sortable for Med {
        fn sort_keys() -> Vec<SortKey<Self>> {
            vec![
                SortKey::text("name", |m: &Self| Some(m.name.as_str())),
                SortKey::numeric("price", |m: &Self| Some(m.price)),
                SortKey::numeric("age", |m: &Self| m.age.map(Decimal::from)),
            ]
        }
    }

    fn names(view: &[&Med]) -> Vec<String> {
        view.iter().map(|m| m.name.clone()).collect()
    }

    fn pharmacy() -> Catalog<Med> {
        Catalog::new(vec![
            med(1, "lisinopril", "Cardiovascular", 1875),
            med(2, "Amoxicillin", "Antibiotics", 2500),
            med(3, "Paracetamol", "Pain Relief", 1250),
        ])
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let key = Med::sort_key("name").unwrap();
        let catalog = pharmacy();
        let view = catalog.filter_sorted(&FilterCriteria::new(), Some(&key));
        assert_eq!(names(&view), vec!["Amoxicillin", "lisinopril", "Paracetamol"]);
    }

    #[test]
    fn test_numeric_sort_ascending_and_reversed() {
        let catalog = pharmacy();
        let price = Med::sort_key("price").unwrap();
        let asc = catalog.filter_sorted(&FilterCriteria::new(), Some(&price));
        assert_eq!(asc.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 1, 2]);

        let desc_price = Med::sort_key("-price").unwrap();
        let desc = catalog.filter_sorted(&FilterCriteria::new(), Some(&desc_price));
        assert_eq!(desc.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let mut young = med(1, "Young", "x", 100);
        young.age = Some(28);
        let unknown = med(2, "Unknown", "x", 100);
        let mut old = med(3, "Old", "x", 100);
        old.age = Some(58);
        let catalog = Catalog::new(vec![unknown, old, young]);

        for name in ["age", "-age"] {
            let key = Med::sort_key(name).unwrap();
            let view = catalog.filter_sorted(&FilterCriteria::new(), Some(&key));
            assert_eq!(view.last().map(|m| m.id), Some(2), "sort {name}");
        }
    }

    #[test]
    fn test_date_sort_is_most_recent_first() {
        let key = SortKey::date("lastVisit", |v: &Visit| v.last_visit);
        let mut visits = [
            Visit {
                name: "Emily",
                last_visit: date("2024-01-08"),
            },
            Visit {
                name: "John",
                last_visit: date("2024-01-15"),
            },
            Visit {
                name: "Sarah",
                last_visit: date("2024-01-12"),
            },
        ];
        visits.sort_by(|a, b| compare(a, b, &key));
        let order: Vec<&str> = visits.iter().map(|v| v.name).collect();
        assert_eq!(order, vec!["John", "Sarah", "Emily"]);
    }

    #[test]
    fn test_sorting_sorted_view_is_identity() {
        let catalog = pharmacy();
        for key in Med::sort_keys() {
            let once = catalog.filter_sorted(&FilterCriteria::new(), Some(&key));
            let mut twice = once.clone();
            twice.sort_by(|a, b| compare(*a, *b, &key));
            assert_eq!(once, twice, "key {}", key.name());
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = Med::sort_key("weight").unwrap_err();
        assert_eq!(err.available, "name, price, age");
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_default_sort_is_first_key() {
        assert_eq!(Med::default_sort().map(|k| k.name()), Some("name"));
    }
}
