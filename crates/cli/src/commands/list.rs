//! List a catalog through the search box, filters and sort selector.

use std::io::Write;

use medidesk_core::{Catalog, FilterCriteria, Sortable};
use medidesk_portal::{CatalogKind, Listing, fixtures};
use tracing::debug;

use super::{CommandError, OutputFormat, check_dimension};

/// What the user typed and picked on the page.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub search: String,
    pub filters: Vec<(String, String)>,
    /// Sort key name, `-` prefixed to reverse. The page default when `None`.
    pub sort: Option<String>,
}

impl Query {
    /// Criteria for `T`'s page.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownDimension`] if a filter names a
    /// dimension the page does not offer.
    pub fn criteria<T: Listing>(&self) -> Result<FilterCriteria, CommandError> {
        let mut criteria = FilterCriteria::new().search(self.search.as_str());
        for (dimension, value) in &self.filters {
            check_dimension::<T>(dimension)?;
            criteria = criteria.with(dimension.as_str(), value.as_str());
        }
        Ok(criteria)
    }

    /// The records of `catalog` the page would show, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown dimensions or sort keys.
    pub fn select<'a, T: Listing>(
        &self,
        catalog: &'a Catalog<T>,
    ) -> Result<Vec<&'a T>, CommandError> {
        let criteria = self.criteria::<T>()?;
        let sort = match &self.sort {
            Some(name) => Some(T::sort_key(name)?),
            None => T::default_sort(),
        };
        Ok(catalog.filter_sorted(&criteria, sort.as_ref()))
    }
}

/// Print the records of `kind` matching `query`.
///
/// # Errors
///
/// Returns an error if the query is invalid or output cannot be written.
pub fn run(kind: CatalogKind, query: &Query, format: OutputFormat) -> Result<(), CommandError> {
    with_listing!(kind, list(query, format))
}

fn list<T: Listing>(query: &Query, format: OutputFormat) -> Result<(), CommandError> {
    let catalog = fixtures::load::<T>()?;
    let view = query.select(&catalog)?;
    debug!(catalog = %T::KIND, shown = view.len(), total = catalog.len(), "Listed");

    let mut out = std::io::stdout().lock();
    if let Some(rendered) = format.structured(&view)? {
        writeln!(out, "{rendered}")?;
        return Ok(());
    }
    for item in &view {
        writeln!(out, "{}", item.summary())?;
    }
    writeln!(out, "Showing {} of {} {}", view.len(), catalog.len(), T::KIND)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use medidesk_portal::pages::{Doctor, Medicine, Patient};

    use super::*;

    #[test]
    fn test_default_query_shows_everything_in_default_order() {
        let medicines = fixtures::load::<Medicine>().unwrap();
        let view = Query::default().select(&medicines).unwrap();
        assert_eq!(view.len(), medicines.len());
        let sorted: Vec<String> = view.iter().map(|m| m.name.clone()).collect();
        let mut expected = sorted.clone();
        expected.sort_by_key(|name| name.to_lowercase());
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_filter_and_search_combine() {
        let patients = fixtures::load::<Patient>().unwrap();
        let query = Query {
            search: String::new(),
            filters: vec![("status".to_string(), "Active".to_string())],
            sort: None,
        };
        let view = query.select(&patients).unwrap();
        assert!(!view.is_empty());
        assert!(view.iter().all(|p| p.status.as_str() == "Active"));
    }

    #[test]
    fn test_reverse_sort() {
        let doctors = fixtures::load::<Doctor>().unwrap();
        let query = Query {
            sort: Some("-experience".to_string()),
            ..Query::default()
        };
        let view = query.select(&doctors).unwrap();
        let years: Vec<u32> = view.iter().map(|d| d.experience_years).collect();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rejects_unknown_filter_and_sort() {
        let medicines = fixtures::load::<Medicine>().unwrap();
        let query = Query {
            filters: vec![("ward".to_string(), "A".to_string())],
            ..Query::default()
        };
        assert!(matches!(
            query.select(&medicines),
            Err(CommandError::UnknownDimension { .. })
        ));

        let query = Query {
            sort: Some("rating".to_string()),
            ..Query::default()
        };
        assert!(matches!(query.select(&medicines), Err(CommandError::SortKey(_))));
    }
}
