//! Generic catalog engine.
//!
//! Every listing page runs the same left-to-right pipeline over an immutable
//! snapshot of records:
//!
//! ```text
//! items -> search predicate -> category predicates -> sort -> view
//!                                       \-> cart (id -> quantity) -> totals
//! ```
//!
//! Pages plug in by implementing [`CatalogItem`] (field accessors) and,
//! optionally, [`Sortable`] (named sort keys). Nothing in here performs I/O or
//! holds shared state.

mod cart;
mod criteria;
mod item;
mod search;
mod sort;
mod totals;

pub use cart::{Cart, CartLine, ZeroQuantityError};
pub use criteria::{ALL, FilterCriteria};
pub use item::{Catalog, CatalogItem};
pub use search::matches_search;
pub use sort::{Comparator, SortDirection, SortKey, SortKeyError, Sortable, compare};
pub use totals::{DEFAULT_TAX_RATE, Fee, OrderTotals, compute_totals};
