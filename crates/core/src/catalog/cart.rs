//! Quantity-keyed cart.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;
use tracing::debug;

use super::item::{Catalog, CatalogItem};

/// Selected items and their quantities.
///
/// Every stored quantity is at least 1: decrementing an entry to zero removes
/// it. The consuming methods (`add`, `remove`, ...) return the updated cart so
/// callers can treat it as a value; the `*_mut` forms update in place.
///
/// Serialized as an `id -> quantity` map. Deserializing rejects a map with a
/// zero quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart<Id: Ord> {
    entries: BTreeMap<Id, u32>,
}

/// A restored cart held an entry with quantity zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cart entry {id} has quantity 0")]
pub struct ZeroQuantityError {
    /// Debug rendering of the offending id.
    pub id: String,
}

impl<Id: Ord + fmt::Debug> TryFrom<BTreeMap<Id, u32>> for Cart<Id> {
    type Error = ZeroQuantityError;

    fn try_from(entries: BTreeMap<Id, u32>) -> Result<Self, Self::Error> {
        if let Some((id, _)) = entries.iter().find(|(_, quantity)| **quantity == 0) {
            return Err(ZeroQuantityError {
                id: format!("{id:?}"),
            });
        }
        Ok(Self { entries })
    }
}

impl<Id: Ord + Serialize> Serialize for Cart<Id> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, Id: Ord + fmt::Debug + Deserialize<'de>> Deserialize<'de> for Cart<Id> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<Id, u32>::deserialize(deserializer)?;
        Self::try_from(entries).map_err(de::Error::custom)
    }
}

impl<Id: Ord> Default for Cart<Id> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

/// A cart entry resolved against the catalog, for display and checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine<Id> {
    pub id: Id,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl<Id: Ord + Clone> Cart<Id> {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart with one more of `id`.
    #[must_use]
    pub fn add(mut self, id: Id) -> Self {
        self.add_mut(id);
        self
    }

    /// Cart with one less of `id`; the entry disappears at zero.
    ///
    /// Removing an id that is not in the cart is a no-op.
    #[must_use]
    pub fn remove(mut self, id: &Id) -> Self {
        self.remove_mut(id);
        self
    }

    /// Cart with the quantity of `id` replaced; zero removes the entry.
    #[must_use]
    pub fn with_quantity(mut self, id: Id, quantity: u32) -> Self {
        self.set_quantity_mut(id, quantity);
        self
    }

    /// Increment `id` in place, starting at 1.
    pub fn add_mut(&mut self, id: Id) {
        let quantity = self.entries.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
    }

    /// Decrement `id` in place, deleting the entry when it reaches zero.
    pub fn remove_mut(&mut self, id: &Id) {
        match self.entries.get_mut(id) {
            Some(quantity) if *quantity > 1 => *quantity -= 1,
            Some(_) => {
                self.entries.remove(id);
            }
            None => {}
        }
    }

    /// Replace the quantity of `id` in place; zero deletes the entry.
    pub fn set_quantity_mut(&mut self, id: Id, quantity: u32) {
        if quantity == 0 {
            self.entries.remove(&id);
        } else {
            self.entries.insert(id, quantity);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Quantity of `id`, zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &Id) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    /// Whether `id` is in the cart.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, quantity)` pairs in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&Id, u32)> {
        self.entries.iter().map(|(id, quantity)| (id, *quantity))
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.entries.values().map(|&quantity| u64::from(quantity)).sum()
    }

    /// Sum of `quantity * price` over entries that resolve in `catalog`.
    ///
    /// Ids missing from the catalog, or records without a price, add nothing.
    #[must_use]
    pub fn total_price<T>(&self, catalog: &Catalog<T>) -> Decimal
    where
        T: CatalogItem<Id = Id>,
        Id: fmt::Debug,
    {
        self.lines(catalog).iter().map(|line| line.line_total).sum()
    }

    /// Entries resolved against `catalog`, skipping ids it no longer has.
    #[must_use]
    pub fn lines<T>(&self, catalog: &Catalog<T>) -> Vec<CartLine<Id>>
    where
        T: CatalogItem<Id = Id>,
        Id: fmt::Debug,
    {
        self.entries
            .iter()
            .filter_map(|(id, &quantity)| {
                let Some(unit_price) = catalog.find(id).and_then(CatalogItem::price) else {
                    debug!(?id, quantity, "Cart entry has no priced catalog record, skipping");
                    return None;
                };
                Some(CartLine {
                    id: id.clone(),
                    quantity,
                    unit_price,
                    line_total: unit_price * Decimal::from(quantity),
                })
            })
            .collect()
    }
}

impl<Id: Ord + Clone> FromIterator<Id> for Cart<Id> {
    /// Build a cart by adding each id once.
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut cart = Self::new();
        for id in iter {
            cart.add_mut(id);
        }
        cart
    }
}
