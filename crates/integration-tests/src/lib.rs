//! Integration tests for Medidesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Engine, page and checkout tests (offline)
//! cargo test -p medidesk-integration-tests
//!
//! # Including the tests that place real orders
//! MEDIDESK_GATEWAY=api MEDIDESK_API_TOKEN=... MEDIDESK_PATIENT_ID=1 \
//!     cargo test -p medidesk-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `engine_scenarios` - Worked examples for search, cart and totals
//! - `engine_properties` - Invariants checked over generated inputs
//! - `portal_pages` - Filters and sort keys of every listing page
//! - `checkout_flow` - Cart to notice, simulated and live
//!
//! This crate holds the shared fixtures: a small drug record, a sample shelf
//! and the cart actions the property tests generate.

#![cfg_attr(not(test), forbid(unsafe_code))]

use medidesk_core::{Cart, Catalog, CatalogItem, SortKey, Sortable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pharmacy record with just enough fields to exercise the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub status: String,
    pub price: Decimal,
}

impl CatalogItem for Drug {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }

    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn price(&self) -> Option<Decimal> {
        Some(self.price)
    }
}

impl Sortable for Drug {
    fn sort_keys() -> Vec<SortKey<Self>> {
        vec![
            SortKey::text("name", |d: &Self| Some(d.name.as_str())),
            SortKey::numeric("price", |d: &Self| Some(d.price)),
            SortKey::text("category", |d: &Self| Some(d.category.as_str())),
        ]
    }
}

/// Cents to a two-decimal amount.
#[must_use]
pub fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// An active drug with the given price in cents.
#[must_use]
pub fn drug(id: u32, name: &str, category: &str, cents: i64) -> Drug {
    Drug {
        id,
        name: name.to_string(),
        category: category.to_string(),
        status: "Active".to_string(),
        price: dollars(cents),
    }
}

/// A mixed shelf with one discontinued drug and one price tie.
#[must_use]
pub fn pharmacy() -> Catalog<Drug> {
    Catalog::new(vec![
        drug(1, "Aspirin", "Pain Relief", 1000),
        drug(2, "Amoxicillin", "Antibiotics", 1875),
        drug(3, "Paracetamol 500mg", "Pain Relief", 1250),
        Drug {
            status: "Discontinued".to_string(),
            ..drug(4, "Lisinopril 10mg", "Cardiovascular", 1875)
        },
        drug(5, "Vitamin D3", "Supplements", 1599),
        drug(6, "amlodipine", "Cardiovascular", 733),
        drug(7, "Metformin 500mg", "Diabetes", 899),
    ])
}

/// One user action on the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add(u32),
    Remove(u32),
}

impl CartOp {
    /// The cart after this action.
    #[must_use]
    pub fn apply(self, cart: Cart<u32>) -> Cart<u32> {
        match self {
            Self::Add(id) => cart.add(id),
            Self::Remove(id) => cart.remove(&id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_ops_apply_in_order() {
        let cart = [CartOp::Add(1), CartOp::Add(2), CartOp::Add(1), CartOp::Remove(2)]
            .into_iter()
            .fold(Cart::new(), |cart, op| op.apply(cart));
        assert_eq!(cart.quantity(&1), 2);
        assert!(!cart.contains(&2));
    }

    #[test]
    fn test_pharmacy_has_a_price_tie() {
        let shelf = pharmacy();
        let prices: Vec<Decimal> = [2, 4]
            .iter()
            .filter_map(|id| shelf.find(id).map(|d| d.price))
            .collect();
        assert_eq!(prices, vec![dollars(1875), dollars(1875)]);
    }
}
