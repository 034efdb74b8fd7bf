//! Order totals derived from a cart.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::item::{Catalog, CatalogItem};
use crate::types::{Price, round_currency};

/// Sales tax applied at checkout (8 %).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// A flat charge that is only added when `included` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub label: String,
    pub amount: Decimal,
    pub included: bool,
}

impl Fee {
    #[must_use]
    pub fn new(label: impl Into<String>, amount: Decimal, included: bool) -> Self {
        Self {
            label: label.into(),
            amount,
            included,
        }
    }

    /// A fee that always applies.
    #[must_use]
    pub fn flat(label: impl Into<String>, amount: Decimal) -> Self {
        Self::new(label, amount, true)
    }

    /// The amount this fee contributes.
    #[must_use]
    pub fn charged(&self) -> Decimal {
        if self.included {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Subtotal, tax, fees and grand total for a cart.
///
/// Always `total == subtotal + tax + fees`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub fees: Decimal,
    pub total: Decimal,
}

impl fmt::Display for OrderTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subtotal {}, tax {}, fees {}, total {}",
            Price::new(self.subtotal),
            Price::new(self.tax),
            Price::new(self.fees),
            Price::new(self.total)
        )
    }
}

/// Compute the totals for `cart` priced against `catalog`.
///
/// Tax is `subtotal * tax_rate` rounded half-up to cents. Ids missing from the
/// catalog contribute nothing.
#[must_use]
pub fn compute_totals<T>(
    cart: &Cart<T::Id>,
    catalog: &Catalog<T>,
    tax_rate: Decimal,
    fees: &[Fee],
) -> OrderTotals
where
    T: CatalogItem,
{
    let subtotal = cart.total_price(catalog);
    let tax = round_currency(subtotal * tax_rate);
    let fees: Decimal = fees.iter().map(Fee::charged).sum();

    OrderTotals {
        subtotal,
        tax,
        fees,
        total: subtotal + tax + fees,
    }
}

#[cfg(test)]
mod tests {
    use super::super::item::testing::{Med, med};
    use super::*;

    fn dollars(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_default_tax_rate() {
        assert_eq!(DEFAULT_TAX_RATE, Decimal::new(8, 2));
    }

    #[test]
    fn test_totals_with_delivery_fee() {
        let catalog: Catalog<Med> = Catalog::new(vec![med(1, "Aspirin", "Pain Relief", 1000)]);
        let cart = Cart::new().add(1).add(1);
        let fees = [Fee::flat("Delivery", dollars(500))];
        let totals = compute_totals(&cart, &catalog, DEFAULT_TAX_RATE, &fees);
        assert_eq!(totals.subtotal, dollars(2000));
        assert_eq!(totals.tax, dollars(160));
        assert_eq!(totals.fees, dollars(500));
        assert_eq!(totals.total, dollars(2660));
    }

    #[test]
    fn test_excluded_fee_is_zero() {
        let catalog: Catalog<Med> = Catalog::new(vec![med(1, "Aspirin", "Pain Relief", 1000)]);
        let cart = Cart::new().add(1);
        let totals = compute_totals(
            &cart,
            &catalog,
            DEFAULT_TAX_RATE,
            &[Fee::new("Delivery", dollars(500), false)],
        );
        assert_eq!(totals.fees, Decimal::ZERO);
        assert_eq!(totals.total, dollars(1080));
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 18.75 * 0.08 = 1.5 exactly; 0.3125 * 0.08 = 0.025 -> 0.03
        let catalog: Catalog<Med> = Catalog::new(vec![
            med(1, "Lisinopril", "Cardiovascular", 1875),
            Med {
                price: Decimal::new(3125, 4),
                ..med(2, "Sample", "Misc", 0)
            },
        ]);
        let one = compute_totals(&Cart::new().add(1), &catalog, DEFAULT_TAX_RATE, &[]);
        assert_eq!(one.tax, dollars(150));
        let two = compute_totals(&Cart::new().add(2), &catalog, DEFAULT_TAX_RATE, &[]);
        assert_eq!(two.tax, dollars(3));
    }

    #[test]
    fn test_invariant_over_many_carts() {
        let catalog: Catalog<Med> = Catalog::new(vec![
            med(1, "Paracetamol", "Pain Relief", 1250),
            med(2, "Amoxicillin", "Antibiotics", 2500),
            med(3, "Lisinopril", "Cardiovascular", 1875),
            med(4, "Vitamin D3", "Supplements", 1500),
        ]);
        let fees = [Fee::flat("Delivery", dollars(500)), Fee::new("Rush", dollars(1000), false)];
        let mut cart = Cart::new();
        for step in 0..40_u32 {
            let id = step % 4 + 1;
            cart = if step % 3 == 2 { cart.remove(&id) } else { cart.add(id) };

            let totals = compute_totals(&cart, &catalog, DEFAULT_TAX_RATE, &fees);
            assert_eq!(totals.total, totals.subtotal + totals.tax + totals.fees);
            let expected: Decimal = cart
                .entries()
                .filter_map(|(id, qty)| catalog.find(id).map(|m| m.price * Decimal::from(qty)))
                .sum();
            assert_eq!(totals.subtotal, expected);
            assert_eq!(totals.tax, round_currency(totals.tax));
        }
    }

    #[test]
    fn test_compute_is_pure() {
        let catalog: Catalog<Med> = Catalog::new(vec![med(1, "Aspirin", "Pain Relief", 1099)]);
        let cart = Cart::new().add(1).add(1).add(1);
        let fees = [Fee::flat("Service", dollars(199))];
        let first = compute_totals(&cart, &catalog, DEFAULT_TAX_RATE, &fees);
        let second = compute_totals(&cart, &catalog, DEFAULT_TAX_RATE, &fees);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display() {
        let catalog: Catalog<Med> = Catalog::new(vec![med(1, "Aspirin", "Pain Relief", 1000)]);
        let totals = compute_totals(&Cart::new().add(1), &catalog, DEFAULT_TAX_RATE, &[]);
        assert_eq!(
            totals.to_string(),
            "subtotal $10.00, tax $0.80, fees $0.00, total $10.80"
        );
    }
}
