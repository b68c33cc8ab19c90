//! GST computation for estimates and invoices.
//!
//! A supply within one state is taxed as CGST + SGST, each at half the
//! nominal rate. A supply across states is taxed as IGST at the full rate.
//! Document totals are built by summing the per-line breakdowns, so the
//! line table and the summary printed under it always agree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::line_item::LineItem;
use super::money::Money;

/// Which GST family applies to a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    IntraState,
    InterState,
}

/// Supplier and buyer (place of supply) states for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyContext {
    pub supplier_state: String,
    pub buyer_state: String,
}

impl SupplyContext {
    pub fn new(supplier_state: impl Into<String>, buyer_state: impl Into<String>) -> Self {
        Self {
            supplier_state: supplier_state.into(),
            buyer_state: buyer_state.into(),
        }
    }

    /// Context for a business registered in `home_state` billing a buyer in `buyer_state`.
    pub fn from_home_state(home_state: &str, buyer_state: impl Into<String>) -> Self {
        Self::new(home_state, buyer_state)
    }

    /// States are compared exactly, including case.
    pub fn jurisdiction(&self) -> Jurisdiction {
        if self.supplier_state == self.buyer_state {
            Jurisdiction::IntraState
        } else {
            Jurisdiction::InterState
        }
    }
}

/// CGST, SGST and IGST amounts for a line or a whole document.
///
/// For a single line either `igst` is zero, or `cgst` and `sgst` both are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
}

impl TaxBreakdown {
    pub fn total(&self) -> Money {
        self.cgst + self.sgst + self.igst
    }
}

impl Add for TaxBreakdown {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            cgst: self.cgst + rhs.cgst,
            sgst: self.sgst + rhs.sgst,
            igst: self.igst + rhs.igst,
        }
    }
}

impl AddAssign for TaxBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Per-line result as shown in a document's item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTax {
    pub description: String,
    pub taxable_amount: Money,
    pub tax: TaxBreakdown,
    /// Taxable amount plus all tax on the line.
    pub amount: Money,
}

/// Totals for a document, together with the per-line breakdowns they were built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub total_tax: Money,
    pub grand_total: Money,
    pub tax: TaxBreakdown,
    pub lines: Vec<LineTax>,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const TWO: Decimal = Decimal::TWO;

/// Computes the GST on one line item.
///
/// Inputs are assumed valid (see [`LineItem::validate`]); nothing is rounded.
pub fn compute_line_tax(item: &LineItem, ctx: &SupplyContext) -> TaxBreakdown {
    let taxable = item.taxable_amount().value();
    let rate = item.tax_rate.value();

    match ctx.jurisdiction() {
        Jurisdiction::IntraState => {
            let half = Money::new(taxable * (rate / TWO) / HUNDRED);
            TaxBreakdown {
                cgst: half,
                sgst: half,
                igst: Money::ZERO,
            }
        }
        Jurisdiction::InterState => TaxBreakdown {
            cgst: Money::ZERO,
            sgst: Money::ZERO,
            igst: Money::new(taxable * rate / HUNDRED),
        },
    }
}

/// Computes subtotal, tax and grand total for a document.
///
/// An empty item list yields all-zero totals.
pub fn compute_document_totals(items: &[LineItem], ctx: &SupplyContext) -> DocumentTotals {
    let mut totals = DocumentTotals::default();

    for item in items {
        let taxable_amount = item.taxable_amount();
        let tax = compute_line_tax(item, ctx);

        totals.subtotal += taxable_amount;
        totals.tax += tax;
        totals.lines.push(LineTax {
            description: item.description.clone(),
            taxable_amount,
            tax,
            amount: taxable_amount + tax.total(),
        });
    }

    totals.total_tax = totals.tax.total();
    totals.grand_total = totals.subtotal + totals.total_tax;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::TaxRate;
    use rust_decimal_macros::dec;

    fn panel(qty: Decimal, rate: Decimal, tax: Decimal) -> LineItem {
        LineItem::new("Solar panel", qty, rate, TaxRate::percent(tax))
    }

    #[test]
    fn test_intra_state_line() {
        let ctx = SupplyContext::new("Gujarat", "Gujarat");
        let tax = compute_line_tax(&panel(dec!(10), dec!(100), dec!(18)), &ctx);
        assert_eq!(tax.cgst, Money::new(dec!(90)));
        assert_eq!(tax.sgst, Money::new(dec!(90)));
        assert_eq!(tax.igst, Money::ZERO);
    }

    #[test]
    fn test_inter_state_line() {
        let ctx = SupplyContext::new("Gujarat", "Maharashtra");
        let tax = compute_line_tax(&panel(dec!(10), dec!(100), dec!(18)), &ctx);
        assert_eq!(tax.igst, Money::new(dec!(180)));
        assert_eq!(tax.cgst, Money::ZERO);
        assert_eq!(tax.sgst, Money::ZERO);
    }

    #[test]
    fn test_state_comparison_is_case_sensitive() {
        let ctx = SupplyContext::new("Gujarat", "gujarat");
        assert_eq!(ctx.jurisdiction(), Jurisdiction::InterState);
    }

    #[test]
    fn test_zero_rate_line() {
        let ctx = SupplyContext::new("Gujarat", "Gujarat");
        let tax = compute_line_tax(&panel(dec!(4), dec!(250), dec!(0)), &ctx);
        assert_eq!(tax, TaxBreakdown::default());
    }

    #[test]
    fn test_document_totals() {
        let ctx = SupplyContext::new("Gujarat", "Gujarat");
        let items = vec![
            panel(dec!(10), dec!(100), dec!(18)),
            panel(dec!(2), dec!(250), dec!(5)),
        ];
        let totals = compute_document_totals(&items, &ctx);

        assert_eq!(totals.subtotal, Money::new(dec!(1500)));
        assert_eq!(totals.tax.cgst, Money::new(dec!(102.5)));
        assert_eq!(totals.tax.sgst, Money::new(dec!(102.5)));
        assert_eq!(totals.total_tax, Money::new(dec!(205)));
        assert_eq!(totals.grand_total, Money::new(dec!(1705)));
        assert_eq!(totals.lines.len(), 2);
        assert_eq!(totals.lines[1].amount, Money::new(dec!(525)));
    }

    #[test]
    fn test_empty_document() {
        let ctx = SupplyContext::new("Gujarat", "Kerala");
        let totals = compute_document_totals(&[], &ctx);
        assert_eq!(totals.grand_total, Money::ZERO);
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.total_tax, Money::ZERO);
        assert!(totals.lines.is_empty());
    }

    #[test]
    fn test_no_mid_calculation_rounding() {
        // 300 lines of 0.005 tax each: rounding per line would add 1.50
        let ctx = SupplyContext::new("Gujarat", "Rajasthan");
        let items = vec![panel(dec!(1), dec!(0.1), dec!(5)); 300];
        let totals = compute_document_totals(&items, &ctx);
        assert_eq!(totals.total_tax, Money::new(dec!(1.5)));
        assert_eq!(totals.total_tax.plain(), "1.50");
    }
}
