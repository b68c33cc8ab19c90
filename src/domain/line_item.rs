use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A GST rate expressed in percent, e.g. `18` for 18%.
///
/// Kept open rather than an enum: which rates a business may use is
/// configuration (see [`super::rates::TaxRateTable`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn percent(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// One row of an estimate or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    #[serde(rename = "rate")]
    pub unit_rate: Decimal,
    pub tax_rate: TaxRate,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_rate: Decimal,
        tax_rate: TaxRate,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_rate,
            tax_rate,
        }
    }

    /// `quantity × unit_rate`, unrounded.
    pub fn taxable_amount(&self) -> Money {
        Money::new(self.quantity * self.unit_rate)
    }

    /// Rejects negative quantity, rate or tax rate.
    ///
    /// The tax engine assumes valid input; callers converting user input run
    /// this first.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("quantity", self.quantity),
            ("rate", self.unit_rate),
            ("tax_rate", self.tax_rate.value()),
        ];
        for (field, value) in fields {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(BillingError::InvalidNumeric { field, value });
            }
        }
        Ok(())
    }
}
