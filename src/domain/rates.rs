use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::line_item::TaxRate;

/// The GST rates a business offers on its documents, with their labels.
///
/// Loaded from configuration so a new slab can be added without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RateEntry>", into = "Vec<RateEntry>")]
pub struct TaxRateTable {
    rates: BTreeMap<TaxRate, String>,
}

/// Serialized form of one table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateEntry {
    pub percent: Decimal,
    pub label: String,
}

impl From<Vec<RateEntry>> for TaxRateTable {
    fn from(entries: Vec<RateEntry>) -> Self {
        let rates = entries
            .into_iter()
            .map(|e| (TaxRate::percent(e.percent.normalize()), e.label))
            .collect();
        Self { rates }
    }
}

impl From<TaxRateTable> for Vec<RateEntry> {
    fn from(table: TaxRateTable) -> Self {
        table
            .rates
            .into_iter()
            .map(|(rate, label)| RateEntry {
                percent: rate.value(),
                label,
            })
            .collect()
    }
}

impl Default for TaxRateTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(TaxRate::ZERO, "Nil");
        table.insert(TaxRate::percent(dec!(5)), "GST 5%");
        table.insert(TaxRate::percent(dec!(18)), "GST 18%");
        table
    }
}

impl TaxRateTable {
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, rate: TaxRate, label: impl Into<String>) {
        self.rates
            .insert(TaxRate::percent(rate.value().normalize()), label.into());
    }

    pub fn contains(&self, rate: TaxRate) -> bool {
        self.rates
            .contains_key(&TaxRate::percent(rate.value().normalize()))
    }

    pub fn label(&self, rate: TaxRate) -> Option<&str> {
        self.rates
            .get(&TaxRate::percent(rate.value().normalize()))
            .map(String::as_str)
    }

    pub fn ensure_allowed(&self, rate: TaxRate) -> Result<()> {
        if self.contains(rate) {
            Ok(())
        } else {
            Err(BillingError::UnsupportedTaxRate(rate.value()))
        }
    }

    pub fn rates(&self) -> impl Iterator<Item = TaxRate> + '_ {
        self.rates.keys().copied()
    }
}
