//! Business configuration.
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.
//!
//! ```json
//! {
//!   "home_state": "Gujarat",
//!   "tax_rates": [
//!     { "percent": 0, "label": "Nil" },
//!     { "percent": 5, "label": "GST 5%" },
//!     { "percent": 18, "label": "GST 18%" }
//!   ],
//!   "estimate": { "prefix": "TE2526", "width": 3 },
//!   "invoice": { "prefix": "INV-", "width": 3 },
//!   "on_prefix_mismatch": "reject"
//! }
//! ```

use crate::domain::document_number::{DocumentKind, NumberSeries, PrefixPolicy};
use crate::domain::rates::TaxRateTable;
use crate::error::{BillingError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// State the business is registered in; supplies to buyers in the same
    /// state are taxed as CGST + SGST.
    pub home_state: String,
    pub tax_rates: TaxRateTable,
    pub estimate: NumberSeries,
    pub invoice: NumberSeries,
    pub on_prefix_mismatch: PrefixPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_state: "Gujarat".to_string(),
            tax_rates: TaxRateTable::default(),
            estimate: NumberSeries::new("TE2526", 3),
            invoice: NumberSeries::new("INV-", 3),
            on_prefix_mismatch: PrefixPolicy::Reject,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_state.trim().is_empty() {
            return Err(BillingError::Config("home_state must not be empty".into()));
        }
        for (kind, series) in [
            (DocumentKind::Estimate, &self.estimate),
            (DocumentKind::Invoice, &self.invoice),
        ] {
            if series.width == 0 {
                return Err(BillingError::Config(format!(
                    "{} series width must be at least 1",
                    kind
                )));
            }
        }
        if self.tax_rates.rates().next().is_none() {
            return Err(BillingError::Config(
                "at least one tax rate must be configured".into(),
            ));
        }
        Ok(())
    }

    pub fn series(&self, kind: DocumentKind) -> &NumberSeries {
        match kind {
            DocumentKind::Estimate => &self.estimate,
            DocumentKind::Invoice => &self.invoice,
        }
    }
}
