use crate::config::Config;
use crate::domain::document_number::{DocumentKind, DocumentNumber};
use crate::domain::line_item::LineItem;
use crate::domain::ports::SequenceStoreBox;
use crate::domain::tax::{DocumentTotals, SupplyContext, compute_document_totals};
use crate::error::{BillingError, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// An estimate or invoice being prepared: computed totals and the number it
/// will be issued under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDraft {
    pub kind: DocumentKind,
    pub supply: SupplyContext,
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
    pub number: String,
    /// Last issued number observed when the draft was made.
    based_on: Option<String>,
    proposed: String,
}

impl DocumentDraft {
    /// Replaces the proposed number with one typed in by the user.
    ///
    /// `finalize` only accepts it if it belongs to the series and comes after
    /// the last issued number.
    pub fn override_number(&mut self, number: impl Into<String>) {
        self.number = number.into().trim().to_string();
    }

    pub fn is_overridden(&self) -> bool {
        self.number != self.proposed
    }

    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }
}

/// A document whose number has been committed to its series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuedDocument {
    pub kind: DocumentKind,
    pub number: String,
    pub supply: SupplyContext,
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
}

/// Entry point for preparing and issuing estimates and invoices.
///
/// `BillingEngine` owns the configuration and the numbering store. Drafting
/// never touches the store's cursor; only `finalize` advances it, so an
/// abandoned draft leaves no gap in the series.
pub struct BillingEngine {
    config: Config,
    store: SequenceStoreBox,
}

impl BillingEngine {
    /// Creates a new `BillingEngine`.
    ///
    /// # Arguments
    ///
    /// * `config` - Home state, allowed tax rates and numbering series.
    /// * `store` - Holder of the last issued number per series.
    pub fn new(config: Config, store: SequenceStoreBox) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Supply context for a buyer located in `buyer_state`.
    pub fn supply_context(&self, buyer_state: &str) -> SupplyContext {
        SupplyContext::from_home_state(&self.config.home_state, buyer_state)
    }

    /// Rejects negative quantities or rates and rates outside the configured
    /// table.
    pub fn check_item(&self, item: &LineItem) -> Result<()> {
        item.validate()?;
        self.config.tax_rates.ensure_allowed(item.tax_rate)
    }

    /// Validates `items` against the configured rates and computes totals.
    pub fn totals(&self, buyer_state: &str, items: &[LineItem]) -> Result<DocumentTotals> {
        self.totals_for(&self.supply_context(buyer_state), items)
    }

    /// Like [`BillingEngine::totals`] for an explicit supplier and buyer.
    pub fn totals_for(&self, supply: &SupplyContext, items: &[LineItem]) -> Result<DocumentTotals> {
        for item in items {
            self.check_item(item)?;
        }
        Ok(compute_document_totals(items, supply))
    }

    /// Prepares a document and proposes the next number in its series.
    pub async fn draft(
        &self,
        kind: DocumentKind,
        buyer_state: &str,
        items: Vec<LineItem>,
    ) -> Result<DocumentDraft> {
        let totals = self.totals(buyer_state, &items)?;
        let based_on = self.store.last_issued(kind).await?;
        let number = self
            .config
            .series(kind)
            .next_after(based_on.as_deref(), self.config.on_prefix_mismatch)?;

        debug!(%kind, %number, last = ?based_on, lines = items.len(), "drafted document");

        Ok(DocumentDraft {
            kind,
            supply: self.supply_context(buyer_state),
            items,
            totals,
            proposed: number.clone(),
            number,
            based_on,
        })
    }

    /// Commits the draft's number as the new last number of its series.
    ///
    /// Fails with `SequenceConflict` when another document was issued after
    /// this draft was made; the caller should draft again.
    pub async fn finalize(&self, draft: DocumentDraft) -> Result<IssuedDocument> {
        if draft.number.trim().is_empty() {
            return Err(BillingError::Format {
                number: draft.number,
                prefix: self.config.series(draft.kind).prefix.clone(),
                reason: "document number is empty",
            });
        }

        if draft.is_overridden() {
            self.check_override(&draft)?;
        }

        if let Err(e) = self
            .store
            .commit(draft.kind, draft.based_on.clone(), draft.number.clone())
            .await
        {
            warn!(kind = %draft.kind, number = %draft.number, error = %e, "could not issue document");
            return Err(e);
        }

        info!(kind = %draft.kind, number = %draft.number, grand_total = %draft.totals.grand_total, "issued document");

        Ok(IssuedDocument {
            kind: draft.kind,
            number: draft.number,
            supply: draft.supply,
            items: draft.items,
            totals: draft.totals,
        })
    }

    /// A manually entered number must parse in the draft's series and, when
    /// the last issued number is in the same series, be strictly above it.
    fn check_override(&self, draft: &DocumentDraft) -> Result<()> {
        let series = self.config.series(draft.kind);
        let number = DocumentNumber::parse(&draft.number, &series.prefix, series.width)?;
        let last = draft
            .based_on
            .as_deref()
            .and_then(|last| DocumentNumber::parse(last.trim(), &series.prefix, series.width).ok());

        match last {
            Some(last) if number.sequence <= last.sequence => {
                warn!(kind = %draft.kind, number = %draft.number, last = %last, "override does not advance the series");
                Err(BillingError::Format {
                    number: draft.number.clone(),
                    prefix: series.prefix.clone(),
                    reason: "override does not advance the series",
                })
            }
            _ => Ok(()),
        }
    }
}
