use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fiscal::FiscalYear;
use super::money::Money;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Invoice,
    Payment,
}

/// One posting on a customer's account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub reference: String,
    pub amount: Money,
}

impl LedgerEntry {
    /// Effect on the amount the customer owes.
    fn signed(&self) -> Money {
        match self.kind {
            EntryKind::Invoice => self.amount,
            EntryKind::Payment => Money::ZERO - self.amount,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct StatementLine {
    pub entry: LedgerEntry,
    /// Balance due after this entry.
    pub balance: Money,
}

#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct StatementSummary {
    pub opening_balance: Money,
    pub invoiced_amount: Money,
    pub amount_paid: Money,
    pub balance_due: Money,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Statement {
    pub period: Option<FiscalYear>,
    pub summary: StatementSummary,
    pub lines: Vec<StatementLine>,
}

/// Builds a statement of accounts with a running balance.
///
/// With a `period`, entries dated before it are folded into the opening
/// balance and entries after it are left out. Entries on the same date keep
/// their input order.
pub fn build_statement(
    opening_balance: Money,
    entries: &[LedgerEntry],
    period: Option<FiscalYear>,
) -> Statement {
    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut summary = StatementSummary {
        opening_balance,
        ..Default::default()
    };
    let mut lines = Vec::new();

    for entry in sorted {
        if let Some(fy) = period {
            if entry.date < fy.start() {
                summary.opening_balance += entry.signed();
                continue;
            }
            if entry.date > fy.end() {
                continue;
            }
        }

        match entry.kind {
            EntryKind::Invoice => summary.invoiced_amount += entry.amount,
            EntryKind::Payment => summary.amount_paid += entry.amount,
        }
        lines.push(StatementLine {
            entry: entry.clone(),
            balance: Money::ZERO,
        });
    }

    let mut balance = summary.opening_balance;
    for line in &mut lines {
        balance += line.entry.signed();
        line.balance = balance;
    }
    summary.balance_due = summary.opening_balance + summary.invoiced_amount - summary.amount_paid;

    Statement {
        period,
        summary,
        lines,
    }
}
