use crate::error::{BillingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The document families that each keep their own numbering series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Estimate,
    Invoice,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Estimate => f.write_str("estimate"),
            DocumentKind::Invoice => f.write_str("invoice"),
        }
    }
}

/// A sequential document identifier such as `TE2526004` or `INV-100`.
///
/// Serializes as `prefix` followed by `sequence` left-padded with zeros to
/// `width` digits. A sequence wider than `width` is written in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNumber {
    pub prefix: String,
    pub sequence: u64,
    pub width: usize,
}

impl DocumentNumber {
    pub fn new(prefix: impl Into<String>, sequence: u64, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            sequence,
            width,
        }
    }

    /// The first number of a series.
    pub fn first(prefix: impl Into<String>, width: usize) -> Self {
        Self::new(prefix, 1, width)
    }

    /// Splits `number` into `prefix` and its numeric sequence.
    ///
    /// The resulting width is `width` or the number of digits present,
    /// whichever is larger, so the parsed value renders back unchanged.
    pub fn parse(number: &str, prefix: &str, width: usize) -> Result<Self> {
        let format_error = |reason| BillingError::Format {
            number: number.to_string(),
            prefix: prefix.to_string(),
            reason,
        };

        let digits = number
            .strip_prefix(prefix)
            .ok_or_else(|| format_error("does not start with the expected prefix"))?;
        if digits.is_empty() {
            return Err(format_error("missing sequence digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_error("sequence is not numeric"));
        }
        let sequence = digits
            .parse::<u64>()
            .map_err(|_| format_error("sequence is out of range"))?;

        Ok(Self::new(prefix, sequence, width.max(digits.len())))
    }

    /// The number that follows this one in the same series.
    pub fn successor(&self) -> Result<Self> {
        let sequence = self
            .sequence
            .checked_add(1)
            .ok_or_else(|| BillingError::Format {
                number: self.to_string(),
                prefix: self.prefix.clone(),
                reason: "sequence is out of range",
            })?;
        Ok(Self::new(self.prefix.clone(), sequence, self.width))
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:0>width$}",
            self.prefix,
            self.sequence,
            width = self.width
        )
    }
}

/// What to do when the last issued number belongs to a different prefix,
/// typically after the fiscal-year part of the prefix rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixPolicy {
    /// Fail with a format error.
    #[default]
    Reject,
    /// Start the new prefix at sequence 1.
    Restart,
}

/// Next number after `last` in the series `prefix`, padded to `width` digits.
///
/// With no previous number the series starts at 1. A previous number that
/// does not carry `prefix` is a format error.
pub fn next_number(last: Option<&str>, prefix: &str, width: usize) -> Result<String> {
    next_number_with_policy(last, prefix, width, PrefixPolicy::Reject)
}

/// Like [`next_number`], with an explicit policy for a foreign prefix.
///
/// Under [`PrefixPolicy::Restart`] only a missing prefix restarts the series;
/// a matching prefix followed by garbage is still an error.
pub fn next_number_with_policy(
    last: Option<&str>,
    prefix: &str,
    width: usize,
    policy: PrefixPolicy,
) -> Result<String> {
    let last = match last.map(str::trim) {
        None | Some("") => return Ok(DocumentNumber::first(prefix, width).to_string()),
        Some(last) => last,
    };

    if policy == PrefixPolicy::Restart && !last.starts_with(prefix) {
        return Ok(DocumentNumber::first(prefix, width).to_string());
    }

    let parsed = DocumentNumber::parse(last, prefix, width)?;
    let current = DocumentNumber::new(prefix, parsed.sequence, width);
    Ok(current.successor()?.to_string())
}

/// A configured numbering series: a prefix and its padding width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSeries {
    pub prefix: String,
    pub width: usize,
}

impl NumberSeries {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    pub fn next_after(&self, last: Option<&str>, policy: PrefixPolicy) -> Result<String> {
        next_number_with_policy(last, &self.prefix, self.width, policy)
    }
}
