use super::document_number::DocumentKind;
use crate::error::Result;
use async_trait::async_trait;

/// Holder of the "last issued number" cursor for each document series.
///
/// Implementations must make `commit` atomic: two issuers that read the same
/// last number cannot both commit a successor.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    async fn last_issued(&self, kind: DocumentKind) -> Result<Option<String>>;

    /// Records `issued` as the new last number if the cursor still equals
    /// `expected_last`; otherwise fails with `SequenceConflict`.
    async fn commit(
        &self,
        kind: DocumentKind,
        expected_last: Option<String>,
        issued: String,
    ) -> Result<()>;
}

pub type SequenceStoreBox = Box<dyn SequenceStore>;
