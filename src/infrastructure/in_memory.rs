use crate::domain::document_number::DocumentKind;
use crate::domain::ports::SequenceStore;
use crate::error::{BillingError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory holder of the last issued number per series.
///
/// Uses `Arc<RwLock<HashMap<DocumentKind, String>>>`; `commit` compares and
/// swaps under the write lock, so concurrent issuers are serialized.
/// Clones share the same cursors.
#[derive(Default, Clone)]
pub struct InMemorySequenceStore {
    cursors: Arc<RwLock<HashMap<DocumentKind, String>>>,
}

impl InMemorySequenceStore {
    /// Creates a store with no numbers issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose `kind` series was last issued at `last`.
    pub fn with_last(kind: DocumentKind, last: impl Into<String>) -> Self {
        let mut cursors = HashMap::new();
        cursors.insert(kind, last.into());
        Self {
            cursors: Arc::new(RwLock::new(cursors)),
        }
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn last_issued(&self, kind: DocumentKind) -> Result<Option<String>> {
        let cursors = self.cursors.read().await;
        Ok(cursors.get(&kind).cloned())
    }

    async fn commit(
        &self,
        kind: DocumentKind,
        expected_last: Option<String>,
        issued: String,
    ) -> Result<()> {
        let mut cursors = self.cursors.write().await;
        let found = cursors.get(&kind).cloned();
        if found != expected_last {
            return Err(BillingError::SequenceConflict {
                series: kind.to_string(),
                expected: expected_last,
                found,
            });
        }
        cursors.insert(kind, issued);
        Ok(())
    }
}
