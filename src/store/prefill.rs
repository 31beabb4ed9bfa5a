use crate::core::Result;
use crate::storage::StorageBackend;
use std::sync::Arc;

pub const PREFILL_KEY: &str = "nemesia_prefill_proc";

/// One-shot hand-off of a procedure id from the catalogue to the planner.
///
/// The catalogue sets it; the planner takes it, which clears it.
#[derive(Clone)]
pub struct Prefill {
    backend: Arc<dyn StorageBackend>,
}

impl Prefill {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub async fn set(&self, procedure_id: &str) -> Result<()> {
        self.backend.set(PREFILL_KEY, procedure_id).await
    }

    pub async fn peek(&self) -> Result<Option<String>> {
        Ok(self
            .backend
            .get(PREFILL_KEY)
            .await?
            .filter(|id| !id.is_empty()))
    }

    /// Read and clear the pending procedure id
    pub async fn take(&self) -> Result<Option<String>> {
        let pending = self.peek().await?;
        if pending.is_some() {
            self.backend.remove(PREFILL_KEY).await?;
        }
        Ok(pending)
    }
}
