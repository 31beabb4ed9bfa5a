// ============================================================================
// Nemesia planner core
// ============================================================================

pub mod api;
pub mod config;
pub mod core;
pub mod forecast;
pub mod forms;
pub mod model;
pub mod query;
pub mod seed;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use api::{ApiConfig, MockApi, Operation};
pub use crate::core::{NemesiaError, Result};
pub use forecast::{Forecast, ForecastConfig, ForecastLine, forecast};
pub use model::{
    Document, ForumThread, NewPlanEntry, NewPost, NewThread, PlanEntry, Post, PriceRange,
    Procedure, Profile, RiskLevel,
};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend};
pub use store::{DocumentStore, FallbackReason, LoadOutcome, Prefill};

use std::sync::Arc;

/// Open a mock API over process-local storage.
///
/// # Examples
///
/// ```
/// use nemesia::{ApiConfig, NewPlanEntry};
///
/// # #[tokio::main]
/// # async fn main() -> nemesia::Result<()> {
/// let api = nemesia::in_memory(ApiConfig::instant())?;
///
/// let entry = api
///     .add_plan_entry(NewPlanEntry::new("rf-tighten", chrono::Utc::now(), 3200.0))
///     .await?;
/// assert_eq!(api.get_plan().await?[0].id, entry.id);
/// # Ok(())
/// # }
/// ```
pub fn in_memory(config: ApiConfig) -> Result<MockApi> {
    MockApi::new(Arc::new(InMemoryStorage::new()), config)
}

/// Open a mock API whose document lives in files under `data_dir`.
pub async fn open_dir(data_dir: impl Into<std::path::PathBuf>, config: ApiConfig) -> Result<MockApi> {
    let storage = FileStorage::open(data_dir).await?;
    MockApi::new(Arc::new(storage), config)
}
