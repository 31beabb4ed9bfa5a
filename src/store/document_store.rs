use crate::core::Result;
use crate::model::Document;
use crate::seed::default_document;
use crate::storage::StorageBackend;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_STORAGE_KEY: &str = "nemesia_db_v1";

// ============================================================================
// Load Outcome
// ============================================================================

/// Why `load` substituted the seed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing stored under the key yet
    Missing,
    /// The backend failed to read the key
    Unreadable(String),
    /// The stored value did not parse as a document
    Corrupt(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no stored document"),
            Self::Unreadable(err) => write!(f, "storage unreadable: {err}"),
            Self::Corrupt(err) => write!(f, "stored document corrupt: {err}"),
        }
    }
}

/// Result of `DocumentStore::load`: which path was taken, plus the document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Document),
    Fallback(Document, FallbackReason),
}

impl LoadOutcome {
    pub fn document(&self) -> &Document {
        match self {
            Self::Loaded(doc) | Self::Fallback(doc, _) => doc,
        }
    }

    pub fn into_document(self) -> Document {
        match self {
            Self::Loaded(doc) | Self::Fallback(doc, _) => doc,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(..))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Loaded(_) => None,
            Self::Fallback(_, reason) => Some(reason),
        }
    }
}

// ============================================================================
// Document Store
// ============================================================================

/// Owns the single planner document stored under one key.
///
/// Every save replaces the whole document; there are no partial writes.
/// The seed used for fallbacks and resets is dated from `seed_time`, fixed when
/// the store is built, so repeated fallback loads return the same document.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
    seed_time: DateTime<Utc>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            seed_time: Utc::now(),
        }
    }

    /// Date the seed document from `seed_time` instead of construction time.
    pub fn seed_time(mut self, seed_time: DateTime<Utc>) -> Self {
        self.seed_time = seed_time;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Read the stored document, substituting a fresh seed when nothing usable
    /// is stored. Never writes; the caller's next `save` persists the seed.
    pub async fn load(&self) -> LoadOutcome {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.fallback(FallbackReason::Missing),
            Err(err) => return self.fallback(FallbackReason::Unreadable(err.to_string())),
        };

        match serde_json::from_str::<Document>(&raw) {
            Ok(doc) => LoadOutcome::Loaded(doc),
            Err(err) => self.fallback(FallbackReason::Corrupt(err.to_string())),
        }
    }

    pub async fn save(&self, doc: &Document) -> Result<()> {
        let raw = serde_json::to_string(doc)?;
        self.backend.set(&self.key, &raw).await
    }

    /// Overwrite storage with a fresh seed document and return it.
    pub async fn reset(&self) -> Result<Document> {
        let doc = default_document(self.seed_time);
        self.save(&doc).await?;
        info!(key = %self.key, "store reset to seed document");
        Ok(doc)
    }

    fn fallback(&self, reason: FallbackReason) -> LoadOutcome {
        if reason != FallbackReason::Missing {
            warn!(key = %self.key, %reason, "document load failed, using defaults");
        }
        LoadOutcome::Fallback(default_document(self.seed_time), reason)
    }
}
