pub mod document_store;
pub mod prefill;

pub use document_store::{DEFAULT_STORAGE_KEY, DocumentStore, FallbackReason, LoadOutcome};
pub use prefill::{PREFILL_KEY, Prefill};
