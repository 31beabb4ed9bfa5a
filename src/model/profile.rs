use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton owner profile, created with the seed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// ISO 4217 code, e.g. `NOK`.
    pub currency: String,
    pub created_at: DateTime<Utc>,
}
