//! Identifier generation: `{prefix}_{random hex}_{unix millis hex}`.
//!
//! Practical uniqueness for single-client data; there is no collision check.

use chrono::Utc;
use uuid::Uuid;

pub const PLAN_ENTRY_PREFIX: &str = "e";
pub const THREAD_PREFIX: &str = "t";
pub const POST_PREFIX: &str = "p";

pub fn generate(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let millis = Utc::now().timestamp_millis().max(0);
    format!("{}_{}_{:x}", prefix, &random[..12], millis)
}
