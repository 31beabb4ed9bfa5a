//! Records held in the planner document.
//!
//! All types are plain serde records. Field names are serialized in camelCase
//! so the stored JSON keeps the `profile` / `catalogue` / `plan.entries` /
//! `forum.threads` layout.

pub mod document;
pub mod forum;
pub mod plan;
pub mod procedure;
pub mod profile;

pub use document::{Document, Forum, Plan};
pub use forum::{ForumThread, NewPost, NewThread, Post};
pub use plan::{NewPlanEntry, PlanEntry};
pub use procedure::{PriceRange, Procedure, RiskLevel};
pub use profile::Profile;
