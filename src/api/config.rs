use crate::core::{NemesiaError, Result};
use crate::store::DEFAULT_STORAGE_KEY;
use std::fmt;
use std::time::Duration;

// ============================================================================
// Operations
// ============================================================================

/// Every call the mock API exposes, used for latency lookup and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetProfile,
    GetCatalogue,
    GetProcedure,
    GetPlan,
    AddPlanEntry,
    DeletePlanEntry,
    GetForumThreads,
    GetThread,
    CreateThread,
    AddPost,
    LikeThread,
    LikePost,
    Reset,
}

impl Operation {
    /// Simulated round-trip time before scaling
    pub fn base_latency(self) -> Duration {
        let ms = match self {
            Self::GetProfile => 180,
            Self::GetCatalogue => 220,
            Self::GetProcedure => 180,
            Self::GetPlan => 220,
            Self::AddPlanEntry => 260,
            Self::DeletePlanEntry => 220,
            Self::GetForumThreads => 240,
            Self::GetThread => 240,
            Self::CreateThread => 280,
            Self::AddPost => 260,
            Self::LikeThread => 160,
            Self::LikePost => 160,
            Self::Reset => 120,
        };
        Duration::from_millis(ms)
    }

    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::AddPlanEntry
                | Self::DeletePlanEntry
                | Self::CreateThread
                | Self::AddPost
                | Self::LikeThread
                | Self::LikePost
                | Self::Reset
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetProfile => "get_profile",
            Self::GetCatalogue => "get_catalogue",
            Self::GetProcedure => "get_procedure",
            Self::GetPlan => "get_plan",
            Self::AddPlanEntry => "add_plan_entry",
            Self::DeletePlanEntry => "delete_plan_entry",
            Self::GetForumThreads => "get_forum_threads",
            Self::GetThread => "get_thread",
            Self::CreateThread => "create_thread",
            Self::AddPost => "add_post",
            Self::LikeThread => "like_thread",
            Self::LikePost => "like_post",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Mock API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Storage key holding the document
    pub storage_key: String,

    /// Sleep before each operation to mimic a network round-trip
    pub simulate_latency: bool,

    /// Multiplier applied to every operation's base latency
    pub latency_scale: f64,

    /// Author used when a thread or post is submitted without one
    pub guest_author: String,
}

impl ApiConfig {
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            simulate_latency: true,
            latency_scale: 1.0,
            guest_author: "Guest".to_string(),
        }
    }

    /// No artificial delays
    pub fn instant() -> Self {
        Self::new().simulate_latency(false)
    }

    pub fn storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    pub fn simulate_latency(mut self, enabled: bool) -> Self {
        self.simulate_latency = enabled;
        self
    }

    pub fn latency_scale(mut self, scale: f64) -> Self {
        self.latency_scale = scale;
        self
    }

    pub fn guest_author(mut self, author: &str) -> Self {
        self.guest_author = author.to_string();
        self
    }

    /// Delay to apply before `op`
    pub fn latency_for(&self, op: Operation) -> Duration {
        if !self.simulate_latency {
            return Duration::ZERO;
        }
        let scaled = op.base_latency().as_millis() as f64 * self.latency_scale.max(0.0);
        Duration::from_millis(scaled.round() as u64)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(NemesiaError::InvalidConfig(
                "storage_key cannot be empty".to_string(),
            ));
        }

        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            return Err(NemesiaError::InvalidConfig(format!(
                "latency_scale must be a non-negative number, got {}",
                self.latency_scale
            )));
        }

        if self.guest_author.trim().is_empty() {
            return Err(NemesiaError::InvalidConfig(
                "guest_author cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}
