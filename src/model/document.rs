use serde::{Deserialize, Serialize};

use super::{ForumThread, PlanEntry, Procedure, Profile};

/// The single persisted document. Everything the planner knows lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub profile: Profile,
    pub catalogue: Vec<Procedure>,
    pub plan: Plan,
    pub forum: Forum,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Most recent first.
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forum {
    /// Newest first.
    pub threads: Vec<ForumThread>,
}

impl Document {
    pub fn procedure(&self, id: &str) -> Option<&Procedure> {
        self.catalogue.iter().find(|p| p.id == id)
    }

    pub fn thread(&self, id: &str) -> Option<&ForumThread> {
        self.forum.threads.iter().find(|t| t.id == id)
    }

    pub fn thread_mut(&mut self, id: &str) -> Option<&mut ForumThread> {
        self.forum.threads.iter_mut().find(|t| t.id == id)
    }
}
