//! Client-side filtering for the catalogue and forum listings.

use crate::model::{ForumThread, Procedure};

/// Category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueFilter {
    pub category: Option<String>,
    pub query: Option<String>,
}

impl CatalogueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, procedure: &Procedure) -> bool {
        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && procedure.category != category {
                return false;
            }
        }

        match normalized(self.query.as_deref()) {
            Some(needle) => {
                format!("{} {}", procedure.name, procedure.overview)
                    .to_lowercase()
                    .contains(&needle)
            }
            None => true,
        }
    }

    pub fn apply<'a>(&self, catalogue: &'a [Procedure]) -> Vec<&'a Procedure> {
        catalogue.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(catalogue: &[Procedure]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for procedure in catalogue {
        if !seen.contains(&procedure.category.as_str()) {
            seen.push(&procedure.category);
        }
    }
    seen
}

/// Case-insensitive search over title, tag and body. A blank query keeps everything.
pub fn search_threads<'a>(threads: &'a [ForumThread], query: &str) -> Vec<&'a ForumThread> {
    let Some(needle) = normalized(Some(query)) else {
        return threads.iter().collect();
    };
    threads
        .iter()
        .filter(|t| {
            format!("{} {} {}", t.title, t.tag, t.body)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

fn normalized(query: Option<&str>) -> Option<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
}
