use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::procedure::Procedure;
use crate::core::{NemesiaError, Result};

/// A recorded treatment. Created by add, removed by delete, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub id: String,
    /// May point at a procedure that is no longer in the catalogue.
    pub procedure_id: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,
    /// Finite and non-negative; anything else fails to deserialize.
    #[serde(deserialize_with = "deserialize_cost")]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlanEntry {
    pub fn from_new(id: String, entry: NewPlanEntry) -> Self {
        Self {
            id,
            procedure_id: entry.procedure_id,
            date: entry.date,
            clinic: entry.clinic,
            cost: entry.cost,
            notes: entry.notes,
        }
    }

    pub fn procedure<'a>(&self, catalogue: &'a [Procedure]) -> Option<&'a Procedure> {
        catalogue.iter().find(|p| p.id == self.procedure_id)
    }

    /// Procedure name for display, or the raw id when the procedure is unknown.
    pub fn procedure_label(&self, catalogue: &[Procedure]) -> String {
        self.procedure(catalogue)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| self.procedure_id.clone())
    }
}

/// Plan entry as submitted, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlanEntry {
    pub procedure_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub clinic: Option<String>,
    #[serde(deserialize_with = "deserialize_cost")]
    pub cost: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPlanEntry {
    pub fn new(procedure_id: impl Into<String>, date: DateTime<Utc>, cost: f64) -> Self {
        Self {
            procedure_id: procedure_id.into(),
            date,
            clinic: None,
            cost,
            notes: None,
        }
    }

    pub fn clinic(mut self, clinic: impl Into<String>) -> Self {
        self.clinic = Some(clinic.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reject costs that could not be stored and read back.
    pub fn validate(&self) -> Result<()> {
        check_cost(self.cost).map(|_| ()).map_err(NemesiaError::validation)
    }
}

/// A cost must be finite (JSON has no NaN or infinity) and not negative.
pub fn check_cost(cost: f64) -> std::result::Result<f64, String> {
    if !cost.is_finite() {
        return Err(format!("cost must be a finite number, got {cost}"));
    }
    if cost < 0.0 {
        return Err(format!("cost cannot be negative, got {cost}"));
    }
    Ok(cost)
}

fn deserialize_cost<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let cost = f64::deserialize(deserializer)?;
    check_cost(cost).map_err(serde::de::Error::custom)
}

/// Sum of all recorded costs.
pub fn total_spend(entries: &[PlanEntry]) -> f64 {
    entries.iter().map(|e| e.cost).sum()
}
