//! Repeat-cost forecast over a fixed horizon.
//!
//! A point estimate: each repeating procedure is assumed to recur exactly on
//! its catalogue cadence, at the cost of its most recent plan entry.

use chrono::{DateTime, Months, Utc};
use std::collections::HashMap;

use crate::model::{PlanEntry, Procedure};

pub const DEFAULT_HORIZON_MONTHS: u32 = 24;
pub const DEFAULT_SUMMARY_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastConfig {
    pub horizon_months: u32,
    /// Maximum number of summary lines kept for display
    pub summary_limit: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastLine {
    pub procedure_id: String,
    pub name: String,
    pub cadence_months: u32,
    /// Cost of the last recorded occurrence
    pub base_cost: f64,
    /// Projected occurrences on or before the horizon end
    pub occurrences: u32,
}

impl ForecastLine {
    /// Name up to the first en dash, e.g. "Laser" for "Laser – Pigment Correction".
    pub fn short_name(&self) -> &str {
        self.name
            .split('–')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn projected_cost(&self) -> f64 {
        self.base_cost * f64::from(self.occurrences)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub horizon_months: u32,
    pub horizon_end: DateTime<Utc>,
    /// Sum over every repeating procedure, including ones cut from `lines`
    pub projected_total: f64,
    /// In order of each procedure's first appearance in the plan
    pub lines: Vec<ForecastLine>,
}

/// Project repeat spend from `now` until `now + horizon_months`.
///
/// Entries are grouped by procedure and only the latest one per group is used.
/// Projected dates are `last.date + k * cadence` months for k = 1, 2, ...; a
/// date counts when it falls on or before the horizon end. Procedures missing
/// from the catalogue or with no cadence are skipped.
pub fn forecast(
    entries: &[PlanEntry],
    catalogue: &[Procedure],
    now: DateTime<Utc>,
    config: &ForecastConfig,
) -> Forecast {
    let horizon_end = now
        .checked_add_months(Months::new(config.horizon_months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut projected_total = 0.0;
    let mut lines = Vec::new();

    for last in last_occurrences(entries) {
        let Some(procedure) = catalogue.iter().find(|p| p.id == last.procedure_id) else {
            continue;
        };
        if !procedure.repeats() {
            continue;
        }

        let cadence = procedure.repeat_every_months;
        let occurrences = count_occurrences(last.date, cadence, horizon_end);
        projected_total += last.cost * f64::from(occurrences);

        lines.push(ForecastLine {
            procedure_id: procedure.id.clone(),
            name: procedure.name.clone(),
            cadence_months: cadence,
            base_cost: last.cost,
            occurrences,
        });
    }

    lines.truncate(config.summary_limit);

    Forecast {
        horizon_months: config.horizon_months,
        horizon_end,
        projected_total,
        lines,
    }
}

/// Latest entry per procedure, in first-appearance order. Ties keep the earlier entry.
fn last_occurrences(entries: &[PlanEntry]) -> Vec<&PlanEntry> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<&PlanEntry> = Vec::new();

    for entry in entries {
        match slots.get(entry.procedure_id.as_str()) {
            Some(&idx) => {
                if entry.date > latest[idx].date {
                    latest[idx] = entry;
                }
            }
            None => {
                slots.insert(entry.procedure_id.as_str(), latest.len());
                latest.push(entry);
            }
        }
    }

    latest
}

fn count_occurrences(base: DateTime<Utc>, cadence_months: u32, horizon_end: DateTime<Utc>) -> u32 {
    let mut count = 0;
    for k in 1u32.. {
        let Some(months) = cadence_months.checked_mul(k) else {
            break;
        };
        match base.checked_add_months(Months::new(months)) {
            Some(next) if next <= horizon_end => count += 1,
            _ => break,
        }
    }
    count
}
