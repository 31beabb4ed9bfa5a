//! Caller-side validation of raw form input.
//!
//! Failures here are `Validation` errors meant for an inline message; the API
//! itself does not re-check them.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::{NemesiaError, Result};
use crate::model::plan::check_cost;
use crate::model::{NewPlanEntry, NewPost, NewThread};

pub const PLAN_REQUIRED_MESSAGE: &str = "Date and cost are required.";

/// Planner form fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanEntryForm {
    pub procedure_id: String,
    pub date: String,
    pub clinic: String,
    pub cost: String,
    pub notes: String,
}

impl PlanEntryForm {
    pub fn into_new_entry(self) -> Result<NewPlanEntry> {
        let date = self.date.trim();
        let cost = self.cost.trim();
        if date.is_empty() || cost.is_empty() {
            return Err(NemesiaError::validation(PLAN_REQUIRED_MESSAGE));
        }
        if self.procedure_id.trim().is_empty() {
            return Err(NemesiaError::validation("A procedure must be selected."));
        }

        let date = parse_date(date)?;
        let cost: f64 = cost
            .parse()
            .map_err(|_| NemesiaError::validation(format!("Cost '{}' is not a number.", cost)))?;
        let cost = check_cost(cost).map_err(|_| NemesiaError::validation("Cost cannot be negative."))?;

        Ok(NewPlanEntry {
            procedure_id: self.procedure_id.trim().to_string(),
            date,
            clinic: non_blank(self.clinic),
            cost,
            notes: non_blank(self.notes),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadForm {
    pub title: String,
    pub tag: String,
    pub body: String,
    pub author: String,
}

impl ThreadForm {
    pub fn into_new_thread(self) -> Result<NewThread> {
        let title = self.title.trim();
        let body = self.body.trim();
        if title.is_empty() || body.is_empty() {
            return Err(NemesiaError::validation("Title and body are required."));
        }
        Ok(NewThread {
            title: title.to_string(),
            tag: self.tag.trim().to_string(),
            body: body.to_string(),
            author: non_blank(self.author),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyForm {
    pub body: String,
    pub author: String,
}

impl ReplyForm {
    pub fn into_new_post(self) -> Result<NewPost> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(NemesiaError::validation("Reply cannot be empty."));
        }
        Ok(NewPost {
            body: body.to_string(),
            author: non_blank(self.author),
        })
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| NemesiaError::validation(format!("Date '{}' is not a valid date.", raw)))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(date: &str, cost: &str) -> PlanEntryForm {
        PlanEntryForm {
            procedure_id: "skin-needling".to_string(),
            date: date.to_string(),
            clinic: "Demo Clinic Oslo".to_string(),
            cost: cost.to_string(),
            notes: "  ".to_string(),
        }
    }

    #[test]
    fn test_missing_date_or_cost() {
        for (date, cost) in [("", "100"), ("2026-03-01", ""), ("  ", "  ")] {
            let err = form(date, cost).into_new_entry().unwrap_err();
            assert!(matches!(err, NemesiaError::Validation(ref m) if m == PLAN_REQUIRED_MESSAGE));
        }
    }

    #[test]
    fn test_valid_plan_form() {
        let entry = form("2026-03-01", "2600").into_new_entry().unwrap();
        assert_eq!(entry.date, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(entry.cost, 2600.0);
        assert_eq!(entry.clinic.as_deref(), Some("Demo Clinic Oslo"));
        assert_eq!(entry.notes, None);
    }

    #[test]
    fn test_rfc3339_date() {
        let entry = form("2026-03-01T10:30:00+01:00", "10").into_new_entry().unwrap();
        assert_eq!(entry.date, Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_bad_cost_and_date() {
        assert!(form("2026-03-01", "abc").into_new_entry().is_err());
        assert!(form("2026-03-01", "-5").into_new_entry().is_err());
        assert!(form("01/03/2026", "5").into_new_entry().is_err());
    }

    #[test]
    fn test_thread_and_reply_forms() {
        let missing = ThreadForm {
            title: "  ".to_string(),
            body: "body".to_string(),
            ..Default::default()
        };
        assert!(missing.into_new_thread().is_err());

        let thread = ThreadForm {
            title: " Sunscreen ".to_string(),
            tag: "Aftercare".to_string(),
            body: " Which SPF? ".to_string(),
            author: String::new(),
        }
        .into_new_thread()
        .unwrap();
        assert_eq!(thread.title, "Sunscreen");
        assert_eq!(thread.author, None);

        assert!(ReplyForm::default().into_new_post().is_err());
        let post = ReplyForm {
            body: "SPF 50".to_string(),
            author: "Ola".to_string(),
        }
        .into_new_post()
        .unwrap();
        assert_eq!(post.author.as_deref(), Some("Ola"));
    }
}
