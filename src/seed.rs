//! Built-in starting dataset.
//!
//! Used whenever nothing usable is stored and by `reset`. Dates are relative to
//! the `now` passed in, so the demo plan always looks recent.

use chrono::{DateTime, Duration, Utc};

use crate::model::{
    Document, Forum, ForumThread, Plan, PlanEntry, Post, PriceRange, Procedure, Profile, RiskLevel,
};

pub const DEFAULT_PROFILE_NAME: &str = "Guest";
pub const DEFAULT_CURRENCY: &str = "NOK";
const DEMO_CLINIC: &str = "Demo Clinic Oslo";

/// Build a fresh seed document. Every call returns an independent value.
pub fn default_document(now: DateTime<Utc>) -> Document {
    Document {
        profile: Profile {
            name: DEFAULT_PROFILE_NAME.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            created_at: now,
        },
        catalogue: default_catalogue(),
        plan: Plan {
            entries: vec![
                PlanEntry {
                    id: "e1".to_string(),
                    procedure_id: "skin-needling".to_string(),
                    date: now - Duration::days(28),
                    clinic: Some(DEMO_CLINIC.to_string()),
                    cost: 2600.0,
                    notes: Some("Patch test done prior. Mild redness for 2 days.".to_string()),
                },
                PlanEntry {
                    id: "e2".to_string(),
                    procedure_id: "botox-brow".to_string(),
                    date: now - Duration::days(95),
                    clinic: Some(DEMO_CLINIC.to_string()),
                    cost: 3900.0,
                    notes: Some("Subtle lift; will reassess in 3 months.".to_string()),
                },
            ],
        },
        forum: Forum {
            threads: vec![
                ForumThread {
                    id: "t1".to_string(),
                    title: "Post-treatment care: what actually matters?".to_string(),
                    tag: "Aftercare".to_string(),
                    created_at: now - Duration::days(2),
                    author: "MushiMaster".to_string(),
                    body: "Share the single most important aftercare tip you wish you knew earlier. \
                           Keep it practical and evidence-minded."
                        .to_string(),
                    likes: 18,
                    posts: vec![Post {
                        id: "p1".to_string(),
                        author: "Guest".to_string(),
                        created_at: now - Duration::days(2) + Duration::hours(1),
                        body: "SPF. Always. I underestimated how much it influences outcomes \
                               after pigment-focused treatments."
                            .to_string(),
                        likes: 6,
                    }],
                },
                ForumThread {
                    id: "t2".to_string(),
                    title: "How do you evaluate risk vs. marketing hype?".to_string(),
                    tag: "Decision-making".to_string(),
                    created_at: now - Duration::days(6),
                    author: "EquilibriumSeeker".to_string(),
                    body: "What questions do you ask a clinic to separate facts from sales? \
                           Any red flags you’ve noticed?"
                        .to_string(),
                    likes: 31,
                    posts: Vec::new(),
                },
            ],
        },
    }
}

fn default_catalogue() -> Vec<Procedure> {
    vec![
        procedure(
            "botox-brow",
            "Neuromodulator – Brow Lift (non-surgical)",
            "Injectables",
            (15, 0),
            (2500.0, 4500.0),
            3,
            RiskLevel::Low,
            "Targets muscle activity to subtly elevate the brow area. Results vary with anatomy and dosing.",
            &[
                "Avoid rubbing the area for 24h",
                "Stay upright for 4h",
                "Delay intense exercise for 24h",
            ],
            &[
                "“It freezes your whole face” – dosing and placement are targeted",
                "“Results are instant” – peak effect typically develops over days",
            ],
        ),
        procedure(
            "filler-lips",
            "Dermal Filler – Lips",
            "Injectables",
            (30, 2),
            (3500.0, 6500.0),
            9,
            RiskLevel::Medium,
            "Adds volume and shape. Technique and product selection matter for natural results.",
            &[
                "Expect swelling/bruising for 24–72h",
                "Avoid alcohol for 24h",
                "Use cold compresses if needed",
            ],
            &[
                "“All fillers look the same” – outcomes depend heavily on technique",
                "“Bigger is better” – balance and proportion are key",
            ],
        ),
        procedure(
            "skin-needling",
            "Microneedling (Skin Needling)",
            "Skin",
            (45, 3),
            (1800.0, 3500.0),
            1,
            RiskLevel::Low,
            "Creates microchannels to support skin renewal. Often performed as a series for cumulative effect.",
            &[
                "Skip actives (retinoids/acids) for 48–72h",
                "Use gentle cleanser + moisturiser",
                "SPF daily",
            ],
            &["“More depth is always better” – too aggressive can inflame and harm"],
        ),
        procedure(
            "laser-pigment",
            "Laser – Pigment Correction",
            "Energy-based",
            (30, 5),
            (2200.0, 5200.0),
            2,
            RiskLevel::Medium,
            "Targets pigment with light energy. Requires clinician assessment for skin type and pigment origin.",
            &[
                "Strict sun avoidance + SPF",
                "Do not pick flaking skin",
                "Follow clinic-specific guidance",
            ],
            &[
                "“One session fixes everything” – series often recommended",
                "“Sun is fine after” – sun exposure increases risk of rebound pigmentation",
            ],
        ),
        procedure(
            "rf-tighten",
            "Radiofrequency (RF) Skin Tightening",
            "Energy-based",
            (60, 0),
            (2500.0, 7000.0),
            6,
            RiskLevel::Low,
            "Heats tissue to stimulate collagen remodelling over time. Results are gradual.",
            &[
                "Hydrate well",
                "Use gentle skincare for 24h",
                "Avoid hot sauna same day",
            ],
            &["“Instant lift” – improvements develop over weeks/months"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn procedure(
    id: &str,
    name: &str,
    category: &str,
    (duration_min, downtime_days): (u32, u32),
    (low, high): (f64, f64),
    repeat_every_months: u32,
    risk_level: RiskLevel,
    overview: &str,
    aftercare: &[&str],
    misconceptions: &[&str],
) -> Procedure {
    Procedure {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        duration_min,
        downtime_days,
        price_range: PriceRange::new_unchecked(low, high),
        repeat_every_months,
        risk_level,
        overview: overview.to_string(),
        aftercare: aftercare.iter().map(|s| s.to_string()).collect(),
        misconceptions: misconceptions.iter().map(|s| s.to_string()).collect(),
    }
}
