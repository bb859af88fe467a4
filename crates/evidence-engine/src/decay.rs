//! Decay & Points Model
//!
//! Converts a single evidence record into a non-negative raw point value on a
//! 0-8 scale, discounted by age (natural-exponential decay over whole months)
//! and by review count.

use analysis_core::{AnalysisError, EvidenceRecord};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half-lives shorter than this are raised to it
pub const MIN_DECAY_MONTHS: u32 = 6;

/// Top of the base-points scale (a score of 100 maps here)
pub const MAX_BASE_POINTS: u32 = 8;

const SCORE_PER_POINT: f64 = 12.5;

/// One band of the tier classification table
struct TierRule {
    keywords: &'static [&'static str],
    points: u32,
}

/// Evaluated top-down; the first band with a matching keyword wins.
const TIER_RULES: &[TierRule] = &[
    TierRule {
        keywords: &["leader", "tier 1", "top 10", "platinum"],
        points: 8,
    },
    TierRule {
        keywords: &["strong performer", "challenger", "tier 2", "top 50", "gold"],
        points: 6,
    },
    TierRule {
        keywords: &["visionary", "contender", "high performer", "tier 3", "silver"],
        points: 4,
    },
    TierRule {
        keywords: &["niche", "top 100", "bronze"],
        points: 2,
    },
];

/// Per-record breakdown of how the raw points were reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvidence {
    pub age_months: i32,
    pub decay: f64,
    pub base_points: u32,
    pub count_factor: f64,
    pub raw_points: u32,
}

/// Whole calendar months from `as_of` to `today`.
///
/// Day-of-month is ignored: the 1st and the 28th of the same month age
/// identically, matching half-lives that are specified in whole months.
pub fn months_between(as_of: NaiveDate, today: NaiveDate) -> i32 {
    (today.year() - as_of.year()) * 12 + (today.month() as i32 - as_of.month() as i32)
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp
pub fn parse_as_of(raw: &str) -> Result<NaiveDate, AnalysisError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| AnalysisError::InvalidData(format!("unparseable as_of date '{}'", raw)))
}

/// `exp(-age / max(6, decay_months))`, in (0, 1].
/// Future-dated records are treated as age 0.
pub fn decay_factor(age_months: i32, decay_months: u32) -> f64 {
    let age = age_months.max(0) as f64;
    let half_life = decay_months.max(MIN_DECAY_MONTHS) as f64;
    (-age / half_life).exp()
}

/// Base points on the 0-8 scale.
///
/// A positive numeric score takes precedence and maps linearly (100 -> 8).
/// Otherwise the tier label is classified case-insensitively.
pub fn base_points(tier: Option<&str>, score: Option<f64>) -> u32 {
    if let Some(score) = score {
        if score > 0.0 {
            return ((score / SCORE_PER_POINT).round() as u32).min(MAX_BASE_POINTS);
        }
    }

    tier.map(classify_tier).unwrap_or(0)
}

fn classify_tier(tier: &str) -> u32 {
    let tier = tier.to_lowercase();
    TIER_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| tier.contains(*kw)))
        .map(|rule| rule.points)
        .unwrap_or(0)
}

/// `min(1, log10(1 + reviews) / 2)`; no count means no discount.
pub fn count_factor(reviews: Option<u64>) -> f64 {
    match reviews {
        Some(count) => ((1.0 + count as f64).log10() / 2.0).min(1.0),
        None => 1.0,
    }
}

/// Score one record as of `today`.
///
/// Fails only when the record's date cannot be parsed; callers drop that
/// record and carry on with the rest of the list.
pub fn raw_points(record: &EvidenceRecord, today: NaiveDate) -> Result<ScoredEvidence, AnalysisError> {
    let as_of = parse_as_of(&record.as_of)?;
    let age_months = months_between(as_of, today);
    let decay = decay_factor(age_months, record.decay_months);
    let base = base_points(record.tier.as_deref(), record.score);
    let count = count_factor(record.reviews);

    let raw = (base as f64 * decay * count).round().max(0.0) as u32;

    Ok(ScoredEvidence {
        age_months,
        decay,
        base_points: base,
        count_factor: count,
        raw_points: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leader(as_of: &str, decay_months: u32) -> EvidenceRecord {
        EvidenceRecord::new("Gartner MQ", "Cybersecurity", "PANW", as_of, decay_months)
            .with_tier("Leader")
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        let today = date(2025, 9, 15);
        assert_eq!(months_between(date(2025, 6, 1), today), 3);
        assert_eq!(months_between(date(2025, 6, 28), today), 3);
        assert_eq!(months_between(date(2024, 11, 30), today), 10);
        assert_eq!(months_between(date(2025, 9, 30), date(2025, 10, 1)), 1);
    }

    #[test]
    fn test_decay_factor_floor_and_range() {
        assert_relative_eq!(decay_factor(0, 18), 1.0);
        assert_relative_eq!(decay_factor(36, 18), (-2.0f64).exp(), epsilon = 1e-12);
        // half-life of 1 month is raised to 6
        assert_relative_eq!(decay_factor(6, 1), (-1.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(decay_factor(6, 0), (-1.0f64).exp(), epsilon = 1e-12);
        // future-dated records do not inflate
        assert_relative_eq!(decay_factor(-5, 12), 1.0);
    }

    #[test]
    fn test_base_points_from_score() {
        assert_eq!(base_points(None, Some(100.0)), 8);
        assert_eq!(base_points(None, Some(50.0)), 4);
        assert_eq!(base_points(None, Some(92.0)), 7);
        assert_eq!(base_points(None, Some(6.25)), 1);
        assert_eq!(base_points(None, Some(250.0)), 8);
        // score beats tier when positive
        assert_eq!(base_points(Some("Niche"), Some(100.0)), 8);
        // non-positive score falls through to tier
        assert_eq!(base_points(Some("Gold"), Some(0.0)), 6);
    }

    #[test]
    fn test_base_points_tier_table() {
        assert_eq!(base_points(Some("Leader"), None), 8);
        assert_eq!(base_points(Some("LEADERS"), None), 8);
        assert_eq!(base_points(Some("Tier 1"), None), 8);
        assert_eq!(base_points(Some("Top 10"), None), 8);
        assert_eq!(base_points(Some("Platinum"), None), 8);
        assert_eq!(base_points(Some("Strong Performer"), None), 6);
        assert_eq!(base_points(Some("Challenger"), None), 6);
        assert_eq!(base_points(Some("Top 50"), None), 6);
        assert_eq!(base_points(Some("Gold"), None), 6);
        assert_eq!(base_points(Some("Visionary"), None), 4);
        assert_eq!(base_points(Some("High Performer"), None), 4);
        assert_eq!(base_points(Some("Silver"), None), 4);
        assert_eq!(base_points(Some("Niche Player"), None), 2);
        assert_eq!(base_points(Some("Bronze"), None), 2);
        assert_eq!(base_points(Some("Top Safety Pick+"), None), 0);
        assert_eq!(base_points(None, None), 0);
    }

    #[test]
    fn test_tier_priority_first_band_wins() {
        // matches both "leader" and "niche"
        assert_eq!(base_points(Some("Niche Leader"), None), 8);
        // plain substring match: "top 10" is checked before "top 100"
        assert_eq!(base_points(Some("Top 100"), None), 8);
        assert_eq!(base_points(Some("Tier 12"), None), 8);
        assert_eq!(base_points(Some("Top 10x"), None), 8);
    }

    #[test]
    fn test_count_factor_monotonic_and_saturating() {
        assert_relative_eq!(count_factor(None), 1.0);
        assert_relative_eq!(count_factor(Some(0)), 0.0);
        assert_relative_eq!(count_factor(Some(99)), 1.0, epsilon = 1e-12);
        assert_relative_eq!(count_factor(Some(15_000)), 1.0);

        let mut previous = 0.0;
        for count in 0..200u64 {
            let factor = count_factor(Some(count));
            assert!(factor >= previous);
            assert!(factor <= 1.0);
            previous = factor;
        }
    }

    #[test]
    fn test_raw_points_recent_leader() {
        let scored = raw_points(&leader("2025-09-01", 18), date(2025, 9, 20)).unwrap();
        assert_eq!(scored.age_months, 0);
        assert_eq!(scored.base_points, 8);
        assert_eq!(scored.raw_points, 8);
    }

    #[test]
    fn test_raw_points_three_years_old() {
        let scored = raw_points(&leader("2022-09-01", 18), date(2025, 9, 20)).unwrap();
        assert_eq!(scored.age_months, 36);
        assert_eq!(scored.raw_points, 1);
    }

    #[test]
    fn test_raw_points_decay_monotonic_in_age() {
        let today = date(2025, 12, 1);
        let mut previous = u32::MAX;
        for months_back in 0..60u32 {
            let as_of = today - chrono::Months::new(months_back);
            let record = leader(&as_of.format("%Y-%m-%d").to_string(), 12);
            let points = raw_points(&record, today).unwrap().raw_points;
            assert!(points <= previous);
            previous = points;
        }
    }

    #[test]
    fn test_raw_points_review_discount() {
        let record = EvidenceRecord::new("G2", "Zero Trust", "ZS", "2025-09-01", 12)
            .with_score(100.0)
            .with_reviews(9);
        // log10(10) / 2 = 0.5
        let scored = raw_points(&record, date(2025, 9, 1)).unwrap();
        assert_relative_eq!(scored.count_factor, 0.5, epsilon = 1e-12);
        assert_eq!(scored.raw_points, 4);
    }

    #[test]
    fn test_parse_as_of_variants() {
        assert_eq!(parse_as_of("2025-06-15").unwrap(), date(2025, 6, 15));
        assert_eq!(parse_as_of("2025-06-15T10:00:00Z").unwrap(), date(2025, 6, 15));
        assert!(parse_as_of("June 2025").is_err());
        assert!(raw_points(&leader("not-a-date", 18), date(2025, 6, 15)).is_err());
    }
}
