//! The four 0-100 dimension scorers.
//!
//! Each starts from a neutral 50 and applies additive point buckets. A field
//! the provider could not supply skips its bucket instead of scoring as zero.
//! Evidence boosts are added before the final clamp.

use analysis_core::{DimensionScores, MarketSnapshot, PillarScores};

const NEUTRAL: i32 = 50;

fn clamp_score(score: i32) -> u32 {
    score.clamp(0, 100) as u32
}

/// Earnings growth, revenue growth and profit margin, plus the Fundamentals boost
pub fn growth_score(snapshot: &MarketSnapshot, evidence_boost: u32) -> u32 {
    let mut score = NEUTRAL;

    if let Some(eps_growth) = snapshot.earnings_growth_yoy {
        score += if eps_growth > 0.20 {
            20
        } else if eps_growth > 0.10 {
            15
        } else if eps_growth > 0.05 {
            10
        } else if eps_growth < -0.10 {
            -15
        } else {
            0
        };
    }

    if let Some(revenue_growth) = snapshot.revenue_growth_yoy {
        score += if revenue_growth > 0.15 {
            15
        } else if revenue_growth > 0.10 {
            10
        } else if revenue_growth > 0.05 {
            5
        } else if revenue_growth < 0.0 {
            -10
        } else {
            0
        };
    }

    if let Some(margin) = snapshot.profit_margin {
        score += if margin > 0.20 {
            15
        } else if margin > 0.10 {
            10
        } else if margin > 0.05 {
            5
        } else if margin < 0.0 {
            -15
        } else {
            0
        };
    }

    clamp_score(score + evidence_boost as i32)
}

/// Valuation multiples and yield. No evidence pillar feeds value.
pub fn value_score(snapshot: &MarketSnapshot) -> u32 {
    let mut score = NEUTRAL;

    // Multiples at or below zero mean negative earnings or book; they carry no valuation signal
    if let Some(pe) = snapshot.pe_ratio.filter(|pe| *pe > 0.0) {
        score += if pe < 15.0 {
            20
        } else if pe < 20.0 {
            15
        } else if pe < 25.0 {
            5
        } else if pe > 40.0 {
            -15
        } else if pe > 30.0 {
            -5
        } else {
            0
        };
    }

    if let Some(pb) = snapshot.price_to_book.filter(|pb| *pb > 0.0) {
        score += if pb < 1.5 {
            15
        } else if pb < 3.0 {
            10
        } else if pb < 5.0 {
            5
        } else if pb > 10.0 {
            -10
        } else {
            0
        };
    }

    if let Some(dividend_yield) = snapshot.dividend_yield {
        score += if dividend_yield > 3.0 {
            10
        } else if dividend_yield > 2.0 {
            7
        } else if dividend_yield > 1.0 {
            3
        } else {
            0
        };
    }

    if let Some(ev) = snapshot.ev_to_ebitda.filter(|ev| *ev > 0.0) {
        score += if ev < 10.0 {
            10
        } else if ev < 15.0 {
            5
        } else if ev > 25.0 {
            -5
        } else {
            0
        };
    }

    clamp_score(score)
}

/// Returns, liquidity, leverage and operating margin, plus the Balance Sheet boost
pub fn health_score(snapshot: &MarketSnapshot, evidence_boost: u32) -> u32 {
    let mut score = NEUTRAL;

    if let Some(roe) = snapshot.roe {
        score += if roe > 0.20 {
            15
        } else if roe > 0.15 {
            12
        } else if roe > 0.10 {
            8
        } else if roe < 0.0 {
            -15
        } else {
            0
        };
    }

    if let Some(current_ratio) = snapshot.current_ratio {
        score += if current_ratio > 2.0 {
            10
        } else if current_ratio > 1.5 {
            7
        } else if current_ratio > 1.0 {
            3
        } else if current_ratio < 1.0 {
            -10
        } else {
            0
        };
    }

    if let Some(debt_to_equity) = snapshot.debt_to_equity {
        score += if debt_to_equity < 0.0 {
            // negative equity
            -10
        } else if debt_to_equity < 0.5 {
            15
        } else if debt_to_equity < 1.0 {
            10
        } else if debt_to_equity < 1.5 {
            5
        } else if debt_to_equity > 2.5 {
            -10
        } else {
            0
        };
    }

    if let Some(margin) = snapshot.operating_margin {
        score += if margin > 0.25 {
            10
        } else if margin > 0.15 {
            7
        } else if margin > 0.10 {
            3
        } else if margin < 0.0 {
            -10
        } else {
            0
        };
    }

    clamp_score(score + evidence_boost as i32)
}

/// Position of `price` within the 52-week range, in [0, 1] for in-range prices
fn range_position(snapshot: &MarketSnapshot) -> Option<f64> {
    let high = snapshot.week52_high.filter(|h| *h > 0.0)?;
    let low = snapshot.week52_low.filter(|l| *l > 0.0)?;
    let range = high - low;
    if range <= 0.0 || snapshot.price <= 0.0 {
        return None;
    }
    Some((snapshot.price - low) / range)
}

/// Daily change, 52-week range position and size, plus the Market boost
pub fn momentum_score(snapshot: &MarketSnapshot, evidence_boost: u32) -> u32 {
    let mut score = NEUTRAL;

    if let Some(change) = snapshot.change_percent {
        score += if change > 5.0 {
            15
        } else if change > 2.0 {
            10
        } else if change > 0.0 {
            5
        } else if change < -5.0 {
            -15
        } else if change < -2.0 {
            -10
        } else if change < 0.0 {
            -5
        } else {
            0
        };
    }

    if let Some(position) = range_position(snapshot) {
        score += if position > 0.8 {
            15
        } else if position > 0.6 {
            10
        } else if position > 0.4 {
            5
        } else if position < 0.2 {
            -10
        } else {
            0
        };
    }

    if let Some(market_cap) = snapshot.market_cap.filter(|cap| *cap > 0.0) {
        score += if market_cap > 50_000_000_000.0 {
            10
        } else if market_cap > 10_000_000_000.0 {
            7
        } else if market_cap > 2_000_000_000.0 {
            3
        } else if market_cap < 500_000_000.0 {
            -5
        } else {
            0
        };
    }

    clamp_score(score + evidence_boost as i32)
}

/// Only the F, B and M pillars feed dimensions; L, A and E are informational.
pub fn score_dimensions(snapshot: &MarketSnapshot, boost: &PillarScores) -> DimensionScores {
    DimensionScores {
        growth: growth_score(snapshot, boost.fundamentals),
        value: value_score(snapshot),
        health: health_score(snapshot, boost.balance_sheet),
        momentum: momentum_score(snapshot, boost.market),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> MarketSnapshot {
        MarketSnapshot {
            symbol: "TEST".to_string(),
            company_name: "Test Corp".to_string(),
            price: 100.0,
            ..Default::default()
        }
    }

    fn strong() -> MarketSnapshot {
        MarketSnapshot {
            change_percent: Some(6.0),
            market_cap: Some(2.0e12),
            pe_ratio: Some(12.0),
            dividend_yield: Some(3.5),
            week52_high: Some(105.0),
            week52_low: Some(60.0),
            price_to_book: Some(1.2),
            ev_to_ebitda: Some(8.0),
            roe: Some(0.30),
            current_ratio: Some(2.5),
            debt_to_equity: Some(0.3),
            operating_margin: Some(0.30),
            profit_margin: Some(0.25),
            revenue_growth_yoy: Some(0.20),
            earnings_growth_yoy: Some(0.25),
            ..blank()
        }
    }

    #[test]
    fn test_missing_fields_stay_neutral() {
        let scores = score_dimensions(&blank(), &PillarScores::default());
        assert_eq!(
            scores,
            DimensionScores {
                growth: 50,
                value: 50,
                health: 50,
                momentum: 50,
            }
        );
    }

    #[test]
    fn test_strong_company_saturates() {
        let snapshot = strong();
        assert_eq!(growth_score(&snapshot, 0), 100);
        assert_eq!(value_score(&snapshot), 100);
        assert_eq!(health_score(&snapshot, 0), 100);
        assert_eq!(momentum_score(&snapshot, 0), 90);
        // evidence cannot push past the ceiling
        assert_eq!(momentum_score(&snapshot, 10), 100);
        assert_eq!(growth_score(&snapshot, 10), 100);
    }

    #[test]
    fn test_evidence_added_before_clamp() {
        let weak = MarketSnapshot {
            earnings_growth_yoy: Some(-0.5),
            revenue_growth_yoy: Some(-0.2),
            profit_margin: Some(-0.1),
            ..blank()
        };
        // 50 - 15 - 10 - 15 = 10
        assert_eq!(growth_score(&weak, 0), 10);
        assert_eq!(growth_score(&weak, 7), 17);

        let boost = PillarScores {
            fundamentals: 3,
            balance_sheet: 2,
            market: 4,
            leadership: 10,
            ..Default::default()
        };
        let scores = score_dimensions(&blank(), &boost);
        assert_eq!(scores.growth, 53);
        assert_eq!(scores.value, 50);
        assert_eq!(scores.health, 52);
        assert_eq!(scores.momentum, 54);
    }

    #[test]
    fn test_non_positive_multiples_are_skipped() {
        let snapshot = MarketSnapshot {
            pe_ratio: Some(-8.0),
            price_to_book: Some(0.0),
            ev_to_ebitda: Some(-3.0),
            ..blank()
        };
        assert_eq!(value_score(&snapshot), 50);
    }

    #[test]
    fn test_value_monotonic_in_pe() {
        let mut previous = u32::MAX;
        for pe in [5.0, 14.9, 15.0, 19.9, 24.9, 28.0, 35.0, 45.0, 90.0] {
            let snapshot = MarketSnapshot {
                pe_ratio: Some(pe),
                ..blank()
            };
            let score = value_score(&snapshot);
            assert!(score <= previous, "pe {} scored {} after {}", pe, score, previous);
            previous = score;
        }
    }

    #[test]
    fn test_growth_monotonic_in_revenue_growth() {
        let mut previous = 0;
        for growth in [-0.3, -0.01, 0.0, 0.06, 0.11, 0.16, 0.5] {
            let snapshot = MarketSnapshot {
                revenue_growth_yoy: Some(growth),
                ..blank()
            };
            let score = growth_score(&snapshot, 0);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_health_penalizes_leverage() {
        let with_de = |de: f64| {
            health_score(
                &MarketSnapshot {
                    debt_to_equity: Some(de),
                    ..blank()
                },
                0,
            )
        };
        assert_eq!(with_de(0.2), 65);
        assert_eq!(with_de(1.2), 55);
        assert_eq!(with_de(2.0), 50);
        assert_eq!(with_de(3.0), 40);
        assert_eq!(with_de(-1.0), 40);
    }

    #[test]
    fn test_momentum_range_position() {
        let at = |price: f64| MarketSnapshot {
            price,
            week52_high: Some(200.0),
            week52_low: Some(100.0),
            ..blank()
        };
        assert_eq!(momentum_score(&at(190.0), 0), 65);
        assert_eq!(momentum_score(&at(150.0), 0), 55);
        assert_eq!(momentum_score(&at(110.0), 0), 40);

        // degenerate range is ignored
        let flat = MarketSnapshot {
            week52_high: Some(100.0),
            week52_low: Some(100.0),
            ..blank()
        };
        assert_eq!(momentum_score(&flat, 0), 50);
    }
}
