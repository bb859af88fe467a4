use analysis_core::{Action, DimensionScores, MarketSnapshot, PillarScores};
use serde::{Deserialize, Serialize};

use crate::dimensions::score_dimensions;

/// Blend weights for the four dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub growth: f64,
    pub value: f64,
    pub health: f64,
    pub momentum: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            growth: 0.30,
            value: 0.25,
            health: 0.25,
            momentum: 0.20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub score: u32,
    pub action: Action,
    pub breakdown: DimensionScores,
}

#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    weights: CompositeWeights,
}

impl CompositeScorer {
    /// Weighted sum of the dimensions, rounded to the nearest integer
    pub fn combine(&self, breakdown: DimensionScores) -> CompositeScore {
        let w = &self.weights;
        let blended = breakdown.growth as f64 * w.growth
            + breakdown.value as f64 * w.value
            + breakdown.health as f64 * w.health
            + breakdown.momentum as f64 * w.momentum;
        let score = blended.round().max(0.0) as u32;

        CompositeScore {
            score,
            action: Action::from_score(score),
            breakdown,
        }
    }

    pub fn score(&self, snapshot: &MarketSnapshot, boost: &PillarScores) -> CompositeScore {
        self.combine(score_dimensions(snapshot, boost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(growth: u32, value: u32, health: u32, momentum: u32) -> DimensionScores {
        DimensionScores {
            growth,
            value,
            health,
            momentum,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = CompositeWeights::default();
        assert!((w.growth + w.value + w.health + w.momentum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_blend_and_action() {
        let scorer = CompositeScorer::default();

        // 24 + 20 + 20 + 12
        let result = scorer.combine(dims(80, 80, 80, 60));
        assert_eq!(result.score, 76);
        assert_eq!(result.action, Action::Buy);

        let result = scorer.combine(dims(50, 50, 50, 50));
        assert_eq!(result.score, 50);
        assert_eq!(result.action, Action::Hold);

        let result = scorer.combine(dims(40, 30, 50, 60));
        assert_eq!(result.score, 44);
        assert_eq!(result.action, Action::Sell);
    }

    #[test]
    fn test_extremes() {
        let scorer = CompositeScorer::default();
        assert_eq!(scorer.combine(dims(0, 0, 0, 0)).score, 0);
        assert_eq!(scorer.combine(dims(100, 100, 100, 100)).score, 100);
    }

    #[test]
    fn test_score_from_snapshot_uses_evidence() {
        let snapshot = MarketSnapshot {
            symbol: "TEST".to_string(),
            company_name: "Test Corp".to_string(),
            price: 10.0,
            ..Default::default()
        };
        let scorer = CompositeScorer::default();
        let plain = scorer.score(&snapshot, &PillarScores::default());
        assert_eq!(plain.score, 50);

        let boost = PillarScores {
            fundamentals: 10,
            ..Default::default()
        };
        // growth 60 -> 18 + 12.5 + 12.5 + 10 = 53
        let boosted = scorer.score(&snapshot, &boost);
        assert_eq!(boosted.breakdown.growth, 60);
        assert_eq!(boosted.score, 53);
    }
}
