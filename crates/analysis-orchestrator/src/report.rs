use analysis_core::{Action, DimensionScores, EvidenceItem, PillarBoost, PillarScores};
use chrono::{DateTime, Utc};
use fundamental_analysis::FinancialScores;
use serde::{Deserialize, Serialize};

use crate::composite::CompositeScore;

pub const ETHICS_EXCLUSION_REASON: &str = "Failed ethics screening";

/// Full health-score result for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreReport {
    pub symbol: String,
    pub company_name: String,
    /// 0-100 composite
    pub score: u32,
    pub action: Action,
    pub breakdown: DimensionScores,
    pub evidence_boost: PillarScores,
    /// Top evidence shown alongside the score
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub financial_scores: FinancialScores,
    #[serde(default)]
    pub ethics_violation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub from_cache: bool,
}

impl HealthScoreReport {
    pub fn scored(
        symbol: &str,
        company_name: &str,
        composite: CompositeScore,
        boost: PillarBoost,
        financial_scores: FinancialScores,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            company_name: company_name.to_string(),
            score: composite.score,
            action: composite.action,
            breakdown: composite.breakdown,
            evidence_boost: boost.pillars,
            evidence: boost.items,
            financial_scores,
            ethics_violation: false,
            reason: None,
            timestamp: Utc::now(),
            from_cache: false,
        }
    }

    /// Ethics-gate failure: score 0, no scoring work attached
    pub fn excluded(symbol: &str, company_name: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            company_name: company_name.to_string(),
            score: 0,
            action: Action::Exclude,
            breakdown: DimensionScores::default(),
            evidence_boost: PillarScores::default(),
            evidence: Vec::new(),
            financial_scores: FinancialScores::default(),
            ethics_violation: true,
            reason: Some(ETHICS_EXCLUSION_REASON.to_string()),
            timestamp: Utc::now(),
            from_cache: false,
        }
    }
}
