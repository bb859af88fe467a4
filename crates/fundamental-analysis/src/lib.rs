//! Financial distress (Altman Z) and fundamental quality (Piotroski F) indices.
//!
//! Both are pure transforms of caller-supplied numbers. How the inputs are
//! sourced or estimated is the data provider's concern, not this crate's.

pub mod altman;
pub mod piotroski;

pub use altman::{
    calculate_altman_z, normalize_altman_z, AltmanComponents, AltmanZScore, AltmanZone,
};
pub use piotroski::{
    calculate_piotroski_f, normalize_piotroski_f, piotroski_breakdown, PiotroskiBreakdown,
    PiotroskiFScore, PiotroskiStrength,
};

use analysis_core::FundamentalInputs;
use serde::{Deserialize, Serialize};

/// Distress and quality blocks for one ticker; either may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altman: Option<AltmanZScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piotroski: Option<PiotroskiFScore>,
}

impl FinancialScores {
    pub fn is_empty(&self) -> bool {
        self.altman.is_none() && self.piotroski.is_none()
    }
}

/// Score whichever input sets are present
pub fn calculate_financial_scores(inputs: &FundamentalInputs) -> FinancialScores {
    let scores = FinancialScores {
        altman: inputs.altman.as_ref().map(AltmanZScore::calculate),
        piotroski: inputs.piotroski.as_ref().map(PiotroskiFScore::calculate),
    };

    if let Some(altman) = &scores.altman {
        tracing::debug!(
            "Altman Z={:.2} ({}), normalized {}",
            altman.z,
            altman.zone.to_label(),
            altman.normalized
        );
    }
    if let Some(piotroski) = &scores.piotroski {
        tracing::debug!(
            "Piotroski F={} ({}), normalized {}",
            piotroski.score,
            piotroski.strength.to_label(),
            piotroski.normalized
        );
    }

    scores
}
