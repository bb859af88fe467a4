use analysis_core::PiotroskiInputs;
use serde::{Deserialize, Serialize};

pub const MAX_F_SCORE: u32 = 9;

/// Per-category points; always sums to the total F score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiotroskiBreakdown {
    /// 0-4
    pub profitability: u32,
    /// 0-3
    pub leverage: u32,
    /// 0-2
    pub operating: u32,
}

impl PiotroskiBreakdown {
    pub fn total(&self) -> u32 {
        self.profitability + self.leverage + self.operating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiotroskiStrength {
    Strong,
    Average,
    Weak,
}

impl PiotroskiStrength {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 8 => PiotroskiStrength::Strong,
            s if s >= 5 => PiotroskiStrength::Average,
            _ => PiotroskiStrength::Weak,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            PiotroskiStrength::Strong => "strong",
            PiotroskiStrength::Average => "average",
            PiotroskiStrength::Weak => "weak",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PiotroskiStrength::Strong => "Strong - Excellent financial health",
            PiotroskiStrength::Average => "Average - Moderate financial health",
            PiotroskiStrength::Weak => "Weak - Poor financial health",
        }
    }
}

/// Quality index result block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiotroskiFScore {
    /// 0-9
    pub score: u32,
    /// round(score / 9 * 100)
    pub normalized: u32,
    pub strength: PiotroskiStrength,
    /// Human-readable reading of the strength band
    pub interpretation: String,
    pub breakdown: PiotroskiBreakdown,
}

impl PiotroskiFScore {
    pub fn calculate(inputs: &PiotroskiInputs) -> Self {
        let breakdown = piotroski_breakdown(inputs);
        let score = breakdown.total();
        let strength = PiotroskiStrength::from_score(score);

        Self {
            score,
            normalized: normalize_piotroski_f(score),
            strength,
            interpretation: strength.description().to_string(),
            breakdown,
        }
    }
}

fn point(signal: bool) -> u32 {
    signal as u32
}

/// Nine binary signals grouped into three categories.
///
/// Comparisons are strict, so a flat year earns nothing, except share count
/// where "no dilution" passes on equality.
pub fn piotroski_breakdown(inputs: &PiotroskiInputs) -> PiotroskiBreakdown {
    let profitability = point(inputs.roa_ttm > 0.0)
        + point(inputs.net_income_ttm > 0.0)
        + point(inputs.ocf_ttm > 0.0)
        // accruals: cash earnings ahead of reported earnings
        + point(inputs.ocf_ttm > inputs.net_income_ttm);

    let leverage = point(inputs.current_ratio_this > inputs.current_ratio_last)
        + point(inputs.lt_debt_this < inputs.lt_debt_last)
        + point(inputs.shares_out_this <= inputs.shares_out_last);

    let operating = point(inputs.gross_margin_q > inputs.gross_margin_q_last)
        + point(inputs.asset_turnover_ttm > inputs.asset_turnover_last);

    PiotroskiBreakdown {
        profitability,
        leverage,
        operating,
    }
}

pub fn calculate_piotroski_f(inputs: &PiotroskiInputs) -> u32 {
    piotroski_breakdown(inputs).total()
}

pub fn normalize_piotroski_f(score: u32) -> u32 {
    (score.min(MAX_F_SCORE) as f64 / MAX_F_SCORE as f64 * 100.0).round() as u32
}
