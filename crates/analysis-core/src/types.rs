use serde::{Deserialize, Serialize};

/// Canonical storage form of a ticker symbol (trimmed, upper-case)
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Scoring pillar that evidence points are routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pillar {
    Fundamentals,
    Market,
    BalanceSheet,
    Leadership,
    Innovation,
    Ethics,
}

impl Pillar {
    pub const ALL: [Pillar; 6] = [
        Pillar::Fundamentals,
        Pillar::Market,
        Pillar::BalanceSheet,
        Pillar::Leadership,
        Pillar::Innovation,
        Pillar::Ethics,
    ];

    /// Single-letter code used in stored weight vectors
    pub fn code(&self) -> &'static str {
        match self {
            Pillar::Fundamentals => "F",
            Pillar::Market => "M",
            Pillar::BalanceSheet => "B",
            Pillar::Leadership => "L",
            Pillar::Innovation => "A",
            Pillar::Ethics => "E",
        }
    }
}

/// Per-record routing fractions. Keys absent from storage default to 0.
///
/// Fractions for one record should sum to <= 1; this is not enforced here,
/// the aggregator's global cap is the backstop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    #[serde(rename = "F", default, skip_serializing_if = "is_zero")]
    pub fundamentals: f64,
    #[serde(rename = "M", default, skip_serializing_if = "is_zero")]
    pub market: f64,
    #[serde(rename = "B", default, skip_serializing_if = "is_zero")]
    pub balance_sheet: f64,
    #[serde(rename = "L", default, skip_serializing_if = "is_zero")]
    pub leadership: f64,
    #[serde(rename = "A", default, skip_serializing_if = "is_zero")]
    pub innovation: f64,
    #[serde(rename = "E", default, skip_serializing_if = "is_zero")]
    pub ethics: f64,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl WeightVector {
    pub fn with(mut self, pillar: Pillar, weight: f64) -> Self {
        *self.weight_mut(pillar) = weight;
        self
    }

    pub fn weight(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Fundamentals => self.fundamentals,
            Pillar::Market => self.market,
            Pillar::BalanceSheet => self.balance_sheet,
            Pillar::Leadership => self.leadership,
            Pillar::Innovation => self.innovation,
            Pillar::Ethics => self.ethics,
        }
    }

    fn weight_mut(&mut self, pillar: Pillar) -> &mut f64 {
        match pillar {
            Pillar::Fundamentals => &mut self.fundamentals,
            Pillar::Market => &mut self.market,
            Pillar::BalanceSheet => &mut self.balance_sheet,
            Pillar::Leadership => &mut self.leadership,
            Pillar::Innovation => &mut self.innovation,
            Pillar::Ethics => &mut self.ethics,
        }
    }

    pub fn total(&self) -> f64 {
        Pillar::ALL.iter().map(|p| self.weight(*p)).sum()
    }

    /// True when the record routes nothing into any pillar
    pub fn is_unrouted(&self) -> bool {
        Pillar::ALL.iter().all(|p| self.weight(*p) <= 0.0)
    }
}

/// One third-party ranking, certification or review aggregate for a ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// e.g. "Gartner MQ", "Forrester Wave", "ENR Top 250"
    pub source: String,
    /// Informational category, e.g. "Cybersecurity"
    pub domain: String,
    pub symbol: String,
    /// Qualitative placement, e.g. "Leader", "Tier 1", "Top 10"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Optional 0-100 score (e.g. review satisfaction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Review/sample count behind the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
    /// ISO calendar date; parsed at scoring time so one bad date only affects its own record
    pub as_of: String,
    #[serde(default)]
    pub weight_vector: WeightVector,
    /// Decay half-life in months
    pub decay_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EvidenceRecord {
    pub fn new(source: &str, domain: &str, symbol: &str, as_of: &str, decay_months: u32) -> Self {
        Self {
            source: source.to_string(),
            domain: domain.to_string(),
            symbol: normalize_symbol(symbol),
            tier: None,
            score: None,
            reviews: None,
            as_of: as_of.to_string(),
            weight_vector: WeightVector::default(),
            decay_months,
            notes: None,
        }
    }

    pub fn with_tier(mut self, tier: &str) -> Self {
        self.tier = Some(tier.to_string());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_reviews(mut self, reviews: u64) -> Self {
        self.reviews = Some(reviews);
        self
    }

    pub fn with_weights(mut self, weight_vector: WeightVector) -> Self {
        self.weight_vector = weight_vector;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Provenance snapshot of a record chosen for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub as_of: String,
}

impl From<&EvidenceRecord> for EvidenceItem {
    fn from(record: &EvidenceRecord) -> Self {
        Self {
            source: record.source.clone(),
            tier: record.tier.clone(),
            score: record.score,
            as_of: record.as_of.clone(),
        }
    }
}

/// Integer points per pillar after capping and rounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScores {
    #[serde(rename = "F")]
    pub fundamentals: u32,
    #[serde(rename = "M")]
    pub market: u32,
    #[serde(rename = "B")]
    pub balance_sheet: u32,
    #[serde(rename = "L")]
    pub leadership: u32,
    #[serde(rename = "A")]
    pub innovation: u32,
    #[serde(rename = "E")]
    pub ethics: u32,
}

impl PillarScores {
    pub fn get(&self, pillar: Pillar) -> u32 {
        match pillar {
            Pillar::Fundamentals => self.fundamentals,
            Pillar::Market => self.market,
            Pillar::BalanceSheet => self.balance_sheet,
            Pillar::Leadership => self.leadership,
            Pillar::Innovation => self.innovation,
            Pillar::Ethics => self.ethics,
        }
    }

    pub fn set(&mut self, pillar: Pillar, value: u32) {
        match pillar {
            Pillar::Fundamentals => self.fundamentals = value,
            Pillar::Market => self.market = value,
            Pillar::BalanceSheet => self.balance_sheet = value,
            Pillar::Leadership => self.leadership = value,
            Pillar::Innovation => self.innovation = value,
            Pillar::Ethics => self.ethics = value,
        }
    }

    pub fn total(&self) -> u32 {
        Pillar::ALL.iter().map(|p| self.get(*p)).sum()
    }
}

/// Evidence aggregation result for one ticker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarBoost {
    #[serde(flatten)]
    pub pillars: PillarScores,
    /// Up to the display limit (3 by default)
    pub items: Vec<EvidenceItem>,
}

impl PillarBoost {
    pub fn is_empty(&self) -> bool {
        self.pillars.total() == 0 && self.items.is_empty()
    }
}

/// Market and valuation fields consumed by the dimension scorers.
///
/// Ratios follow the upstream convention: margins, ROE and growth rates are
/// fractions (0.15 = 15%), dividend yield and daily change are percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub company_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub week52_high: Option<f64>,
    #[serde(default)]
    pub week52_low: Option<f64>,
    #[serde(default)]
    pub price_to_book: Option<f64>,
    #[serde(default)]
    pub ev_to_ebitda: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub current_ratio: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub operating_margin: Option<f64>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub revenue_growth_yoy: Option<f64>,
    #[serde(default)]
    pub earnings_growth_yoy: Option<f64>,
}

/// Balance-sheet inputs for the distress index (same currency unit throughout)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AltmanInputs {
    /// Current assets minus current liabilities
    pub working_capital: f64,
    pub total_assets: f64,
    pub retained_earnings: f64,
    /// Earnings before interest and tax
    pub ebit: f64,
    pub market_cap: f64,
    pub total_liabilities: f64,
    /// Sales
    pub revenue: f64,
}

/// Trailing vs prior-period fundamentals for the quality index
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PiotroskiInputs {
    pub roa_ttm: f64,
    pub net_income_ttm: f64,
    pub ocf_ttm: f64,
    pub current_ratio_this: f64,
    pub current_ratio_last: f64,
    pub lt_debt_this: f64,
    pub lt_debt_last: f64,
    pub shares_out_this: f64,
    pub shares_out_last: f64,
    /// Gross margin, recent quarter
    pub gross_margin_q: f64,
    /// Gross margin, same quarter last year
    pub gross_margin_q_last: f64,
    pub asset_turnover_ttm: f64,
    pub asset_turnover_last: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FundamentalInputs {
    #[serde(default)]
    pub altman: Option<AltmanInputs>,
    #[serde(default)]
    pub piotroski: Option<PiotroskiInputs>,
}

/// The four 0-100 dimension scores blended into the composite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub growth: u32,
    pub value: u32,
    pub health: u32,
    pub momentum: u32,
}

/// Discrete recommendation derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Hold,
    Sell,
    /// Forced by the ethics gate, independent of score
    Exclude,
}

impl Action {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 70 => Action::Buy,
            s if s >= 50 => Action::Hold,
            _ => Action::Sell,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
            Action::Exclude => "EXCLUDE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_vector_missing_keys_default_to_zero() {
        let wv: WeightVector = serde_json::from_str(r#"{"L":0.6,"A":0.4}"#).unwrap();
        assert_eq!(wv.leadership, 0.6);
        assert_eq!(wv.innovation, 0.4);
        assert_eq!(wv.fundamentals, 0.0);
        assert_eq!(wv.weight(Pillar::Ethics), 0.0);
        assert!(!wv.is_unrouted());
        assert!(WeightVector::default().is_unrouted());
    }

    #[test]
    fn test_pillar_codes_match_stored_keys() {
        let mut wv = WeightVector::default();
        for (idx, pillar) in Pillar::ALL.iter().enumerate() {
            wv = wv.with(*pillar, (idx + 1) as f64);
        }
        let json = serde_json::to_value(wv).unwrap();
        for (idx, pillar) in Pillar::ALL.iter().enumerate() {
            assert_eq!(json[pillar.code()], (idx + 1) as f64);
        }
    }

    #[test]
    fn test_evidence_record_deserializes_stored_shape() {
        let raw = r#"{
            "source": "G2",
            "domain": "Zero Trust",
            "symbol": "ZS",
            "tier": "Leader",
            "score": 92,
            "reviews": 640,
            "as_of": "2025-09-01",
            "weight_vector": {"M": 0.6, "L": 0.4},
            "decay_months": 12
        }"#;
        let record: EvidenceRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.score, Some(92.0));
        assert_eq!(record.reviews, Some(640));
        assert_eq!(record.weight_vector.market, 0.6);
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_pillar_boost_serializes_flat_codes() {
        let mut boost = PillarBoost::default();
        boost.pillars.set(Pillar::Leadership, 5);
        let json = serde_json::to_value(&boost).unwrap();
        assert_eq!(json["L"], 5);
        assert_eq!(json["F"], 0);
        assert!(json["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_action_thresholds() {
        assert_eq!(Action::from_score(70), Action::Buy);
        assert_eq!(Action::from_score(69), Action::Hold);
        assert_eq!(Action::from_score(50), Action::Hold);
        assert_eq!(Action::from_score(49), Action::Sell);
        assert_eq!(serde_json::to_string(&Action::Exclude).unwrap(), "\"EXCLUDE\"");
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  zs "), "ZS");
    }
}
