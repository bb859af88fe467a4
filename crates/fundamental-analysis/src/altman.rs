use analysis_core::AltmanInputs;
use serde::{Deserialize, Serialize};

/// Z at which the normalized score saturates at 100
const NORMALIZATION_CEILING: f64 = 3.5;

const SAFE_THRESHOLD: f64 = 2.99;
const DISTRESS_THRESHOLD: f64 = 1.81;

/// The five ratios behind Z, exposed for transparency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AltmanComponents {
    /// A: working capital / total assets
    pub working_capital_ratio: f64,
    /// B: retained earnings / total assets
    pub retained_earnings_ratio: f64,
    /// C: EBIT / total assets
    pub ebit_ratio: f64,
    /// D: market cap / total liabilities
    pub market_cap_to_liabilities: f64,
    /// E: revenue / total assets
    pub asset_turnover: f64,
}

impl AltmanComponents {
    /// All ratios are 0 when total assets are 0; D is 0 when liabilities are not positive.
    pub fn from_inputs(inputs: &AltmanInputs) -> Self {
        if inputs.total_assets == 0.0 {
            return Self::default();
        }

        let market_cap_to_liabilities = if inputs.total_liabilities > 0.0 {
            inputs.market_cap / inputs.total_liabilities
        } else {
            0.0
        };

        Self {
            working_capital_ratio: inputs.working_capital / inputs.total_assets,
            retained_earnings_ratio: inputs.retained_earnings / inputs.total_assets,
            ebit_ratio: inputs.ebit / inputs.total_assets,
            market_cap_to_liabilities,
            asset_turnover: inputs.revenue / inputs.total_assets,
        }
    }

    pub fn z(&self) -> f64 {
        1.2 * self.working_capital_ratio
            + 1.4 * self.retained_earnings_ratio
            + 3.3 * self.ebit_ratio
            + 0.6 * self.market_cap_to_liabilities
            + 1.0 * self.asset_turnover
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltmanZone {
    #[serde(rename = "safe")]
    Safe,
    #[serde(rename = "grey zone")]
    GreyZone,
    #[serde(rename = "distress")]
    Distress,
}

impl AltmanZone {
    /// Bands are strict on the upper side: exactly 2.99 is grey, exactly 1.81 is distress
    pub fn from_z(z: f64) -> Self {
        if z > SAFE_THRESHOLD {
            AltmanZone::Safe
        } else if z > DISTRESS_THRESHOLD {
            AltmanZone::GreyZone
        } else {
            AltmanZone::Distress
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            AltmanZone::Safe => "safe",
            AltmanZone::GreyZone => "grey zone",
            AltmanZone::Distress => "distress",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AltmanZone::Safe => "Safe Zone - Low bankruptcy risk",
            AltmanZone::GreyZone => "Grey Zone - Moderate risk",
            AltmanZone::Distress => "Distress Zone - High bankruptcy risk",
        }
    }
}

/// Distress index result block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltmanZScore {
    pub z: f64,
    /// 0-100, saturating at Z = 3.5
    pub normalized: u32,
    pub zone: AltmanZone,
    /// Human-readable reading of the zone
    pub interpretation: String,
    pub components: AltmanComponents,
}

impl AltmanZScore {
    pub fn calculate(inputs: &AltmanInputs) -> Self {
        let components = AltmanComponents::from_inputs(inputs);
        let z = calculate_altman_z(inputs);
        let zone = AltmanZone::from_z(z);

        Self {
            z,
            normalized: normalize_altman_z(z),
            zone,
            interpretation: zone.description().to_string(),
            components,
        }
    }
}

/// `Z = 1.2A + 1.4B + 3.3C + 0.6D + 1.0E` for non-financial firms.
///
/// Returns exactly 0 when total assets are 0. That is an unusable-input
/// signal, not a reading of zero risk.
pub fn calculate_altman_z(inputs: &AltmanInputs) -> f64 {
    if inputs.total_assets == 0.0 {
        return 0.0;
    }
    AltmanComponents::from_inputs(inputs).z()
}

pub fn normalize_altman_z(z: f64) -> u32 {
    (z / NORMALIZATION_CEILING * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn healthy() -> AltmanInputs {
        AltmanInputs {
            working_capital: 20.0,
            total_assets: 100.0,
            retained_earnings: 40.0,
            ebit: 15.0,
            market_cap: 300.0,
            total_liabilities: 50.0,
            revenue: 120.0,
        }
    }

    #[test]
    fn test_zero_assets_returns_zero() {
        let inputs = AltmanInputs {
            total_assets: 0.0,
            ..healthy()
        };
        assert_eq!(calculate_altman_z(&inputs), 0.0);

        let score = AltmanZScore::calculate(&inputs);
        assert_eq!(score.components, AltmanComponents::default());
        assert_eq!(score.normalized, 0);
        assert_eq!(score.zone, AltmanZone::Distress);
    }

    #[test]
    fn test_formula_weights() {
        // A=0.2 B=0.4 C=0.15 D=6 E=1.2
        let z = calculate_altman_z(&healthy());
        assert_relative_eq!(z, 0.24 + 0.56 + 0.495 + 3.6 + 1.2, epsilon = 1e-9);

        let score = AltmanZScore::calculate(&healthy());
        assert_relative_eq!(score.components.market_cap_to_liabilities, 6.0);
        assert_eq!(score.zone, AltmanZone::Safe);
        assert_eq!(score.normalized, 100);
        assert_eq!(score.interpretation, "Safe Zone - Low bankruptcy risk");
    }

    #[test]
    fn test_no_liabilities_zeroes_market_ratio() {
        let inputs = AltmanInputs {
            total_liabilities: 0.0,
            ..healthy()
        };
        let components = AltmanComponents::from_inputs(&inputs);
        assert_eq!(components.market_cap_to_liabilities, 0.0);
        assert_relative_eq!(calculate_altman_z(&inputs), 0.24 + 0.56 + 0.495 + 1.2, epsilon = 1e-9);

        let negative = AltmanInputs {
            total_liabilities: -10.0,
            ..healthy()
        };
        assert_eq!(AltmanComponents::from_inputs(&negative).market_cap_to_liabilities, 0.0);
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(AltmanZone::from_z(2.99), AltmanZone::GreyZone);
        assert_eq!(AltmanZone::from_z(2.991), AltmanZone::Safe);
        assert_eq!(AltmanZone::from_z(1.81), AltmanZone::Distress);
        assert_eq!(AltmanZone::from_z(1.82), AltmanZone::GreyZone);
        assert_eq!(AltmanZone::from_z(-3.0), AltmanZone::Distress);
        assert_eq!(AltmanZone::GreyZone.to_label(), "grey zone");
    }

    #[test]
    fn test_zone_serializes_as_band_label() {
        for zone in [AltmanZone::Safe, AltmanZone::GreyZone, AltmanZone::Distress] {
            let json = serde_json::to_value(zone).unwrap();
            assert_eq!(json, zone.to_label());
            let back: AltmanZone = serde_json::from_value(json).unwrap();
            assert_eq!(back, zone);
        }
    }

    #[test]
    fn test_normalization_clamps() {
        assert_eq!(normalize_altman_z(1.75), 50);
        assert_eq!(normalize_altman_z(3.5), 100);
        assert_eq!(normalize_altman_z(9.0), 100);
        assert_eq!(normalize_altman_z(-2.0), 0);
    }
}
