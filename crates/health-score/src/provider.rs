use analysis_core::{
    normalize_symbol, AnalysisError, FundamentalInputs, MarketDataProvider, MarketSnapshot,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One ticker's entry in the market data file
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataEntry {
    pub snapshot: MarketSnapshot,
    #[serde(default)]
    pub fundamentals: Option<FundamentalInputs>,
}

/// Serves snapshots and fundamentals from a JSON array of entries
pub struct JsonFileProvider {
    entries: HashMap<String, MarketDataEntry>,
    order: Vec<String>,
}

impl JsonFileProvider {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read market data file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid market data in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Vec<MarketDataEntry> = serde_json::from_str(raw)?;

        let mut entries = HashMap::new();
        let mut order = Vec::new();
        for mut entry in parsed {
            let symbol = normalize_symbol(&entry.snapshot.symbol);
            if symbol.is_empty() {
                tracing::warn!("Skipping market data entry without a symbol");
                continue;
            }
            entry.snapshot.symbol = symbol.clone();
            if entries.insert(symbol.clone(), entry).is_none() {
                order.push(symbol);
            }
        }

        Ok(Self { entries, order })
    }

    /// Symbols in file order
    pub fn symbols(&self) -> &[String] {
        &self.order
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, AnalysisError> {
        self.entries
            .get(&normalize_symbol(symbol))
            .map(|entry| entry.snapshot.clone())
            .ok_or_else(|| AnalysisError::NotFound(format!("no market data for {}", symbol)))
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Option<FundamentalInputs>, AnalysisError> {
        Ok(self
            .entries
            .get(&normalize_symbol(symbol))
            .and_then(|entry| entry.fundamentals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"snapshot": {"symbol": "zs", "company_name": "Zscaler, Inc.", "price": 210.5, "pe_ratio": 65.0}},
        {"snapshot": {"symbol": "KO", "company_name": "The Coca-Cola Company", "price": 62.0},
         "fundamentals": {"piotroski": {
            "roa_ttm": 0.1, "net_income_ttm": 10.0, "ocf_ttm": 12.0,
            "current_ratio_this": 1.1, "current_ratio_last": 1.0,
            "lt_debt_this": 5.0, "lt_debt_last": 6.0,
            "shares_out_this": 100.0, "shares_out_last": 100.0,
            "gross_margin_q": 0.6, "gross_margin_q_last": 0.58,
            "asset_turnover_ttm": 0.4, "asset_turnover_last": 0.39}}}
    ]"#;

    #[tokio::test]
    async fn test_loads_entries_in_file_order() {
        let provider = JsonFileProvider::from_json(SAMPLE).unwrap();
        assert_eq!(provider.symbols(), &["ZS".to_string(), "KO".to_string()]);

        let zs = provider.snapshot("zs").await.unwrap();
        assert_eq!(zs.symbol, "ZS");
        assert_eq!(zs.pe_ratio, Some(65.0));
        assert!(zs.market_cap.is_none());
        assert!(provider.fundamentals("ZS").await.unwrap().is_none());

        let ko = provider.fundamentals("KO").await.unwrap().unwrap();
        assert!(ko.altman.is_none());
        assert!(ko.piotroski.is_some());
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_not_found() {
        let provider = JsonFileProvider::from_json(SAMPLE).unwrap();
        assert!(matches!(
            provider.snapshot("PANW").await,
            Err(AnalysisError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(JsonFileProvider::from_json("{}").is_err());
    }
}
