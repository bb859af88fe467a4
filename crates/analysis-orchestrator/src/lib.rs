use analysis_core::{normalize_symbol, AnalysisError, EthicsGate, MarketDataProvider};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use evidence_engine::EvidenceAggregator;
use fundamental_analysis::{calculate_financial_scores, FinancialScores};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

pub mod composite;
pub mod dimensions;
pub mod ethics;
pub mod report;

pub use composite::{CompositeScore, CompositeScorer, CompositeWeights};
pub use dimensions::{growth_score, health_score, momentum_score, score_dimensions, value_score};
pub use ethics::{KeywordEthicsGate, DEFAULT_ETHICS_KEYWORDS};
pub use report::{HealthScoreReport, ETHICS_EXCLUSION_REASON};


/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Runs the ethics gate, evidence aggregation, dimension scoring and the
/// distress/quality indices for a ticker, and caches the finished report.
pub struct HealthScoreOrchestrator {
    provider: Arc<dyn MarketDataProvider>,
    aggregator: EvidenceAggregator,
    ethics_gate: Arc<dyn EthicsGate>,
    scorer: CompositeScorer,
    report_cache: DashMap<String, CacheEntry<HealthScoreReport>>,
    cache_ttl: Duration,
}

impl HealthScoreOrchestrator {
    pub fn new(provider: Arc<dyn MarketDataProvider>, aggregator: EvidenceAggregator) -> Self {
        Self {
            provider,
            aggregator,
            ethics_gate: Arc::new(KeywordEthicsGate::default()),
            scorer: CompositeScorer::default(),
            report_cache: DashMap::new(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ethics_gate(mut self, gate: Arc<dyn EthicsGate>) -> Self {
        self.ethics_gate = gate;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Score one ticker. `refresh` skips the cached report.
    ///
    /// Only a provider failure on the market snapshot is an error; evidence and
    /// fundamentals degrade to empty blocks.
    pub async fn score(&self, symbol: &str, refresh: bool) -> Result<HealthScoreReport, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(AnalysisError::InvalidData("empty symbol".to_string()));
        }

        if !refresh {
            if let Some(report) = self.cached(&symbol) {
                tracing::debug!("Serving cached health score for {}", symbol);
                return Ok(report);
            }
        }

        tracing::info!("Scoring {}", symbol);
        let snapshot = self.provider.snapshot(&symbol).await?;

        if !self.ethics_gate.passes(&snapshot.company_name, &snapshot.description) {
            tracing::info!("{} failed ethics screening", symbol);
            return Ok(HealthScoreReport::excluded(&symbol, &snapshot.company_name));
        }

        let boost = self.aggregator.aggregate(&symbol).await;
        let composite = self.scorer.score(&snapshot, &boost.pillars);
        tracing::info!(
            "Calculated scores for {}: composite={}, action={}",
            symbol,
            composite.score,
            composite.action.to_label()
        );

        let financial_scores = self.financial_scores(&symbol).await;
        let report = HealthScoreReport::scored(
            &symbol,
            &snapshot.company_name,
            composite,
            boost,
            financial_scores,
        );

        self.report_cache.retain(|_, entry| self.is_fresh(entry.cached_at));
        self.report_cache.insert(
            symbol,
            CacheEntry {
                data: report.clone(),
                cached_at: Utc::now(),
            },
        );

        Ok(report)
    }

    /// Score several tickers concurrently. Results keep the input order.
    pub async fn score_many(
        &self,
        symbols: &[String],
        refresh: bool,
    ) -> Vec<(String, Result<HealthScoreReport, AnalysisError>)> {
        let futures = symbols.iter().map(|symbol| async move {
            (normalize_symbol(symbol), self.score(symbol, refresh).await)
        });
        join_all(futures).await
    }

    async fn financial_scores(&self, symbol: &str) -> FinancialScores {
        match self.provider.fundamentals(symbol).await {
            Ok(Some(inputs)) => calculate_financial_scores(&inputs),
            Ok(None) => FinancialScores::default(),
            Err(e) => {
                tracing::warn!("Fundamentals unavailable for {}: {}", symbol, e);
                FinancialScores::default()
            }
        }
    }

    fn cached(&self, symbol: &str) -> Option<HealthScoreReport> {
        let entry = self.report_cache.get(symbol)?;
        if !self.is_fresh(entry.cached_at) {
            return None;
        }
        let mut report = entry.data.clone();
        report.from_cache = true;
        Some(report)
    }

    fn is_fresh(&self, cached_at: DateTime<Utc>) -> bool {
        let age = (Utc::now() - cached_at).to_std().unwrap_or(Duration::ZERO);
        age < self.cache_ttl
    }

    /// Drop one ticker's cached report; returns whether one existed
    pub fn invalidate(&self, symbol: &str) -> bool {
        self.report_cache.remove(&normalize_symbol(symbol)).is_some()
    }

    /// Symbols with a cached report. Expired reports linger until the next insert.
    pub fn cached_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.report_cache.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }
}
