use async_trait::async_trait;
use crate::{AnalysisError, EvidenceRecord, FundamentalInputs, MarketSnapshot};

/// Key-value backed storage of evidence lists, one ordered list per ticker.
///
/// Implementations normalise symbols to upper-case. `set` replaces the whole
/// list; records are never mutated in place.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    async fn get(&self, symbol: &str) -> Result<Option<Vec<EvidenceRecord>>, AnalysisError>;

    async fn set(&self, symbol: &str, records: Vec<EvidenceRecord>) -> Result<(), AnalysisError>;

    /// Tickers that currently have an evidence list
    async fn symbols(&self) -> Result<Vec<String>, AnalysisError>;
}

/// Upstream market and fundamental data source
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, AnalysisError>;

    /// Distress/quality inputs, if the provider can supply them for this ticker
    async fn fundamentals(&self, symbol: &str) -> Result<Option<FundamentalInputs>, AnalysisError>;
}

/// Screening predicate evaluated before any scoring work.
/// Returning `false` forces the ticker to be excluded.
pub trait EthicsGate: Send + Sync {
    fn passes(&self, company_name: &str, description: &str) -> bool;
}
