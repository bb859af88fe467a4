use analysis_orchestrator::KeywordEthicsGate;
use anyhow::{bail, Context, Result};
use evidence_engine::{AggregatorConfig, DisplayOrder};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HealthScoreConfig {
    // Evidence storage
    pub evidence_db_url: Option<String>,   // absent -> in-memory store
    pub evidence_load_timeout_ms: u64,     // 2000

    // Aggregation
    pub evidence_cap: f64,                 // 10
    pub evidence_display_limit: usize,     // 3
    pub evidence_display_order: DisplayOrder,
    pub evidence_include_unrouted: bool,   // false

    // Ethics screening
    pub ethics_keywords: Option<Vec<String>>, // None -> built-in list

    // Report cache
    pub report_cache_ttl_secs: u64,        // 300
}

impl HealthScoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let display_order_raw = var("EVIDENCE_DISPLAY_ORDER", "significance");
        let evidence_display_order = DisplayOrder::parse(&display_order_raw)
            .with_context(|| format!("EVIDENCE_DISPLAY_ORDER must be 'significance' or 'input', got '{}'", display_order_raw))?;

        let config = Self {
            evidence_db_url: lookup("EVIDENCE_DB_URL").filter(|url| !url.trim().is_empty()),
            evidence_load_timeout_ms: var("EVIDENCE_LOAD_TIMEOUT_MS", "2000")
                .parse()
                .context("EVIDENCE_LOAD_TIMEOUT_MS must be an integer")?,

            evidence_cap: var("EVIDENCE_CAP", "10")
                .parse()
                .context("EVIDENCE_CAP must be a number")?,
            evidence_display_limit: var("EVIDENCE_DISPLAY_LIMIT", "3")
                .parse()
                .context("EVIDENCE_DISPLAY_LIMIT must be an integer")?,
            evidence_display_order,
            evidence_include_unrouted: var("EVIDENCE_INCLUDE_UNROUTED", "false")
                .parse()
                .context("EVIDENCE_INCLUDE_UNROUTED must be true or false")?,

            ethics_keywords: lookup("ETHICS_KEYWORDS").map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),

            report_cache_ttl_secs: var("REPORT_CACHE_TTL_SECS", "300")
                .parse()
                .context("REPORT_CACHE_TTL_SECS must be an integer")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.evidence_cap.is_finite() && self.evidence_cap > 0.0) {
            bail!("EVIDENCE_CAP must be positive, got {}", self.evidence_cap);
        }
        if self.evidence_display_limit == 0 {
            bail!("EVIDENCE_DISPLAY_LIMIT must be at least 1");
        }
        if self.evidence_load_timeout_ms == 0 {
            bail!("EVIDENCE_LOAD_TIMEOUT_MS must be positive");
        }
        if matches!(&self.ethics_keywords, Some(keywords) if keywords.is_empty()) {
            bail!("ETHICS_KEYWORDS is set but lists no keywords");
        }
        Ok(())
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            cap: self.evidence_cap,
            display_limit: self.evidence_display_limit,
            display_order: self.evidence_display_order,
            include_unrouted: self.evidence_include_unrouted,
            load_timeout: Duration::from_millis(self.evidence_load_timeout_ms),
        }
    }

    pub fn ethics_gate(&self) -> KeywordEthicsGate {
        match &self.ethics_keywords {
            Some(keywords) => KeywordEthicsGate::new(keywords),
            None => KeywordEthicsGate::default(),
        }
    }

    pub fn report_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.report_cache_ttl_secs)
    }
}
