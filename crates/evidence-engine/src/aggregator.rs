//! Evidence Aggregator
//!
//! Loads a ticker's evidence list, scores each record with the decay model,
//! fans the points out across the six pillars by each record's weight vector,
//! then caps the combined influence and picks a small display subset.

use analysis_core::{
    normalize_symbol, AnalysisError, EvidenceItem, EvidenceRecord, EvidenceStore, Pillar, PillarBoost, PillarScores,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::decay::raw_points;

/// How the display subset is picked from records that earned points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrder {
    /// Highest raw points first; ties keep input order
    #[default]
    Significance,
    /// First records in stored order
    InputOrder,
}

impl DisplayOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "significance" | "points" => Some(DisplayOrder::Significance),
            "input" | "input_order" | "stored" => Some(DisplayOrder::InputOrder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Ceiling on the summed pillar boosts
    pub cap: f64,
    pub display_limit: usize,
    pub display_order: DisplayOrder,
    /// Show records whose weight vector routes to no pillar
    pub include_unrouted: bool,
    /// Upper bound on the evidence store read
    pub load_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            cap: 10.0,
            display_limit: 3,
            display_order: DisplayOrder::Significance,
            include_unrouted: false,
            load_timeout: Duration::from_secs(2),
        }
    }
}

pub struct EvidenceAggregator {
    store: Arc<dyn EvidenceStore>,
    config: AggregatorConfig,
}

impl EvidenceAggregator {
    pub fn new(store: Arc<dyn EvidenceStore>) -> Self {
        Self::with_config(store, AggregatorConfig::default())
    }

    pub fn with_config(store: Arc<dyn EvidenceStore>, config: AggregatorConfig) -> Self {
        Self { store, config }
    }

    /// Pillar boosts for `symbol` as of the current UTC date
    pub async fn aggregate(&self, symbol: &str) -> PillarBoost {
        self.aggregate_at(symbol, Utc::now().date_naive()).await
    }

    pub async fn aggregate_at(&self, symbol: &str, today: NaiveDate) -> PillarBoost {
        let symbol = normalize_symbol(symbol);
        let records = self.load_records(&symbol).await;
        let boost = self.aggregate_records(&records, today);

        let pillars = Pillar::ALL
            .iter()
            .map(|p| format!("{}={}", p.code(), boost.pillars.get(*p)))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "Evidence boosts for {}: {} ({} records, {} shown)",
            symbol,
            pillars,
            records.len(),
            boost.items.len()
        );

        boost
    }

    /// Read the stored list. Absence, store errors and timeouts all yield an
    /// empty list so the composite score stays usable.
    pub async fn load_records(&self, symbol: &str) -> Vec<EvidenceRecord> {
        match self.try_load_records(symbol).await {
            Ok(Some(records)) => records,
            Ok(None) => {
                tracing::debug!("No evidence stored for {}", symbol);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Evidence load failed for {}: {} - scoring without evidence", symbol, e);
                Vec::new()
            }
        }
    }

    /// Store read bounded by the configured load timeout
    pub async fn try_load_records(&self, symbol: &str) -> Result<Option<Vec<EvidenceRecord>>, AnalysisError> {
        let timeout = self.config.load_timeout;
        tokio::time::timeout(timeout, self.store.get(symbol))
            .await
            .unwrap_or_else(|_| {
                Err(AnalysisError::Timeout(format!(
                    "evidence load for {} exceeded {:?}",
                    symbol, timeout
                )))
            })
    }

    /// Pure aggregation over an already-loaded list
    pub fn aggregate_records(&self, records: &[EvidenceRecord], today: NaiveDate) -> PillarBoost {
        let scored: Vec<(&EvidenceRecord, u32)> = records
            .iter()
            .filter_map(|record| match raw_points(record, today) {
                Ok(scored) => {
                    tracing::debug!(
                        "{} [{}] age={}m decay={:.3} base={} count={:.3} -> {} pts",
                        record.source,
                        record.tier.as_deref().unwrap_or("-"),
                        scored.age_months,
                        scored.decay,
                        scored.base_points,
                        scored.count_factor,
                        scored.raw_points
                    );
                    Some((record, scored.raw_points))
                }
                Err(e) => {
                    tracing::warn!("Ignoring evidence from {} for {}: {}", record.source, record.symbol, e);
                    None
                }
            })
            .collect();

        let totals = scored.iter().fold([0.0f64; 6], |mut acc, (record, points)| {
            for (slot, pillar) in acc.iter_mut().zip(Pillar::ALL) {
                *slot += *points as f64 * record.weight_vector.weight(pillar).max(0.0);
            }
            acc
        });

        let candidates: Vec<(&EvidenceRecord, u32)> = scored
            .into_iter()
            .filter(|(record, points)| {
                *points > 0 && (self.config.include_unrouted || !record.weight_vector.is_unrouted())
            })
            .collect();

        PillarBoost {
            pillars: cap_and_round(totals, self.config.cap),
            items: self.select_display(candidates),
        }
    }

    fn select_display(&self, mut candidates: Vec<(&EvidenceRecord, u32)>) -> Vec<EvidenceItem> {
        if self.config.display_order == DisplayOrder::Significance {
            // stable: equal points keep stored order
            candidates.sort_by(|a, b| b.1.cmp(&a.1));
        }

        candidates
            .into_iter()
            .take(self.config.display_limit)
            .map(|(record, _)| EvidenceItem::from(record))
            .collect()
    }
}

/// Uniformly shrink the pillar totals when their sum exceeds `cap`, then round.
///
/// Rounding alone can push the integer sum past the cap (six pillars at 1.5
/// round to 12), so points are taken back from the pillars that gained most
/// from rounding until the sum fits.
fn cap_and_round(totals: [f64; 6], cap: f64) -> PillarScores {
    let sum: f64 = totals.iter().sum();
    let scale = if sum > cap && sum > 0.0 { cap / sum } else { 1.0 };
    let scaled = totals.map(|total| total * scale);
    let mut rounded = scaled.map(|value| value.round().max(0.0) as u32);

    let limit = cap.floor().max(0.0) as u32;
    while rounded.iter().sum::<u32>() > limit {
        let gain = |idx: usize| rounded[idx] as f64 - scaled[idx];
        let donor = (0..rounded.len())
            .filter(|&idx| rounded[idx] > 0)
            .max_by(|&a, &b| gain(a).partial_cmp(&gain(b)).unwrap_or(std::cmp::Ordering::Equal));
        match donor {
            Some(idx) => rounded[idx] -= 1,
            None => break,
        }
    }

    let mut pillars = PillarScores::default();
    for (pillar, value) in Pillar::ALL.into_iter().zip(rounded) {
        pillars.set(pillar, value);
    }
    pillars
}
