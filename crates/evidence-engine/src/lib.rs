//! Evidence Engine
//!
//! Turns third-party analyst rankings, certifications and review aggregates
//! into bounded, time-decayed pillar boosts for the composite health score.

pub mod aggregator;
pub mod decay;
pub mod seed;
pub mod store;

pub use aggregator::{AggregatorConfig, DisplayOrder, EvidenceAggregator};
pub use decay::{base_points, count_factor, decay_factor, months_between, parse_as_of, raw_points, ScoredEvidence};
pub use seed::{default_catalogue, seed_evidence};
pub use store::{decode_records, InMemoryEvidenceStore, SqliteEvidenceStore};
