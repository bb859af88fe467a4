//! Reference evidence catalogue
//!
//! Analyst quadrant placements, certifications and review aggregates for a
//! cross-section of large caps, one block per sector. Used to bootstrap an
//! empty store; reseeding replaces each ticker's whole list.

use analysis_core::{AnalysisError, EvidenceRecord, EvidenceStore, Pillar, WeightVector};
use std::collections::BTreeMap;

use Pillar::{BalanceSheet as B, Ethics as E, Fundamentals as F, Innovation as A, Leadership as L, Market as M};

fn weights(pairs: &[(Pillar, f64)]) -> WeightVector {
    pairs
        .iter()
        .fold(WeightVector::default(), |wv, (pillar, weight)| wv.with(*pillar, *weight))
}

fn tiered(
    source: &str,
    domain: &str,
    symbol: &str,
    tier: &str,
    as_of: &str,
    routing: &[(Pillar, f64)],
    decay_months: u32,
) -> EvidenceRecord {
    EvidenceRecord::new(source, domain, symbol, as_of, decay_months)
        .with_tier(tier)
        .with_weights(weights(routing))
}

/// The default catalogue, keyed by ticker
pub fn default_catalogue() -> BTreeMap<String, Vec<EvidenceRecord>> {
    let entries: Vec<(&str, Vec<EvidenceRecord>)> = vec![
        // Information technology
        ("PANW", vec![
            tiered("Gartner MQ", "Cybersecurity", "PANW", "Leader", "2025-06-15", &[(L, 0.6), (A, 0.4)], 18),
        ]),
        ("ZS", vec![
            tiered("Gartner MQ", "Cloud Security", "ZS", "Leader", "2025-06-15", &[(L, 0.6), (A, 0.4)], 18),
            tiered("G2", "Zero Trust", "ZS", "Leader", "2025-09-01", &[(M, 0.6), (L, 0.4)], 12)
                .with_score(92.0)
                .with_reviews(640),
        ]),
        ("SNOW", vec![
            tiered("Gartner MQ", "Data Warehousing", "SNOW", "Challenger", "2025-03-10", &[(L, 0.5), (A, 0.5)], 18),
            tiered("Forrester Wave", "Cloud Data", "SNOW", "Strong Performer", "2025-04-15", &[(L, 0.7), (A, 0.3)], 9),
        ]),
        // Healthcare
        ("UNH", vec![
            tiered("NCQA", "Healthcare", "UNH", "Top 10", "2025-07-20", &[(M, 0.5), (L, 0.5)], 12)
                .with_score(88.0)
                .with_notes("Health Insurance Plan Ratings"),
        ]),
        ("JNJ", vec![
            tiered("Clarivate", "Pharma R&D", "JNJ", "Top 10", "2025-08-01", &[(A, 1.0)], 12)
                .with_notes("R&D Pipeline Innovation"),
            tiered("FDA Breakthrough", "Pharma", "JNJ", "Tier 1", "2025-05-15", &[(A, 0.7), (E, 0.3)], 24)
                .with_notes("Breakthrough Therapy Designations"),
        ]),
        ("TMO", vec![
            tiered("Frost & Sullivan", "Life Sciences", "TMO", "Leader", "2025-06-10", &[(L, 0.6), (A, 0.4)], 18),
        ]),
        // Financials
        ("JPM", vec![
            tiered("Celent Model Bank", "Banking Innovation", "JPM", "Top 10", "2025-08-15", &[(A, 0.5), (L, 0.5)], 12),
            tiered("Moody's", "Credit Rating", "JPM", "Tier 1", "2025-09-01", &[(B, 0.7), (L, 0.3)], 18)
                .with_notes("Credit Rating Upgrade"),
        ]),
        ("V", vec![
            tiered("Fintech 100", "Payments", "V", "Top 10", "2025-07-01", &[(A, 0.5), (M, 0.5)], 12),
        ]),
        ("BLK", vec![
            tiered("WealthTech 100", "Asset Management", "BLK", "Leader", "2025-06-20", &[(L, 0.6), (A, 0.4)], 12),
        ]),
        // Consumer discretionary
        ("TSLA", vec![
            tiered("J.D. Power", "Automotive", "TSLA", "High Performer", "2025-09-15", &[(M, 0.6), (L, 0.4)], 12)
                .with_score(82.0)
                .with_reviews(15_000),
            tiered("IIHS Top Safety", "Automotive Safety", "TSLA", "Top Safety Pick+", "2025-08-01", &[(E, 0.7), (F, 0.3)], 24),
        ]),
        ("AMZN", vec![
            tiered("Interbrand", "E-commerce", "AMZN", "Top 10", "2025-10-01", &[(L, 0.7), (M, 0.3)], 12)
                .with_score(98.0),
        ]),
        ("NKE", vec![
            tiered("Brand Finance", "Apparel", "NKE", "Top 10", "2025-09-10", &[(L, 0.6), (M, 0.4)], 12)
                .with_score(91.0),
            tiered("Fair Labor Assoc", "Apparel Ethics", "NKE", "Gold", "2025-07-15", &[(E, 1.0)], 36),
        ]),
        // Consumer staples
        ("KO", vec![
            tiered("Interbrand", "Consumer", "KO", "Top 10", "2025-10-01", &[(L, 0.7), (M, 0.3)], 12)
                .with_score(95.0),
        ]),
        ("PG", vec![
            tiered("Sustainalytics", "CPG Sustainability", "PG", "Leader", "2025-08-20", &[(E, 0.7), (L, 0.3)], 24)
                .with_score(89.0),
            tiered("Brand Finance", "CPG", "PG", "Top 50", "2025-09-05", &[(L, 0.6), (M, 0.4)], 12),
        ]),
        ("WMT", vec![
            tiered("Kantar Retail", "Retail Excellence", "WMT", "Leader", "2025-07-30", &[(M, 0.5), (L, 0.5)], 12),
        ]),
        // Energy
        ("NEE", vec![
            tiered("BloombergNEF", "Renewable Energy", "NEE", "Tier 1", "2025-04-01", &[(F, 0.6), (A, 0.4)], 18),
            tiered("DNV Certification", "Energy Sustainability", "NEE", "Platinum", "2025-06-10", &[(E, 1.0)], 36),
        ]),
        ("XOM", vec![
            tiered("WoodMac", "Oil & Gas", "XOM", "Top 10", "2025-05-15", &[(F, 0.7), (L, 0.3)], 18),
        ]),
        ("ENPH", vec![
            tiered("BloombergNEF", "Solar Tech", "ENPH", "Tier 1", "2025-07-01", &[(A, 0.6), (F, 0.4)], 18),
        ]),
        // Industrials
        ("CRH", vec![
            tiered("ENR Top 250", "Construction", "CRH", "Top 10", "2025-07-01", &[(F, 0.2), (L, 0.8)], 18),
            tiered("LEED", "Green Building", "CRH", "Platinum", "2025-05-10", &[(E, 1.0)], 36),
        ]),
        ("BA", vec![
            tiered("Flight Global", "Aerospace", "BA", "Top 10", "2025-06-15", &[(L, 0.7), (F, 0.3)], 18),
        ]),
        ("CAT", vec![
            tiered("EquipmentWatch", "Heavy Equipment", "CAT", "Leader", "2025-08-10", &[(M, 0.5), (L, 0.5)], 18),
        ]),
        // Materials
        ("LIN", vec![
            tiered("ICIS Top 100", "Chemicals", "LIN", "Top 10", "2025-07-20", &[(F, 0.6), (L, 0.4)], 18),
        ]),
        ("NEM", vec![
            tiered("S&P Global Platts", "Mining", "NEM", "Top 50", "2025-06-05", &[(F, 0.7), (M, 0.3)], 18),
            tiered("RMI Certification", "Responsible Mining", "NEM", "Gold", "2025-04-15", &[(E, 1.0)], 36),
        ]),
        ("SHW", vec![
            tiered("Industry Week", "Specialty Chemicals", "SHW", "Top 50", "2025-08-25", &[(M, 0.5), (F, 0.5)], 12),
        ]),
        // Real estate
        ("PLD", vec![
            tiered("GRESB", "Real Estate ESG", "PLD", "Leader", "2025-09-01", &[(E, 0.6), (L, 0.4)], 24)
                .with_score(93.0),
        ]),
        ("AMT", vec![
            tiered("NAREIT", "REIT Performance", "AMT", "Leader", "2025-07-15", &[(F, 0.6), (M, 0.4)], 12),
        ]),
        ("WELL", vec![
            tiered("WELL Certification", "Health-Focused RE", "WELL", "Platinum", "2025-08-01", &[(E, 0.7), (L, 0.3)], 36),
        ]),
        // Utilities
        ("DUK", vec![
            tiered("J.D. Power", "Utility Satisfaction", "DUK", "High Performer", "2025-08-15", &[(M, 0.6), (L, 0.4)], 12)
                .with_score(85.0),
        ]),
        ("SO", vec![
            tiered("EPA Energy Star", "Utility Efficiency", "SO", "Top 10", "2025-07-20", &[(E, 0.8), (F, 0.2)], 24),
        ]),
        ("AEP", vec![
            tiered("EEI", "Grid Modernization", "AEP", "Leader", "2025-06-30", &[(A, 0.5), (F, 0.5)], 18),
        ]),
        // Communication services
        ("GOOGL", vec![
            tiered("Gartner MQ", "Cloud Infrastructure", "GOOGL", "Leader", "2025-08-10", &[(L, 0.6), (A, 0.4)], 18),
        ]),
        ("META", vec![
            tiered("App Annie", "Social Media", "META", "Leader", "2025-09-20", &[(M, 0.7), (L, 0.3)], 12)
                .with_score(90.0)
                .with_reviews(25_000),
        ]),
        ("DIS", vec![
            tiered("Hollywood Reporter", "Entertainment", "DIS", "Top 10", "2025-07-25", &[(L, 0.7), (M, 0.3)], 12),
        ]),
        // Transportation
        ("UPS", vec![
            tiered("IATA Certification", "Logistics Safety", "UPS", "Platinum", "2025-06-20", &[(E, 1.0)], 36),
        ]),
        ("DAL", vec![
            tiered("Skytrax", "Airline Quality", "DAL", "Top 50", "2025-08-30", &[(M, 0.5), (L, 0.5)], 12)
                .with_score(78.0)
                .with_reviews(8_500),
        ]),
    ];

    entries
        .into_iter()
        .map(|(symbol, records)| (symbol.to_string(), records))
        .collect()
}

/// Write the default catalogue into `store`, returning the number of tickers seeded
pub async fn seed_evidence(store: &dyn EvidenceStore) -> Result<usize, AnalysisError> {
    let catalogue = default_catalogue();
    let count = catalogue.len();

    for (symbol, records) in catalogue {
        let n = records.len();
        store.set(&symbol, records).await?;
        tracing::info!("[Evidence] Seeded {} evidence items for {}", n, symbol);
    }

    Ok(count)
}
