//! health-score: score tickers from a market data file, blending in stored evidence.
//!
//! Usage:
//!   cargo run -p health-score -- --input market.json
//!   cargo run -p health-score -- --input market.json --symbols ZS KO
//!   cargo run -p health-score -- --seed --db sqlite:evidence.db --input market.json
//!   cargo run -p health-score -- --seed --db sqlite:evidence.db    # seed only

mod config;
mod provider;

use analysis_core::EvidenceStore;
use analysis_orchestrator::HealthScoreOrchestrator;
use anyhow::{Context, Result};
use evidence_engine::{seed_evidence, EvidenceAggregator, InMemoryEvidenceStore, SqliteEvidenceStore};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use config::HealthScoreConfig;
use provider::JsonFileProvider;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  health-score --input FILE                  Score every ticker in FILE");
    eprintln!("  health-score --input FILE --symbols A B    Score specific tickers");
    eprintln!("  health-score --seed                        Seed the reference evidence catalogue");
    eprintln!("");
    eprintln!("Options:");
    eprintln!("  --db URL        SQLite evidence store (overrides EVIDENCE_DB_URL)");
    eprintln!("  --refresh       Ignore cached reports");
    eprintln!("  --list          Print tickers that have stored evidence");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    let seed = args.iter().any(|a| a == "--seed");
    let refresh = args.iter().any(|a| a == "--refresh");
    let list = args.iter().any(|a| a == "--list");

    let input: Option<PathBuf> = args
        .iter()
        .position(|a| a == "--input")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let mut config = HealthScoreConfig::from_env().context("Invalid configuration")?;
    if let Some(db) = args
        .iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
    {
        config.evidence_db_url = Some(db.clone());
    }

    if input.is_none() && !seed && !list {
        print_usage();
        std::process::exit(1);
    }

    let store: Arc<dyn EvidenceStore> = match &config.evidence_db_url {
        Some(url) => {
            tracing::info!("Using SQLite evidence store at {}", url);
            Arc::new(
                SqliteEvidenceStore::new(url)
                    .await
                    .with_context(|| format!("Failed to open evidence store {}", url))?,
            )
        }
        None => {
            tracing::info!("No EVIDENCE_DB_URL set, using in-memory evidence store");
            Arc::new(InMemoryEvidenceStore::new())
        }
    };

    if seed {
        let seeded = seed_evidence(store.as_ref())
            .await
            .context("Failed to seed evidence")?;
        tracing::info!("Seeded evidence for {} tickers", seeded);
    }

    if list {
        let symbols = store.symbols().await.context("Failed to list evidence")?;
        println!("{}", serde_json::to_string_pretty(&symbols)?);
    }

    let Some(input) = input else {
        return Ok(());
    };

    let provider = Arc::new(JsonFileProvider::from_path(&input)?);
    let symbols: Vec<String> = match args.iter().position(|a| a == "--symbols") {
        Some(idx) => args[idx + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .cloned()
            .collect(),
        None => provider.symbols().to_vec(),
    };
    if symbols.is_empty() {
        anyhow::bail!("No symbols to score");
    }

    let aggregator = EvidenceAggregator::with_config(store, config.aggregator_config());
    let orchestrator = HealthScoreOrchestrator::new(provider, aggregator)
        .with_ethics_gate(Arc::new(config.ethics_gate()))
        .with_cache_ttl(config.report_cache_ttl());

    tracing::info!("Scoring {} tickers", symbols.len());
    let results = orchestrator.score_many(&symbols, refresh).await;

    let mut failures = 0usize;
    let output: Vec<serde_json::Value> = results
        .into_iter()
        .map(|(symbol, result)| match result {
            Ok(report) => serde_json::to_value(report)
                .unwrap_or_else(|e| json!({ "symbol": symbol, "error": e.to_string() })),
            Err(e) => {
                failures += 1;
                tracing::warn!("Failed to score {}: {}", symbol, e);
                json!({ "symbol": symbol, "error": e.to_string() })
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);

    if failures > 0 {
        tracing::warn!("{} of {} tickers could not be scored", failures, output.len());
    }

    Ok(())
}
