//! Daily collection run followed by digest output.
//!
//! Loads the monitor config and dedup store, runs every configured query,
//! saves the store, and writes the analyzed digest as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nev_digest::config::API_KEY_ENV;
use nev_digest::leaders::{group_by_leader, LeaderCollector};
use nev_digest::search::SearchOptions;
use nev_digest::store::DEFAULT_REPORT_LIMIT;
use nev_digest::translate::HttpTranslator;
use nev_digest::{
    build_digest, Analyzer, Collector, DedupStore, MonitorConfig, SummaryOptions, TavilyClient,
};

#[derive(Debug, Parser)]
#[command(name = "nev-monitor", about = "Collect and digest EV / smart-glass industry news")]
struct Cli {
    /// Monitor configuration (subjects to search for)
    #[arg(long, env = "NEV_CONFIG_PATH", default_value = "smart_glass_config.json")]
    config: PathBuf,

    /// Dedup store file
    #[arg(long, env = "NEV_STORE_PATH", default_value = "smart_glass_db.json")]
    store: PathBuf,

    /// Where to write the digest JSON
    #[arg(long, default_value = "reports/digest.json")]
    digest: PathBuf,

    /// Number of recent items in the digest
    #[arg(long, default_value_t = DEFAULT_REPORT_LIMIT)]
    limit: usize,

    /// Search API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Skip searching; only rebuild the digest from the store
    #[arg(long)]
    dry_run: bool,

    /// Also collect leader statements into the reports directory
    #[arg(long)]
    leaders: bool,

    /// Directory for leader statement snapshots
    #[arg(long, default_value = "reports")]
    reports_dir: PathBuf,

    /// LibreTranslate-compatible endpoint; enables translate-first summaries
    #[arg(long)]
    translate_endpoint: Option<String>,

    /// Per-request search timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = MonitorConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let mut store = DedupStore::load(&cli.store)
        .with_context(|| format!("loading store {}", cli.store.display()))?;
    info!(items = store.len(), "store loaded");

    let mut leader_profiles = Vec::new();
    match (cli.dry_run, cli.api_key.as_deref().filter(|k| !k.is_empty())) {
        (true, _) => info!("dry run, skipping collection"),
        (false, None) => warn!("{API_KEY_ENV} not set, skipping collection"),
        (false, Some(key)) => {
            let options = SearchOptions {
                timeout: std::time::Duration::from_secs(cli.timeout_secs),
                ..SearchOptions::default()
            };
            let client = TavilyClient::with_options(key, options)?;

            let added = Collector::new(&client, &config).run_daily_check(&mut store);
            store
                .save(&cli.store)
                .with_context(|| format!("saving store {}", cli.store.display()))?;
            info!(added, total = store.len(), "store saved");

            if cli.leaders {
                let run = LeaderCollector::new(&client, &config.leaders, &config.leader_search).run();
                let path = run.write_to(&cli.reports_dir)?;
                leader_profiles = group_by_leader(&run.results, chrono::Local::now().date_naive());
                info!(
                    statements = run.status.collected,
                    leaders = leader_profiles.len(),
                    path = %path.display(),
                    "leader statements written"
                );
            }
        }
    }

    let analyzer = match cli.translate_endpoint {
        Some(endpoint) => Analyzer::with_options(SummaryOptions::translated())
            .with_translator(Box::new(HttpTranslator::new(endpoint, "zh")?)),
        None => Analyzer::new(),
    };

    let digest = build_digest(&store, &analyzer, cli.limit).with_leaders(leader_profiles);
    digest
        .write_json(&cli.digest)
        .with_context(|| format!("writing digest {}", cli.digest.display()))?;
    info!(
        competitors = digest.competitors.len(),
        industry = digest.news.len(),
        leaders = digest.leaders.len(),
        path = %cli.digest.display(),
        "digest written"
    );

    Ok(())
}
