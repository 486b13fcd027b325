//! Search API health check.
//!
//! Sends one minimal query and reports whether the service is reachable,
//! whether the key is accepted, and whether the account is rate limited.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nev_digest::config::API_KEY_ENV;
use nev_digest::search::{ProbeStatus, SearchOptions, DEFAULT_ENDPOINT};
use nev_digest::TavilyClient;

#[derive(Debug, Parser)]
#[command(name = "nev-verify-search", about = "Check search API availability and key validity")]
struct Cli {
    /// Search API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value = "Tesla latest news")]
    query: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let options = SearchOptions {
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(10),
        ..SearchOptions::default()
    };
    let report = TavilyClient::with_options(cli.api_key, options)?.probe(&cli.query);

    let (service, query_test, rate, detail) = match &report.status {
        ProbeStatus::Operational { has_results: true, first_title } => (
            "Operational",
            "Passed",
            "Normal",
            format!("First result title: {}", first_title.as_deref().unwrap_or("No Title")),
        ),
        ProbeStatus::Operational { .. } => {
            ("Operational", "Empty Results", "Normal", "Query returned no results".to_string())
        }
        ProbeStatus::InvalidKey => ("Operational", "Failed", "Unknown", "Invalid API key".to_string()),
        ProbeStatus::RateLimited => {
            ("Operational", "Failed", "Exceeded", "Rate limit exceeded".to_string())
        }
        ProbeStatus::Unexpected(code) => {
            ("Issues Detected", "Failed", "Unknown", format!("Status code: {code}"))
        }
        ProbeStatus::Unreachable(reason) => {
            ("Unreachable", "Failed", "Unknown", format!("Exception: {reason}"))
        }
    };

    println!("Search API status");
    println!("  Service status: {service}");
    println!("  API key valid:  {}", if report.status.key_valid() { "yes" } else { "no" });
    println!("  Query test:     {query_test}");
    println!("  Rate status:    {rate}");
    println!("  Latency:        {:.2}ms", report.latency.as_secs_f64() * 1000.0);
    println!("  Detail:         {detail}");

    Ok(if report.status.key_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
