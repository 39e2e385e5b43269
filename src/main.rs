mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod store;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigOverrides, TOKEN_ENV_VAR};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "gh-activity",
    author,
    version,
    about = "Snapshot recent GitHub commits, pull requests and issues into a JSON file"
)]
struct Cli {
    /// Where to write the snapshot (defaults to data.json).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Size of the trailing window in days (defaults to 90).
    #[arg(short, long)]
    days: Option<u32>,
    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(ConfigOverrides {
        output_path: cli.output,
        window_days: cli.days,
    })?;

    if config.token.is_none() {
        warn!("{TOKEN_ENV_VAR} not set; requests will be sent unauthenticated");
    }

    let hosting = Arc::new(GitHubClient::new(
        config.api_base.clone(),
        config.username.clone(),
        config.token.clone(),
    ));
    let context = AppContext::new(config, hosting);

    info!(
        user = %context.config.username,
        window_days = context.config.window_days,
        "collecting activity"
    );
    let outcome = cmd::collect::run(&context).await?;

    if !outcome.failures.is_empty() {
        let failed: Vec<String> = outcome
            .failures
            .iter()
            .map(|failure| format!("{}/{}", failure.repo, failure.kind))
            .collect();
        warn!(failed = ?failed, "some fetches returned no data");
    }

    let totals = outcome.snapshot.summary;
    println!(
        "Collected {} commits, {} pull requests, {} issues from {} repositories ({} failed fetches) -> {}",
        totals.total_commits,
        totals.total_prs,
        totals.total_issues,
        outcome.snapshot.repos.len(),
        outcome.failures.len(),
        context.config.output_path.display()
    );

    Ok(())
}
