use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::activity::ActivityKind;
use crate::domain::snapshot::Snapshot;
use crate::error::AppResult;
use crate::workflow::fetch::{FetchWindow, fetch_commits, fetch_issues, fetch_pull_requests};
use crate::workflow::resolve::resolve_repositories;

/// A fetch call that failed and contributed no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub repo: String,
    pub kind: ActivityKind,
    pub reason: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.repo, self.kind, self.reason)
    }
}

pub struct CollectionOutcome {
    pub snapshot: Snapshot,
    pub failures: Vec<FetchFailure>,
}

/// Runs resolver and fetchers over every repository, one at a time, and
/// assembles the snapshot. Never fails: a failed fetch counts as no records.
pub async fn collect_activity(ctx: &AppContext, now: DateTime<Utc>) -> CollectionOutcome {
    let config = &ctx.config;
    let hosting = ctx.hosting.as_ref();
    let window = FetchWindow::ending_at(now, config.window_days);

    let repos = resolve_repositories(config, hosting).await;
    info!(count = repos.len(), repos = ?repos, "resolved repositories");

    let mut commits = Vec::new();
    let mut pulls = Vec::new();
    let mut issues = Vec::new();
    let mut failures = Vec::new();

    for repo in &repos {
        info!(repo = %repo, "collecting activity");
        commits.extend(settle(
            fetch_commits(hosting, repo, window).await,
            repo,
            ActivityKind::Commits,
            &mut failures,
        ));
        pulls.extend(settle(
            fetch_pull_requests(hosting, repo, window).await,
            repo,
            ActivityKind::PullRequests,
            &mut failures,
        ));
        issues.extend(settle(
            fetch_issues(hosting, repo, window).await,
            repo,
            ActivityKind::Issues,
            &mut failures,
        ));
    }

    let snapshot = Snapshot::build(now, repos, commits, pulls, issues, config.limits);
    CollectionOutcome { snapshot, failures }
}

fn settle<T>(
    result: AppResult<Vec<T>>,
    repo: &str,
    kind: ActivityKind,
    failures: &mut Vec<FetchFailure>,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            let failure = FetchFailure {
                repo: repo.to_string(),
                kind,
                reason: err.to_string(),
            };
            warn!(failure = %failure, "fetch failed, treating as empty");
            failures.push(failure);
            Vec::new()
        }
    }
}
