use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::domain::activity::{CommitRecord, IssueRecord, PullRequestRecord};
use crate::error::AppResult;
use crate::services::HostingService;

/// Trailing time window that bounds every fetch in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    cutoff: DateTime<Utc>,
}

impl FetchWindow {
    /// Whole-second cutoff `days` before `now`, clamped to the earliest
    /// representable instant.
    pub fn ending_at(now: DateTime<Utc>, days: u32) -> Self {
        let cutoff = now
            .trunc_subsecs(0)
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { cutoff }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.cutoff
    }
}

/// The upstream bounds commits by `since`, so no client-side filtering.
pub async fn fetch_commits(
    hosting: &dyn HostingService,
    repo: &str,
    window: FetchWindow,
) -> AppResult<Vec<CommitRecord>> {
    let raw = hosting.list_commits(repo, window.cutoff()).await?;
    Ok(raw
        .into_iter()
        .map(|commit| CommitRecord::from_upstream(commit, repo))
        .collect())
}

/// The pulls endpoint has no update-time filter; the window is applied here.
pub async fn fetch_pull_requests(
    hosting: &dyn HostingService,
    repo: &str,
    window: FetchWindow,
) -> AppResult<Vec<PullRequestRecord>> {
    let raw = hosting.list_pulls(repo).await?;
    Ok(raw
        .into_iter()
        .filter(|pull| window.contains(pull.updated_at))
        .map(|pull| PullRequestRecord::from_upstream(pull, repo))
        .collect())
}

/// Same window as pull requests, and drops pull requests the issues
/// endpoint mixes in.
pub async fn fetch_issues(
    hosting: &dyn HostingService,
    repo: &str,
    window: FetchWindow,
) -> AppResult<Vec<IssueRecord>> {
    let raw = hosting.list_issues(repo).await?;
    Ok(raw
        .into_iter()
        .filter(|issue| !issue.is_pull_request())
        .filter(|issue| window.contains(issue.updated_at))
        .map(|issue| IssueRecord::from_upstream(issue, repo))
        .collect())
}
