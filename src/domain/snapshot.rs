use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::RecordLimits;
use crate::domain::activity::{CommitRecord, IssueRecord, PullRequestRecord};
use crate::domain::summary::DailySummary;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_commits: usize,
    pub total_prs: usize,
    pub total_issues: usize,
    pub active_days: usize,
}

/// One run's persisted output. Field order is the on-disk key order.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub updated_at: String,
    pub repos: Vec<String>,
    pub summary: Totals,
    pub daily: DailySummary,
    pub commits: Vec<CommitRecord>,
    pub pull_requests: Vec<PullRequestRecord>,
    pub issues: Vec<IssueRecord>,
}

impl Snapshot {
    pub fn build(
        generated_at: DateTime<Utc>,
        repos: Vec<String>,
        mut commits: Vec<CommitRecord>,
        mut pulls: Vec<PullRequestRecord>,
        mut issues: Vec<IssueRecord>,
        limits: RecordLimits,
    ) -> Self {
        // Stable sorts: ties keep fetch order.
        commits.sort_by(|a, b| b.date.cmp(&a.date));
        pulls.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        issues.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let daily = DailySummary::aggregate(&commits, &pulls, &issues);
        let summary = Totals {
            total_commits: commits.len(),
            total_prs: pulls.len(),
            total_issues: issues.len(),
            active_days: daily.active_days(),
        };

        commits.truncate(limits.commits);
        pulls.truncate(limits.pull_requests);
        issues.truncate(limits.issues);

        Self {
            updated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            repos,
            summary,
            daily,
            commits,
            pull_requests: pulls,
            issues,
        }
    }

    pub fn render(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| AppError::Serialize(err.to_string()))
    }
}
