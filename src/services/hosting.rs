use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::upstream::{UpstreamCommit, UpstreamIssue, UpstreamPull, UpstreamRepo};
use crate::error::AppResult;

/// Read access to a code-hosting account. Each call fetches a single page.
#[async_trait]
pub trait HostingService: Send + Sync {
    async fn list_owned_repos(&self) -> AppResult<Vec<UpstreamRepo>>;
    async fn list_commits(
        &self,
        repo: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<UpstreamCommit>>;
    async fn list_pulls(&self, repo: &str) -> AppResult<Vec<UpstreamPull>>;
    async fn list_issues(&self, repo: &str) -> AppResult<Vec<UpstreamIssue>>;
}
