use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::upstream::{ItemState, UpstreamCommit, UpstreamIssue, UpstreamPull};

const SHORT_SHA_LEN: usize = 7;
const SUMMARY_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Commits,
    PullRequests,
    Issues,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Commits => "commits",
            ActivityKind::PullRequests => "pull requests",
            ActivityKind::Issues => "issues",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub url: String,
    pub repo: String,
}

impl CommitRecord {
    pub fn from_upstream(raw: UpstreamCommit, repo: &str) -> Self {
        let first_line = raw.commit.message.lines().next().unwrap_or_default();
        Self {
            sha: truncate_chars(&raw.sha, SHORT_SHA_LEN),
            message: truncate_chars(first_line, SUMMARY_LEN),
            author: raw.commit.author.name,
            date: raw.commit.author.date,
            url: raw.html_url,
            repo: repo.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub url: String,
    pub repo: String,
}

impl PullRequestRecord {
    pub fn from_upstream(raw: UpstreamPull, repo: &str) -> Self {
        Self {
            number: raw.number,
            title: truncate_chars(&raw.title, SUMMARY_LEN),
            state: raw.state,
            author: raw.user.login,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            merged_at: raw.merged_at,
            url: raw.html_url,
            repo: repo.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    pub url: String,
    pub repo: String,
}

impl IssueRecord {
    pub fn from_upstream(raw: UpstreamIssue, repo: &str) -> Self {
        Self {
            number: raw.number,
            title: truncate_chars(&raw.title, SUMMARY_LEN),
            state: raw.state,
            author: raw.user.login,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            closed_at: raw.closed_at,
            labels: raw.labels.into_iter().map(|label| label.name).collect(),
            url: raw.html_url,
            repo: repo.to_string(),
        }
    }
}

fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}
