//! Record shapes as returned by the hosting API.
//!
//! Only the fields the collector reads are modelled. Required fields that are
//! missing or malformed fail deserialization of the whole response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamRepo {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCommit {
    pub sha: String,
    pub commit: UpstreamCommitDetail,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamCommitDetail {
    pub message: String,
    pub author: UpstreamSignature,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSignature {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamPull {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub user: UpstreamUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamIssue {
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub user: UpstreamUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<UpstreamLabel>,
    pub html_url: String,
    /// Present when the issues endpoint hands back a pull request. A
    /// `null` value still counts as present.
    #[serde(default, deserialize_with = "present_marker")]
    pub pull_request: Option<Value>,
}

fn present_marker<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl UpstreamIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_issue_without_optional_fields() {
        let issue: UpstreamIssue = serde_json::from_value(json!({
            "number": 4,
            "title": "Broken link",
            "state": "open",
            "user": { "login": "octo" },
            "created_at": "2024-01-01T09:00:00Z",
            "updated_at": "2024-01-02T09:00:00Z",
            "html_url": "https://github.com/octo/portal/issues/4"
        }))
        .unwrap();

        assert_eq!(issue.state, ItemState::Open);
        assert!(issue.closed_at.is_none());
        assert!(issue.labels.is_empty());
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn detects_pull_request_marker() {
        let issue: UpstreamIssue = serde_json::from_value(json!({
            "number": 5,
            "title": "Add docs",
            "state": "closed",
            "user": { "login": "octo" },
            "created_at": "2024-01-01T09:00:00Z",
            "updated_at": "2024-01-02T09:00:00Z",
            "closed_at": null,
            "html_url": "https://github.com/octo/portal/pull/5",
            "pull_request": { "url": "https://api.github.com/repos/octo/portal/pulls/5" }
        }))
        .unwrap();

        assert!(issue.is_pull_request());
    }

    #[test]
    fn null_pull_request_marker_still_marks_a_pull() {
        let issue: UpstreamIssue = serde_json::from_value(json!({
            "number": 6,
            "title": "Bump deps",
            "state": "open",
            "user": { "login": "octo" },
            "created_at": "2024-01-01T09:00:00Z",
            "updated_at": "2024-01-02T09:00:00Z",
            "html_url": "https://github.com/octo/portal/pull/6",
            "pull_request": null
        }))
        .unwrap();

        assert!(issue.is_pull_request());
    }

    #[test]
    fn rejects_pull_without_user() {
        let result = serde_json::from_value::<UpstreamPull>(json!({
            "number": 1,
            "title": "Missing user",
            "state": "open",
            "created_at": "2024-01-01T09:00:00Z",
            "updated_at": "2024-01-01T09:00:00Z",
            "html_url": "https://github.com/octo/portal/pull/1"
        }));
        assert!(result.is_err());
    }
}
