//! In-memory hosting service for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::upstream::{UpstreamCommit, UpstreamIssue, UpstreamPull, UpstreamRepo};
use crate::error::{AppError, AppResult};
use crate::services::HostingService;

/// Serves canned JSON payloads. Endpoints without a payload answer 404.
#[derive(Default)]
pub struct StubHosting {
    repos: Option<Value>,
    commits: HashMap<String, Value>,
    pulls: HashMap<String, Value>,
    issues: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl StubHosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(mut self, payload: Value) -> Self {
        self.repos = Some(payload);
        self
    }

    pub fn with_commits(mut self, repo: &str, payload: Value) -> Self {
        self.commits.insert(repo.to_string(), payload);
        self
    }

    pub fn with_pulls(mut self, repo: &str, payload: Value) -> Self {
        self.pulls.insert(repo.to_string(), payload);
        self
    }

    pub fn with_issues(mut self, repo: &str, payload: Value) -> Self {
        self.issues.insert(repo.to_string(), payload);
        self
    }

    /// Endpoints hit so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: DeserializeOwned>(&self, call: String, payload: Option<&Value>) -> AppResult<T> {
        self.calls.lock().unwrap().push(call.clone());
        let payload = payload.ok_or_else(|| AppError::Status {
            status: StatusCode::NOT_FOUND,
            body: format!("no stub for {call}"),
        })?;
        serde_json::from_value(payload.clone()).map_err(|err| AppError::Decode(err.to_string()))
    }
}

#[async_trait]
impl HostingService for StubHosting {
    async fn list_owned_repos(&self) -> AppResult<Vec<UpstreamRepo>> {
        self.respond("repos".to_string(), self.repos.as_ref())
    }

    async fn list_commits(
        &self,
        repo: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<UpstreamCommit>> {
        self.respond(
            format!("commits:{repo}:{}", since.to_rfc3339()),
            self.commits.get(repo),
        )
    }

    async fn list_pulls(&self, repo: &str) -> AppResult<Vec<UpstreamPull>> {
        self.respond(format!("pulls:{repo}"), self.pulls.get(repo))
    }

    async fn list_issues(&self, repo: &str) -> AppResult<Vec<UpstreamIssue>> {
        self.respond(format!("issues:{repo}"), self.issues.get(repo))
    }
}
