use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::domain::upstream::{UpstreamCommit, UpstreamIssue, UpstreamPull, UpstreamRepo};
use crate::error::{AppError, AppResult};
use crate::services::HostingService;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = concat!("gh-activity/", env!("CARGO_PKG_VERSION"));
const PAGE_SIZE: &str = "100";

pub struct GitHubClient {
    http: Client,
    base_url: String,
    owner: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: String, owner: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            owner,
            token,
        }
    }

    fn repo_endpoint(&self, repo: &str, resource: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            repo,
            resource
        )
    }

    fn user_repos_endpoint(&self) -> String {
        format!("{}/user/repos", self.base_url.trim_end_matches('/'))
    }

    fn get(&self, url: String) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, ACCEPT_V3)
            .header(USER_AGENT, CLIENT_USER_AGENT);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Decode(err.to_string()))
    }

    fn activity_query() -> [(&'static str, &'static str); 4] {
        [
            ("state", "all"),
            ("per_page", PAGE_SIZE),
            ("sort", "updated"),
            ("direction", "desc"),
        ]
    }
}

#[async_trait]
impl HostingService for GitHubClient {
    async fn list_owned_repos(&self) -> AppResult<Vec<UpstreamRepo>> {
        let request = self.get(self.user_repos_endpoint()).query(&[
            ("per_page", PAGE_SIZE),
            ("sort", "updated"),
            ("affiliation", "owner"),
        ]);
        self.fetch(request).await
    }

    async fn list_commits(
        &self,
        repo: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<UpstreamCommit>> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let request = self
            .get(self.repo_endpoint(repo, "commits"))
            .query(&[("since", since.as_str()), ("per_page", PAGE_SIZE)]);
        self.fetch(request).await
    }

    async fn list_pulls(&self, repo: &str) -> AppResult<Vec<UpstreamPull>> {
        let request = self
            .get(self.repo_endpoint(repo, "pulls"))
            .query(&Self::activity_query());
        self.fetch(request).await
    }

    async fn list_issues(&self, repo: &str) -> AppResult<Vec<UpstreamIssue>> {
        let request = self
            .get(self.repo_endpoint(repo, "issues"))
            .query(&Self::activity_query());
        self.fetch(request).await
    }
}
