use tracing::{info, warn};

use crate::config::AppConfig;
use crate::services::HostingService;

/// Repositories to inspect this run.
///
/// Owned repositories minus forks and excluded names. Falls back to the
/// configured tracked list when the listing cannot be fetched.
pub async fn resolve_repositories(
    config: &AppConfig,
    hosting: &dyn HostingService,
) -> Vec<String> {
    let owned = match hosting.list_owned_repos().await {
        Ok(owned) => owned,
        Err(err) => {
            warn!(error = %err, "could not list repositories, using tracked list");
            return config.tracked_repos.clone();
        }
    };

    let mut repos: Vec<String> = Vec::with_capacity(owned.len());
    for repo in owned {
        if config.is_excluded(&repo.name) {
            info!(repo = %repo.name, "skipping excluded repository");
            continue;
        }
        if repo.fork {
            info!(repo = %repo.name, "skipping fork");
            continue;
        }
        if repos.contains(&repo.name) {
            continue;
        }
        repos.push(repo.name);
    }
    repos
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::services::stub::StubHosting;

    #[tokio::test]
    async fn filters_excluded_names_and_forks() {
        let hosting = StubHosting::new().with_repos(json!([
            { "name": "portal", "fork": false },
            { "name": "JND-admin", "fork": false },
            { "name": "my-work-history", "fork": false },
            { "name": "upstream-lib", "fork": true },
            { "name": "hvac-mentor" }
        ]));

        let repos = resolve_repositories(&AppConfig::defaults(), &hosting).await;
        assert_eq!(repos, vec!["portal", "hvac-mentor"]);
    }

    #[tokio::test]
    async fn falls_back_to_tracked_list_on_error_status() {
        let config = AppConfig::defaults();
        let repos = resolve_repositories(&config, &StubHosting::new()).await;
        assert_eq!(repos, config.tracked_repos);
    }

    #[tokio::test]
    async fn falls_back_on_malformed_listing() {
        let hosting = StubHosting::new().with_repos(json!({ "message": "Bad credentials" }));
        let config = AppConfig::defaults();
        let repos = resolve_repositories(&config, &hosting).await;
        assert_eq!(repos, vec!["busungtk-docs", "portal", "hvac-mentor"]);
    }

    #[tokio::test]
    async fn empty_listing_yields_no_repositories() {
        let hosting = StubHosting::new().with_repos(json!([]));
        let repos = resolve_repositories(&AppConfig::defaults(), &hosting).await;
        assert!(repos.is_empty());
    }
}
