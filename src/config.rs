use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USERNAME: &str = "junyoungjang976";
pub const DEFAULT_WINDOW_DAYS: u32 = 90;
pub const MAX_WINDOW_DAYS: u32 = 36_500;
pub const DEFAULT_OUTPUT_PATH: &str = "data.json";
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const TRACKED_REPOS: [&str; 3] = ["busungtk-docs", "portal", "hvac-mentor"];
const EXCLUDED_PATTERNS: [&str; 3] = ["jnd", "work-history", "oh-my-claudecode"];

/// How many of the most recent records of each kind end up in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimits {
    pub commits: usize,
    pub pull_requests: usize,
    pub issues: usize,
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self {
            commits: 200,
            pull_requests: 100,
            issues: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub username: String,
    pub token: Option<String>,
    pub api_base: String,
    pub tracked_repos: Vec<String>,
    pub excluded_patterns: Vec<String>,
    pub window_days: u32,
    pub output_path: PathBuf,
    pub limits: RecordLimits,
}

/// Command-line overrides applied on top of the compiled defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_path: Option<PathBuf>,
    pub window_days: Option<u32>,
}

impl AppConfig {
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        let token = env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self::defaults().with_token(token).apply(overrides)
    }

    pub fn defaults() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            token: None,
            api_base: DEFAULT_API_BASE.to_string(),
            tracked_repos: TRACKED_REPOS.iter().map(|repo| repo.to_string()).collect(),
            excluded_patterns: EXCLUDED_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            window_days: DEFAULT_WINDOW_DAYS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            limits: RecordLimits::default(),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> AppResult<Self> {
        if let Some(days) = overrides.window_days {
            if days == 0 {
                return Err(AppError::Configuration(
                    "window must span at least one day".to_string(),
                ));
            }
            if days > MAX_WINDOW_DAYS {
                return Err(AppError::Configuration(format!(
                    "window of {days} days exceeds the {MAX_WINDOW_DAYS}-day maximum"
                )));
            }
            self.window_days = days;
        }
        if let Some(path) = overrides.output_path {
            self.output_path = path;
        }
        Ok(self)
    }

    /// Case-insensitive substring match against the exclusion list.
    pub fn is_excluded(&self, repo_name: &str) -> bool {
        let name = repo_name.to_lowercase();
        self.excluded_patterns
            .iter()
            .any(|pattern| name.contains(&pattern.to_lowercase()))
    }
}
