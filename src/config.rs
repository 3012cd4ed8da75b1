use serde::Deserialize;

use crate::workflow::{SelectionTextPolicy, WorkflowPolicy};

const PRODUCTION_BACKEND_URL: &str = "https://moviebackend-8gld.onrender.com";
const LOCAL_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Allowed size of the suggestion panel
const SUGGESTION_RANGE: std::ops::RangeInclusive<usize> = 8..=10;

/// Which recommendation backend deployment to talk to
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendProfile {
    /// Hosted backend
    #[default]
    Production,
    /// Backend running on the developer machine
    Local,
}

impl BackendProfile {
    pub fn default_url(self) -> &'static str {
        match self {
            BackendProfile::Production => PRODUCTION_BACKEND_URL,
            BackendProfile::Local => LOCAL_BACKEND_URL,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Backend deployment used when `backend_url` is not set
    #[serde(default)]
    pub backend_profile: BackendProfile,

    /// Explicit backend base URL, overrides the profile
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Upper bound on rendered suggestions
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// What the search box shows after a suggestion is chosen
    #[serde(default)]
    pub selection_text: SelectionTextPolicy,

    /// Timeout applied to every backend request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// JSON view sessions untouched this long are torn down
    #[serde(default = "default_view_idle_timeout_secs")]
    pub view_idle_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_suggestions() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_view_idle_timeout_secs() -> u64 {
    1800
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !SUGGESTION_RANGE.contains(&self.max_suggestions) {
            anyhow::bail!(
                "MAX_SUGGESTIONS must be between {} and {}, got {}",
                SUGGESTION_RANGE.start(),
                SUGGESTION_RANGE.end(),
                self.max_suggestions
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        if self.view_idle_timeout_secs == 0 {
            anyhow::bail!("VIEW_IDLE_TIMEOUT_SECS must be at least 1");
        }
        if let Some(url) = &self.backend_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("BACKEND_URL must be an http(s) URL, got {url}");
            }
        }
        Ok(())
    }

    /// Base URL of the recommendation backend, without a trailing slash
    pub fn backend_base_url(&self) -> String {
        self.backend_url
            .as_deref()
            .unwrap_or_else(|| self.backend_profile.default_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn workflow_policy(&self) -> WorkflowPolicy {
        WorkflowPolicy {
            max_suggestions: self.max_suggestions,
            selection_text: self.selection_text,
        }
    }
}
