use crate::error::{NotifyError, Result};

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Metadata about the CI run, read from the runner's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub workflow: String,
    pub run_number: String,
    pub run_id: String,
    /// `owner/name`
    pub repository: String,
    pub server_url: String,
}

impl RunContext {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the context from any variable source. Required variables that
    /// are unset or empty are a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| NotifyError::config(format!("Environment variable {key} is not set")))
        };

        let server_url = lookup("GITHUB_SERVER_URL")
            .filter(|v| !v.is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok(RunContext {
            workflow: required("GITHUB_WORKFLOW")?,
            run_number: required("GITHUB_RUN_NUMBER")?,
            run_id: required("GITHUB_RUN_ID")?,
            repository: required("GITHUB_REPOSITORY")?,
            server_url,
        })
    }

    pub fn repository_url(&self) -> String {
        format!("{}/{}", self.server_url, self.repository)
    }

    pub fn commit_url(&self, commit: &str) -> String {
        format!("{}/commit/{commit}", self.repository_url())
    }

    pub fn branch_url(&self, branch: &str) -> String {
        format!("{}/commits/{branch}", self.repository_url())
    }

    pub fn run_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repository_url(), self.run_id)
    }
}
