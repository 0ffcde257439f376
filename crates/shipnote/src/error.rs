use thiserror::Error;

/// Every way a notification run can fail. The `Display` output is the
/// failure reason surfaced to the CI platform.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    Configuration(String),

    #[error("{command} failed with non-zero exit code.")]
    Command { command: String },

    #[error("{command} could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sending Slack webhook: {0}")]
    Delivery(#[source] reqwest::Error),

    #[error("Rendering payload: {0}")]
    Render(#[from] serde_json::Error),
}

impl NotifyError {
    pub fn config(msg: impl Into<String>) -> Self {
        NotifyError::Configuration(msg.into())
    }
}

pub type Result<T, E = NotifyError> = std::result::Result<T, E>;
