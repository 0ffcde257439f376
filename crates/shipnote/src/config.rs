use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::actions;
use crate::cli::NotifyArgs;
use crate::error::{NotifyError, Result};

const DEFAULT_CONFIG_NAME: &str = "shipnote.toml";

/// Outcome of the job being reported on. Anything other than `success` or
/// `failure` is kept verbatim, including the empty string when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failure,
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => JobStatus::Success,
            "failure" => JobStatus::Failure,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Success => "success",
            JobStatus::Failure => "failure",
            JobStatus::Other(s) => s,
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Other(String::new())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings read from `shipnote.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub webhook: Option<String>,
    pub job_status: Option<String>,
    pub text: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Parsing TOML config {}", path.display()))?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent only for dry runs.
    pub webhook: Option<Url>,
    pub job_status: JobStatus,
    pub text: String,
}

impl Config {
    /// Resolve inputs from flags, then the runner's `INPUT_*` variables, then
    /// the config file (explicit path, or `shipnote.toml` searched upward).
    pub fn load(args: &NotifyArgs, path_override: Option<&Path>) -> Result<Self> {
        let file = match path_override {
            Some(p) => Some(FileConfig::load(p).map_err(|e| NotifyError::config(format!("{e:#}")))?),
            None => match find_upwards(DEFAULT_CONFIG_NAME) {
                Some(p) => {
                    debug!(path = %p.display(), "using config file");
                    Some(FileConfig::load(&p).map_err(|e| NotifyError::config(format!("{e:#}")))?)
                }
                None => None,
            },
        };
        Self::resolve(args, file.unwrap_or_default(), actions::input)
    }

    pub fn resolve(args: &NotifyArgs, file: FileConfig, input: impl Fn(&str) -> String) -> Result<Self> {
        let pick = |flag: &Option<String>, name: &str, from_file: Option<String>| -> Option<String> {
            flag.as_deref()
                .map(|v| v.trim().to_string())
                .or_else(|| Some(input(name)).filter(|v| !v.is_empty()))
                .or(from_file)
                .filter(|v| !v.is_empty())
        };

        let webhook = match pick(&args.webhook, "webhook", file.webhook) {
            Some(raw) => Some(parse_webhook(&raw)?),
            None if args.dry_run => None,
            None => return Err(NotifyError::config("Input required and not supplied: webhook")),
        };
        let job_status = pick(&args.job_status, "job-status", file.job_status)
            .map(|s| JobStatus::parse(&s))
            .unwrap_or_default();
        let text = pick(&args.text, "text", file.text).unwrap_or_default();

        Ok(Config { webhook, job_status, text })
    }
}

fn parse_webhook(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| NotifyError::config(format!("Invalid webhook URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NotifyError::config(format!("Invalid webhook URL: unsupported scheme '{other}'"))),
    }
}

fn find_upwards(file_name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn inputs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> String {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned().unwrap_or_default()
    }

    #[test]
    fn job_status_parsing() {
        assert_eq!(JobStatus::parse("success"), JobStatus::Success);
        assert_eq!(JobStatus::parse("failure"), JobStatus::Failure);
        assert_eq!(JobStatus::parse("cancelled"), JobStatus::Other("cancelled".into()));
        assert_eq!(JobStatus::default().as_str(), "");
    }

    #[test]
    fn inputs_fill_unset_flags() {
        let cfg = Config::resolve(
            &NotifyArgs::default(),
            FileConfig::default(),
            inputs(&[
                ("webhook", "https://hooks.slack.com/services/T/B/X"),
                ("job-status", "failure"),
                ("text", "Nightly build"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.webhook.unwrap().as_str(), "https://hooks.slack.com/services/T/B/X");
        assert_eq!(cfg.job_status, JobStatus::Failure);
        assert_eq!(cfg.text, "Nightly build");
    }

    #[test]
    fn flags_win_over_inputs_and_file() {
        let args = NotifyArgs {
            job_status: Some(" success ".into()),
            ..Default::default()
        };
        let file = FileConfig {
            webhook: Some("https://example.com/hook".into()),
            job_status: Some("failure".into()),
            text: Some("from file".into()),
        };
        let cfg = Config::resolve(&args, file, inputs(&[("job-status", "cancelled")])).unwrap();
        assert_eq!(cfg.job_status, JobStatus::Success);
        assert_eq!(cfg.webhook.unwrap().host_str(), Some("example.com"));
        assert_eq!(cfg.text, "from file");
    }

    #[test]
    fn missing_webhook_errors() {
        let err = Config::resolve(&NotifyArgs::default(), FileConfig::default(), inputs(&[])).unwrap_err();
        assert_matches!(err, NotifyError::Configuration(_));
        assert_eq!(err.to_string(), "Input required and not supplied: webhook");
    }

    #[test]
    fn missing_webhook_is_fine_for_dry_run() {
        let args = NotifyArgs {
            dry_run: true,
            ..Default::default()
        };
        let cfg = Config::resolve(&args, FileConfig::default(), inputs(&[])).unwrap();
        assert!(cfg.webhook.is_none());
        assert_eq!(cfg.job_status, JobStatus::Other(String::new()));
    }

    #[test]
    fn malformed_webhook_errors() {
        for raw in ["not a url", "ftp://example.com/hook"] {
            let err = Config::resolve(&NotifyArgs::default(), FileConfig::default(), inputs(&[("webhook", raw)]))
                .unwrap_err();
            assert_matches!(err, NotifyError::Configuration(msg) if msg.starts_with("Invalid webhook URL"));
        }
    }

    #[test]
    fn load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"webhook = "https://hooks.slack.com/services/T/B/X"
job_status = "success"
"#,
        )
        .unwrap();

        let cfg = FileConfig::load(file.path()).unwrap();
        assert_eq!(cfg.job_status.as_deref(), Some("success"));
        assert!(cfg.text.is_none());
    }

    #[test]
    fn unreadable_explicit_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(&NotifyArgs::default(), Some(&missing)).unwrap_err();
        assert_matches!(err, NotifyError::Configuration(msg) if msg.contains("Reading config file"));
    }
}
