use std::collections::HashMap;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::actions;
use crate::error::{NotifyError, Result};

pub const BRANCH_QUERY: &str = "git rev-parse --abbrev-ref HEAD";
pub const COMMIT_QUERY: &str = "git rev-parse --short HEAD";
pub const SUBJECT_QUERY: &str = "git show -s --format=%s HEAD";
pub const AUTHOR_QUERY: &str = "git show -s --format=%an HEAD";

/// Runs a command line and hands back its trimmed stdout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// `env` is layered over the current process environment; pass an empty
    /// map for no overrides.
    async fn run(&self, command: &str, env: &HashMap<String, String>) -> Result<String>;
}

/// Spawns real child processes. Arguments are split on whitespace, no shell
/// quoting is interpreted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, env: &HashMap<String, String>) -> Result<String> {
        let spawn_err = |source| NotifyError::Spawn {
            command: command.to_string(),
            source,
        };

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            spawn_err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty command line",
            ))
        })?;

        debug!(command, "running");
        let output = Command::new(program)
            .args(parts)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(spawn_err)?;

        if !output.status.success() {
            let err = NotifyError::Command {
                command: command.to_string(),
            };
            error!(command, code = ?output.status.code(), "command failed");
            actions::error(&err.to_string());
            return Err(err);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(command, %stdout, "captured");
        Ok(stdout)
    }
}

/// Facts about the checked-out commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitFacts {
    pub branch: String,
    /// Abbreviated hash.
    pub commit: String,
    /// Subject line of the commit message.
    pub message: String,
    pub author: String,
}

impl GitFacts {
    /// One query per fact, in a fixed order. The first failure aborts.
    pub async fn gather(runner: &dyn CommandRunner) -> Result<Self> {
        let no_env = HashMap::new();
        let branch = runner.run(BRANCH_QUERY, &no_env).await?;
        let commit = runner.run(COMMIT_QUERY, &no_env).await?;
        let message = runner.run(SUBJECT_QUERY, &no_env).await?;
        let author = runner.run(AUTHOR_QUERY, &no_env).await?;
        Ok(GitFacts {
            branch,
            commit,
            message,
            author,
        })
    }
}
