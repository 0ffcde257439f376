//! Slack incoming-webhook message shape and how a run is rendered into it.

use serde::Serialize;

use crate::config::{Config, JobStatus};
use crate::context::RunContext;
use crate::git::GitFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Good,
    Danger,
    Warning,
}

impl From<&JobStatus> for Color {
    fn from(status: &JobStatus) -> Self {
        match status {
            JobStatus::Success => Color::Good,
            JobStatus::Failure => Color::Danger,
            JobStatus::Other(_) => Color::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub color: Color,
    pub text: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Half-width layout, two fields per row.
    pub short: bool,
}

impl Field {
    fn short(title: &str, value: String) -> Self {
        Field {
            title: title.to_string(),
            value,
            short: true,
        }
    }
}

/// Slack mrkdwn hyperlink.
pub fn link(text: &str, url: &str) -> String {
    format!("<{url}|{text}>")
}

pub fn compose(config: &Config, ctx: &RunContext, git: &GitFacts) -> NotificationPayload {
    let summary = format!(
        "{} • {}",
        link(&ctx.repository, &ctx.repository_url()),
        link(
            &format!("{} • run {} • {}", ctx.workflow, ctx.run_number, config.job_status),
            &ctx.run_url(),
        ),
    );

    NotificationPayload {
        text: config.text.clone(),
        attachments: vec![Attachment {
            color: Color::from(&config.job_status),
            text: summary,
            fields: vec![
                Field::short("Branch", link(&git.branch, &ctx.branch_url(&git.branch))),
                Field::short("Commit", link(&git.commit, &ctx.commit_url(&git.commit))),
                Field::short("Message", git.message.clone()),
                Field::short("Author", git.author.clone()),
            ],
        }],
    }
}
