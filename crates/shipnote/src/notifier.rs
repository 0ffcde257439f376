use std::path::Path;

use tracing::info;

use crate::cli::NotifyArgs;
use crate::config::Config;
use crate::context::RunContext;
use crate::error::Result;
use crate::git::{CommandRunner, GitFacts, ShellRunner};
use crate::payload::{compose, NotificationPayload};
use crate::sink::{NotificationSink, SlackWebhook, StdoutSink};

/// Gather, compose and deliver. Stops at the first error; nothing is sent
/// unless every fact was collected.
pub async fn notify(
    config: &Config,
    runner: &dyn CommandRunner,
    sink: &dyn NotificationSink,
    env: impl Fn(&str) -> Option<String>,
) -> Result<NotificationPayload> {
    let git = GitFacts::gather(runner).await?;
    let ctx = RunContext::from_lookup(env)?;
    info!(
        repository = %ctx.repository,
        branch = %git.branch,
        commit = %git.commit,
        status = %config.job_status,
        "composing notification"
    );

    let payload = compose(config, &ctx, &git);
    sink.send(&payload).await?;
    Ok(payload)
}

/// Entry point for `shipnote notify`: load configuration and run against
/// the real environment, git and webhook.
pub async fn execute(args: &NotifyArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(args, config_path)?;

    let sink: Box<dyn NotificationSink> = match (&config.webhook, args.dry_run) {
        (Some(url), false) => Box::new(SlackWebhook::new(url.clone())),
        _ => Box::new(StdoutSink),
    };

    notify(&config, &ShellRunner, sink.as_ref(), |key| std::env::var(key).ok()).await?;
    Ok(())
}
