use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Shipnote – posts a CI job summary to a Slack channel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gather commit details and post the job summary
    Notify(NotifyArgs),
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Inputs for a notification. Anything left unset falls back to the
/// runner's `INPUT_*` variables, then to the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct NotifyArgs {
    /// Slack incoming webhook URL
    #[arg(long, value_name = "URL")]
    pub webhook: Option<String>,

    /// Status of the finished job (success, failure, cancelled, ...)
    #[arg(long, value_name = "STATUS")]
    pub job_status: Option<String>,

    /// Message text posted above the summary
    #[arg(long)]
    pub text: Option<String>,

    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}
