use clap::Parser;
use tokio::runtime::Runtime;
use tracing::error;

use shipnote::actions;
use shipnote::cli::{Cli, Commands};
use shipnote::notifier::execute;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    shipnote::logging::init(cli.verbose);

    match cli.command {
        Commands::Notify(args) => {
            let rt = Runtime::new()?;
            if let Err(err) = rt.block_on(execute(&args, cli.config.as_deref())) {
                // Single place where a run fails: annotate the job and exit non-zero.
                let reason = err.to_string();
                error!(%reason, "notification failed");
                actions::error(&reason);
                std::process::exit(1);
            }
        }
        Commands::Version { json } => {
            if json {
                let info = serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "commit": option_env!("GIT_SHA").unwrap_or("unknown"),
                    "build_date": option_env!("BUILD_DATE").unwrap_or("unknown"),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "shipnote {} (commit: {}, built: {})",
                    env!("CARGO_PKG_VERSION"),
                    option_env!("GIT_SHA").unwrap_or("unknown"),
                    option_env!("BUILD_DATE").unwrap_or("unknown"),
                );
            }
        }
    }
    Ok(())
}
