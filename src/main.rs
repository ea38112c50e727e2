//! Medscreen - main entry point
//!
//! Batch CLI: one invocation is one training or one evaluation. The process
//! always exits 0; failures are signalled through an `{"error": ...}` JSON
//! payload on stdout.

use clap::Parser;
use medscreen::cli::{cmd_evaluate, cmd_train, Cli, Commands};
use medscreen::config::Settings;

fn main() {
    // Logs go to stderr so stdout carries exactly one JSON object
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medscreen=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.data_dir.clone());

    match &cli.command {
        Commands::Train { input } => cmd_train(input.as_deref(), &settings),
        Commands::Evaluate { input } => cmd_evaluate(input.as_deref(), &settings),
    }
}
