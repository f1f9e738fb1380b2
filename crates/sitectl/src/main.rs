mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sitectl_core::{CoreError, MetabaseClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a service connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "sitectl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a service connection
        cmd => {
            let client = build_client(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, client, &cli.global).await
        }
    }
}

/// Build a `MetabaseClient` from the config file, profile, and CLI overrides.
fn build_client(global: &cli::GlobalOpts) -> Result<MetabaseClient, CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    // If a profile exists, use it with CLI flag overrides
    let conn = if let Some(profile) = cfg.profiles.get(&profile_name) {
        config::resolve_profile(profile, &profile_name, global)?
    } else {
        // No profile found -- try to build from CLI flags / env vars alone
        config::resolve_flags_only(global)?
    };

    MetabaseClient::new(conn.url, conn.machine, conn.credentials, &conn.transport)
        .map_err(|e| CliError::from(CoreError::from(e)))
}
