//! Intake terminal entry point.
//!
//! Binary name: `intake`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the interview loop or one of the utility commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,intake_core=debug,intake_infra=debug",
        _ => "trace",
    };

    if let Err(e) = intake_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    intake_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // Shell completions don't need configuration
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "intake", &mut std::io::stdout());
        }

        Commands::Interview {
            provider,
            model,
            config,
        } => {
            let state = AppState::init(config.as_deref(), provider, model).await?;
            cli::interview::run_interview(&state, cli.quiet).await?;
        }

        Commands::Config { json, config } => {
            let state = AppState::init(config.as_deref(), None, None).await?;
            cli::config::show_config(&state, json)?;
        }
    }

    Ok(())
}
