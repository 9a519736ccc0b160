use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use chartgraph::config::{Config, CONFIG_ENV_VAR};
use cli::{Cli, Commands};
use commands::{environments, graph, tags};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "warn".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref());
    let config_explicit = cli.config.is_some() || std::env::var_os(CONFIG_ENV_VAR).is_some();

    match cli.command {
        Commands::Graph {
            chart,
            tag,
            environment,
            skip_status,
            output,
        } => {
            graph::execute(&config_path, chart, tag, environment, skip_status, output).await?;
        }
        Commands::Tags {
            image,
            limit,
            output,
        } => {
            tags::execute(&config_path, config_explicit, image, limit, output).await?;
        }
        Commands::Environments => {
            environments::execute(&config_path)?;
        }
    }

    Ok(())
}
