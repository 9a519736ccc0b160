//! CLI definitions for chartgraph
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "chartgraph",
    version,
    about = "Helm chart dependency graph with live deployment status",
    long_about = "Walks the declared dependencies of a Helm chart release and reports,\nfor every chart in the graph, whether it is deployed in a tenant environment\nand running the expected version."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to chartgraph.yaml
    #[arg(long, global = true, env = "CHARTGRAPH_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dependency graph of a chart and check its deployment status
    Graph {
        /// Root chart name (e.g. stable/api)
        #[arg(long, required = true)]
        chart: String,

        /// Root chart version tag
        #[arg(long, required = true)]
        tag: String,

        /// Environment to check deployment status in
        #[arg(long, short = 'e', required_unless_present = "skip_status")]
        environment: Option<String>,

        /// Only discover dependencies, do not query the cluster
        #[arg(long)]
        skip_status: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the tags of a Docker image, newest first
    Tags {
        /// Image reference (e.g. redis, bitnami/redis)
        #[arg(long, required = true)]
        image: String,

        /// Maximum number of tags to show
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List configured environments
    Environments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_requires_environment_unless_skipping_status() {
        let parsed = Cli::try_parse_from(["chartgraph", "graph", "--chart", "api", "--tag", "1.0"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "chartgraph",
            "graph",
            "--chart",
            "api",
            "--tag",
            "1.0",
            "--skip-status",
        ])
        .unwrap();
        assert!(matches!(
            parsed.command,
            Commands::Graph { skip_status: true, environment: None, .. }
        ));
    }

    #[test]
    fn test_graph_json_output() {
        let parsed = Cli::try_parse_from([
            "chartgraph", "graph", "--chart", "api", "--tag", "1.0", "-e", "dev", "--output", "json",
        ])
        .unwrap();
        match parsed.command {
            Commands::Graph {
                environment,
                output,
                ..
            } => {
                assert_eq!(environment.as_deref(), Some("dev"));
                assert_eq!(output, OutputFormat::Json);
            }
            _ => panic!("expected graph command"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
