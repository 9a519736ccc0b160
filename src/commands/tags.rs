//! Tags command: list image tags newest first

use anyhow::{Context, Result};
use std::path::Path;

use chartgraph::config::Config;
use chartgraph::infrastructure::RegistryClient;
use chartgraph::services::{TagDateCache, TagService};

use crate::cli::OutputFormat;
use crate::ui;

pub async fn execute(
    config_path: &Path,
    config_explicit: bool,
    image: String,
    limit: Option<usize>,
    output: OutputFormat,
) -> Result<()> {
    let registry_config = Config::registry_or_default(config_path, config_explicit)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let client = RegistryClient::new(&registry_config).context("Failed to create HTTP client")?;
    let cache = TagDateCache::new();
    let service = TagService::new(client, &cache);

    let mut tags = service
        .list_tags(&image)
        .await
        .with_context(|| format!("Failed to list tags for {}", image))?;

    if let Some(limit) = limit {
        tags.truncate(limit);
    }

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tags)?),
        OutputFormat::Text => {
            ui::print_header(&format!("Tags of {}", image));
            if tags.is_empty() {
                ui::print_warning("No tags found");
            } else {
                ui::print_tags(&tags);
            }
        }
    }

    Ok(())
}
