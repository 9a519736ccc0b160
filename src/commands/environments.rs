//! Environments command: list configured tenants

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use chartgraph::config::Config;
use chartgraph::infrastructure::ConfiguredEnvironments;

use crate::ui;

pub fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let store = ConfiguredEnvironments::new(config.environments);

    ui::print_header("Environments");

    if store.all().is_empty() {
        ui::print_warning("No environments configured");
        return Ok(());
    }

    for env in store.all() {
        println!(
            "{}  {} {}",
            env.id.bold(),
            format!("namespace={}", env.namespace).cyan(),
            env.context
                .as_deref()
                .map(|c| format!("context={}", c))
                .unwrap_or_default()
                .dimmed()
        );
        if !env.name.is_empty() && env.name != env.id {
            println!("    {}", env.name);
        }
        if !env.group.is_empty() {
            println!("    group: {}", env.group);
        }
    }

    Ok(())
}
