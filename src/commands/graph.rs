//! Graph command: dependency discovery plus deployment status

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

use chartgraph::config::Config;
use chartgraph::domain::Graph;
use chartgraph::infrastructure::{CatalogFile, ConfiguredEnvironments, KubeInspector};
use chartgraph::services::{AnnotationSummary, Analyser, Annotator};

use crate::cli::OutputFormat;
use crate::ui;

pub async fn execute(
    config_path: &Path,
    chart: String,
    tag: String,
    environment: Option<String>,
    skip_status: bool,
    output: OutputFormat,
) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let catalog_path = config.catalog_path();
    let catalog = CatalogFile::load(&catalog_path)
        .with_context(|| format!("Failed to load chart catalog {}", catalog_path.display()))?;

    let analyser = Analyser::new(catalog, config.analysis.clone());
    let mut graph = analyser
        .analyse(&chart, &tag)
        .await
        .with_context(|| format!("Failed to analyse {}:{}", chart, tag))?;

    let summary = if skip_status {
        None
    } else {
        let Some(environment) = environment else {
            bail!("--environment is required unless --skip-status is set");
        };

        let environments = ConfiguredEnvironments::new(config.environments.clone());
        let inspector = KubeInspector::new(config.kubernetes.instance_label.clone());
        let annotator = Annotator::new(environments, inspector);

        let summary = annotator
            .annotate(&mut graph, &environment)
            .await
            .with_context(|| format!("Failed to check deployment status in {}", environment))?;
        Some((environment, summary))
    };

    match output {
        OutputFormat::Json => print_json(&graph)?,
        OutputFormat::Text => print_text(&graph, &chart, &tag, summary.as_ref()),
    }

    info!("Graph for {}:{} complete", chart, tag);
    Ok(())
}

fn print_json(graph: &Graph) -> Result<()> {
    let json = serde_json::to_string_pretty(graph)?;
    println!("{}", json);
    Ok(())
}

fn print_text(
    graph: &Graph,
    chart: &str,
    tag: &str,
    summary: Option<&(String, AnnotationSummary)>,
) {
    ui::print_header(&format!("Dependencies of {}:{}", chart, tag));
    ui::print_graph_tree(graph, summary.is_some());
    println!();

    ui::print_info(&format!(
        "{} charts, {} links",
        graph.nodes.len(),
        graph.links.len()
    ));

    let Some((environment, summary)) = summary else {
        return;
    };

    if summary.undeployed == 0 && summary.version_mismatch == 0 {
        ui::print_success(&format!(
            "All {} charts deployed on the expected version in {}",
            summary.healthy, environment
        ));
        return;
    }

    if summary.version_mismatch > 0 {
        ui::print_warning(&format!(
            "{} chart(s) running a different version in {}",
            summary.version_mismatch, environment
        ));
    }
    if summary.undeployed > 0 {
        ui::print_warning(&format!(
            "{} chart(s) not deployed in {}",
            summary.undeployed, environment
        ));
    }
}
