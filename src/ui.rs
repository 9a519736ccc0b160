// Terminal UI utilities

use colored::Colorize;
use std::collections::HashSet;

use chartgraph::domain::graph::{HEALTHY_COLOR, SYMBOL_TRIANGLE};
use chartgraph::domain::{Graph, ImageTag, Node};

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!("{}", format!("║  {:<58}║", title).bright_blue());
    println!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).bright_cyan());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).bright_yellow());
}

fn status_label(node: &Node, with_status: bool) -> String {
    if !with_status {
        return node.id.clone();
    }
    if node.is_undeployed() {
        format!("{} {}", node.id, "(not deployed)".red())
    } else if node.symbol_type == SYMBOL_TRIANGLE {
        format!("{} {}", node.id.yellow(), "(version mismatch)".yellow())
    } else if node.color == HEALTHY_COLOR {
        format!("{} {}", node.id.green(), "(deployed)".green())
    } else {
        node.id.clone()
    }
}

/// Print the graph as an indented tree starting from the first node
pub fn print_graph_tree(graph: &Graph, with_status: bool) {
    let Some(root) = graph.nodes.first() else {
        return;
    };
    let mut seen = HashSet::new();
    print_subtree(graph, &root.id, "", true, true, with_status, &mut seen);
}

fn print_subtree<'a>(
    graph: &'a Graph,
    id: &'a str,
    prefix: &str,
    last: bool,
    root: bool,
    with_status: bool,
    seen: &mut HashSet<&'a str>,
) {
    let label = graph
        .node(id)
        .map(|n| status_label(n, with_status))
        .unwrap_or_else(|| id.to_string());

    let child_prefix = if root {
        println!("{}", label.bold());
        String::new()
    } else {
        let branch = if last { "└── " } else { "├── " };
        println!("{}{}{}", prefix, branch, label);
        format!("{}{}", prefix, if last { "    " } else { "│   " })
    };

    if !seen.insert(id) {
        return;
    }

    let children: Vec<&str> = graph.children(id).collect();
    for (i, &child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        print_subtree(graph, child, &child_prefix, is_last, false, with_status, seen);
    }
}

/// Print tags as an aligned table
pub fn print_tags(tags: &[ImageTag]) {
    let width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0).max(3);
    println!(
        "{}  {}",
        format!("{:<width$}", "TAG", width = width).bold(),
        "LAST UPDATED".bold()
    );
    for tag in tags {
        let updated = tag
            .last_updated
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<width$}  {}", tag.name, updated, width = width);
    }
}
