//! Fleet graph CLI
//!
//! Builds the fleet knowledge graph from a project root and either prints a
//! summary report or exports the graph as JSON for downstream consumers
//! (the RAG sidecar reads the exported `{nodes, edges}` shape).

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use fleetgraph_build::{build_fleet_graph, GraphConfig};
use fleetgraph_model::{FleetGraph, NodeType, Relation};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fleetgraph")]
#[command(author, version, about = "Fleet knowledge-graph aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BuildArgs {
    /// Project root the artifact paths are resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Namespace prefix for node ids (blank keeps the default).
    #[arg(long)]
    namespace: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print a summary report.
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Build the graph and write it as JSON (stdout when no output file).
    Export {
        #[command(flatten)]
        args: BuildArgs,

        /// Output file.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build { args } => {
            let graph = build(&args);
            print_report(&graph);
        }
        Commands::Export { args, out, compact } => {
            let graph = build(&args);
            let json = if compact {
                serde_json::to_string(&graph)?
            } else {
                serde_json::to_string_pretty(&graph)?
            };
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!(
                        "{} {} nodes, {} edges -> {}",
                        "exported".green().bold(),
                        graph.node_count(),
                        graph.edge_count(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn build(args: &BuildArgs) -> FleetGraph {
    let mut config = GraphConfig::with_root(&args.root);
    if let Some(namespace) = &args.namespace {
        config = config.namespace(namespace.clone());
    }
    build_fleet_graph(&config)
}

fn print_report(graph: &FleetGraph) {
    println!("{}", "Fleet graph".bold());
    println!("  namespace:  {}", graph.metadata.namespace.cyan());
    println!("  root:       {}", graph.metadata.root_source);
    println!("  generated:  {}", graph.metadata.generated_at);
    println!();

    println!("{}", "Nodes".bold());
    for node_type in NodeType::all() {
        let count = graph.nodes_of_type(node_type).len();
        if count > 0 {
            println!("  {:<16} {}", node_type.to_string(), count);
        }
    }

    println!("{}", "Edges".bold());
    for relation in Relation::all() {
        let count = graph
            .edges
            .iter()
            .filter(|e| e.relation == relation)
            .count();
        if count > 0 {
            println!("  {:<16} {}", relation.to_string(), count);
        }
    }

    if let Some(root) = graph.nodes_of_type(NodeType::FleetInventory).first() {
        println!();
        println!("{}", "Inventory".bold());
        println!("  source:     {}", root.source);
        for (key, value) in &root.payload {
            println!("  {key:<10} {value}");
        }
    }
}
