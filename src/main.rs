use std::path::PathBuf;

use clap::Parser;
use hexscale::{Config, RewardGraph};
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Compute hexagon density reward scales for a node file", long_about = None)]
struct Args {
    /// Node file with a header row containing at least name, lat and lng
    nodes: PathBuf,

    /// Resolution profile configuration (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON document instead of a line per node
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("hexscale=info"))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_path(path)?
        }
        None => Config::default(),
    };

    let graph = RewardGraph::from_csv(&args.nodes, config)?;
    info!("Loaded {} nodes from {}", graph.len(), args.nodes.display());

    let scales = graph.compute_reward_scales()?;

    if args.json {
        let rows: Vec<serde_json::Value> = graph
            .nodes()
            .map(|node| {
                serde_json::json!({
                    "id": node.id,
                    "name": node.name,
                    "current": node.reward_scale_correct,
                    "computed": scales.get(&node.id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for node in graph.nodes() {
        let current = node
            .reward_scale_correct
            .map(|scale| scale.to_string())
            .unwrap_or_else(|| "None".to_string());
        let computed = scales.get(&node.id).copied().unwrap_or_default();
        println!(
            "Current RW Scale: {}, Computed RW Scale: {}, {}",
            current, computed, node.name
        );
    }

    Ok(())
}
