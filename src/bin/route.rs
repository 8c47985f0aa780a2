use std::time::Duration;

use clap::Parser;
use log::info;
use retrosynth::adapter::json::JsonAdapter;
use retrosynth::{init_logging, Config, Engine};

/// Search for buyable synthesis routes to a target molecule.
#[derive(Debug, Parser)]
#[command(name = "route", about = "retrosynthetic route search")]
struct Args {
    /// Target molecule, as a SMILES string.
    target: String,

    /// Path to a JSON fixture describing the chemistry adapter's answers
    /// (templates, outcomes, fast-filter scores, prices). See
    /// `adapter::json` for the expected shape.
    #[arg(long)]
    adapter_file: std::path::PathBuf,

    #[arg(long, default_value_t = 100)]
    template_max_count: usize,

    #[arg(long, default_value_t = 0.995)]
    template_max_cum_prob: f64,

    #[arg(long, default_value_t = 0.75)]
    fast_filter_threshold: f64,

    #[arg(long, default_value_t = 10)]
    max_branching: usize,

    #[arg(long, default_value_t = 3)]
    max_depth: usize,

    #[arg(long, default_value_t = 1.0)]
    exploration_weight: f64,

    #[arg(long, default_value_t = 10.0)]
    max_ppg: f64,

    #[arg(long, default_value_t = 20)]
    expansion_time: u64,

    #[arg(long)]
    max_chemicals: Option<usize>,

    #[arg(long)]
    max_reactions: Option<usize>,

    /// Emission format for the returned paths: "json" or "graph".
    #[arg(long, default_value = "json")]
    format: String,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            template_max_count: args.template_max_count,
            template_max_cum_prob: args.template_max_cum_prob,
            fast_filter_threshold: args.fast_filter_threshold,
            max_branching: args.max_branching,
            max_depth: args.max_depth,
            exploration_weight: args.exploration_weight,
            max_ppg: args.max_ppg,
            expansion_time: Duration::from_secs(args.expansion_time),
            max_chemicals: args.max_chemicals,
            max_reactions: args.max_reactions,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = Args::parse();
    let config = Config::from(&args);

    info!("searching for routes to {:?}", args.target);
    let adapter = JsonAdapter::load(&args.adapter_file)?;
    let mut engine = Engine::new(adapter, config);
    engine.build_tree(&args.target)?;

    println!("{}", engine.print_stats());
    let paths = engine.get_buyable_paths(&args.format)?;
    println!("{}", serde_json::to_string_pretty(&paths)?);

    Ok(())
}
