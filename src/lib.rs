pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod route;

pub use config::Config;
pub use engine::Engine;
pub use error::{Result, RouteError};

/// dimensional analysis types
pub type Smiles = String;
pub type TemplateIndex = u32;
pub type Probability = f64;
pub type Reward = f64;
pub type Price = f64;

// UCB tie-breaking constant: untried templates are scored as if slightly
// worse than the best existing reaction child.
pub(crate) const UNTRIED_TEMPLATE_PENALTY: Reward = 0.1;

/// initialize logging: a term sink plus a per-run file sink under `logs/`.
pub fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(|e| anyhow::anyhow!(e))
}
