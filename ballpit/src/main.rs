use ballpit::{bench_tick, load_config, run_2d, Scenario, SimulationConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "ballpit.yaml")]
    file_name: String,

    /// Override the number of bodies
    #[arg(long)]
    count: Option<usize>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Time the physics step instead of opening a window
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<SimulationConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&args.file_name);
    let mut cfg = load_config(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if let Some(count) = args.count {
        cfg.count = count;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = load_scenario_from_yaml(&args)?;

    if args.bench {
        bench_tick(&cfg)?;
        return Ok(());
    }

    let scenario = Scenario::build_scenario(&cfg)?;
    run_2d(scenario, &cfg.window, &cfg.render)?;

    Ok(())
}
