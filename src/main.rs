use quadsim::{bench_gravity, bench_leapfrog, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "galaxy.yaml")]
    file_name: String,

    /// Run the timing harnesses instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_leapfrog();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let steps = (scenario.parameters.t_end / scenario.parameters.dt).ceil() as u64;
    info!(
        "running {} bodies for {} steps (dt = {})",
        scenario.body_count(),
        steps,
        scenario.parameters.dt
    );

    for _ in 0..steps {
        scenario.advance_step()?;
        if scenario.frame() % 100 == 0 {
            info!("frame {}", scenario.frame());
        }
    }

    let (px, py) = scenario.system.positions();
    if let (Some(x), Some(y)) = (px.first(), py.first()) {
        info!(
            "done at frame {}; body 0 at ({x:.3}, {y:.3})",
            scenario.frame()
        );
    } else {
        info!("done at frame {}", scenario.frame());
    }

    Ok(())
}
