use gravsim::{ScenarioConfig, Scenario, ViewSettings};
use gravsim::run_2d;
use gravsim::{bench_gravity, bench_rk4};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file inside `scenarios/`
    #[arg(short, default_value = "solar.yaml")]
    file_name: String,

    /// Run to `parameters.t_end` without opening a window
    #[arg(long)]
    headless: bool,

    /// Time force evaluation and integrator steps, then exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity();
        bench_rk4();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg)?;

    if args.headless {
        let t_end = scenario.parameters.t_end;
        let energy = scenario.run_until(t_end)?;
        log::info!(
            "finished at t = {:.3}: E0 = {:.6e}, E = {:.6e}, max drift {:.3e}",
            scenario.system.t,
            energy.initial,
            energy.current,
            energy.max_drift,
        );
    } else {
        run_2d(scenario, ViewSettings::from_config(&scenario_cfg));
    }

    Ok(())
}
