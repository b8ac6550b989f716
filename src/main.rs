//! Solar budget simulator entry point: CLI wiring and household loading.

use std::process;

use solar_budget::cli::{self, CliOptions};
use solar_budget::config::{self, RunConfig};
use solar_budget::error::Error;
use solar_budget::household::Household;
use solar_budget::io::{codec, export::export_csv};
use solar_budget::logging;
use solar_budget::sim::kpi::RunSummary;
use solar_budget::sim::types::{HourResult, SimConfig};

fn load_run_config(opts: &CliOptions) -> RunConfig {
    let mut run_config = match opts.config {
        Some(ref path) => RunConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => RunConfig::default(),
    };

    if let Some(days) = opts.days {
        run_config.simulation.days = days;
    }
    if let Some(order) = opts.priority_order {
        run_config.simulation.priority_order = order;
    }

    let errors = run_config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    run_config
}

fn load_household(opts: &CliOptions) -> Household {
    if let Some(ref path) = opts.household {
        return codec::load(path).map_err(Error::from).unwrap_or_else(|e| fail(&e));
    }
    let name = opts.preset.as_deref().unwrap_or(cli::DEFAULT_PRESET);
    config::household_preset(name).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    })
}

/// Saves the household if requested, then simulates it.
fn run(
    opts: &CliOptions,
    household: &Household,
    sim_config: &SimConfig,
) -> Result<Vec<HourResult>, Error> {
    if let Some(ref path) = opts.save {
        codec::save(path, household)?;
        eprintln!("Household saved to {}", path.display());
    }
    Ok(household.run_simulation_with(sim_config)?)
}

fn fail(e: &Error) -> ! {
    match e {
        Error::Precondition(_) => eprintln!("error: cannot simulate: {e}"),
        _ => eprintln!("error: {e}"),
    }
    process::exit(1);
}

fn main() {
    let opts = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    let run_config = load_run_config(&opts);
    logging::init(&run_config.logging.level);

    let household = load_household(&opts);

    let sim_config = run_config.sim_config();
    let results = run(&opts, &household, &sim_config).unwrap_or_else(|e| fail(&e));

    for r in &results {
        println!("{r}");
    }

    let summary = RunSummary::from_results(&results, &household);
    println!("\n{summary}");

    if let Some(ref path) = opts.telemetry_out {
        if let Err(e) = export_csv(&results, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }

    if opts.serve {
        serve(household, sim_config, opts.port);
    }
}

#[cfg(feature = "api")]
fn serve(household: Household, sim_config: SimConfig, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(solar_budget::api::AppState::new(household, sim_config));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(solar_budget::api::serve(state, addr)) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_household: Household, _sim_config: SimConfig, _port: u16) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
