//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::sim::allocator::PriorityOrder;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub household: Option<PathBuf>,
    pub preset: Option<String>,
    pub config: Option<PathBuf>,
    pub days: Option<usize>,
    pub priority_order: Option<PriorityOrder>,
    pub telemetry_out: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub serve: bool,
    pub port: u16,
}

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;

/// Preset used when neither `--household` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "cabin";

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        port: DEFAULT_PORT,
        ..CliOptions::default()
    };

    while i < args.len() {
        match args[i].as_str() {
            "--household" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --household (expected a JSON file path)",
                )?;
                if opts.household.replace(PathBuf::from(path)).is_some() {
                    return Err("--household provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                opts.config = Some(PathBuf::from(path));
            }
            "--days" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --days (expected a count)")?;
                let days = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--days value \"{raw}\" is not a valid count"))?;
                opts.days = Some(days);
            }
            "--priority-order" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --priority-order (expected rank, label, or declaration)",
                )?;
                opts.priority_order = Some(raw.parse()?);
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --telemetry-out (expected a file path)",
                )?;
                if opts.telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--save" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --save (expected a JSON file path)")?;
                opts.save = Some(PathBuf::from(path));
            }
            "--serve" => {
                opts.serve = true;
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.household.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--household` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.household.is_none() && opts.preset.is_none() {
        opts.preset = Some(DEFAULT_PRESET.to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-budget: off-grid household solar budget simulator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  solar-budget [--household <path> | --preset <name>] [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --household <path>       Load household configuration from JSON");
    eprintln!("  --preset <name>          Use a built-in household (cabin, workshop)");
    eprintln!("  --config <path>          Load run settings from TOML");
    eprintln!("  --days <n>               Override the number of simulated days");
    eprintln!("  --priority-order <name>  rank, label, or declaration");
    eprintln!("  --telemetry-out <path>   Export hour results to CSV");
    eprintln!("  --save <path>            Save the household configuration as JSON");
    eprintln!("  --serve                  Start the REST API (requires the `api` feature)");
    eprintln!("  --port <u16>             API port (default: {DEFAULT_PORT})");
    eprintln!("  --help                   Show this help message");
}
