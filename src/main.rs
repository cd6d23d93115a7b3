//! analytics-config — inspect a resolved client configuration.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Init logger
//!   4. Load config file + env overrides
//!   5. Validate and resolve
//!   6. Print the resolved summary as JSON

use analytics_config::bootstrap::logger;
use analytics_config::config;
use analytics_config::error::AppError;

use tracing::info;

struct CliArgs {
    verbosity: u8,
    config_path: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    logger::init(args.verbosity)?;

    let raw = config::load(args.config_path.as_deref())?;
    let cfg = config::build(raw)?;

    info!(
        endpoint = %cfg.endpoint,
        flush_interval_ms = cfg.summary().flush_interval_ms,
        batch_size = cfg.batch_size,
        verbose = cfg.verbose,
        "config resolved"
    );
    cfg.log_info("verbose logging enabled");

    let summary = serde_json::to_string_pretty(&cfg.summary())
        .map_err(|e| AppError::Config(format!("cannot render summary: {e}")))?;
    println!("{summary}");

    Ok(())
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: analytics-config [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                println!();
                println!("Environment:");
                println!("  {}         Override the ingestion endpoint", config::ENDPOINT_ENV);
                println!("  {}          Enable verbose client logging", config::VERBOSE_ENV);
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a => {
                if let Some(count) = logger::verbose_flag_count(a) {
                    verbosity = verbosity.saturating_add(count);
                }
            }
        }
    }

    CliArgs {
        verbosity,
        config_path,
    }
}
