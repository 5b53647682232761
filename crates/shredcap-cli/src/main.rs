//! shredcap CLI: report shredder throughput, slots needed, and on-demand cost.

use clap::Parser;
use shredcap_core::config::{CapacityConfig, PricingConstants};
use shredcap_exec::Fetcher;
use shredcap_io::load_snapshot;
use shredcap_planner::{parse_target_manifest, CapacityPlanner, CapacityReport};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shredcap")]
#[command(about = "Estimate shredder throughput, reserved slots needed, and on-demand cost", long_about = None)]
struct Cli {
    /// Number of reserved slots currently available; default 1000
    #[arg(short = 's', long)]
    slots: Option<u32>,

    /// Table used to store shredder state (job ids); default 'relud-17123.test.shredder_state'
    #[arg(short = 'S', long = "state-table", visible_alias = "state_table")]
    state_table: Option<String>,

    /// Number of days shredder has to run; default 28
    #[arg(short = 'd', long)]
    days: Option<u32>,

    /// Number of threads to use when listing jobs and tables; default 20
    #[arg(short = 'P', long)]
    parallelism: Option<usize>,

    /// JSON snapshot of the warehouse (state tables, jobs, tables)
    #[arg(short = 'w', long)]
    warehouse: PathBuf,

    /// YAML manifest of delete targets
    #[arg(short = 't', long)]
    targets: PathBuf,

    /// Only print projections, not throughput and efficiency
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Log filter when RUST_LOG is unset (e.g. `info`, `shredcap_planner=debug`)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr; stdout carries only report lines.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CapacityConfig::from_env();
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    let state_table = config.state_table_ref()?;

    let manifest = fs::read_to_string(&cli.targets).map_err(|source| shredcap_io::Error::Io {
        path: cli.targets.display().to_string(),
        source,
    })?;
    let targets = parse_target_manifest(&manifest)?;
    let warehouse = load_snapshot(&cli.warehouse)?;
    info!(
        version = shredcap_core::VERSION,
        slots = config.reserved_units,
        days = config.window_days,
        targets = targets.targets.len(),
        "loaded configuration"
    );

    let fetcher = Fetcher::new(Arc::new(warehouse), config.parallelism);
    let snapshot = fetcher.collect_blocking(&state_table, &targets.targets)?;

    let pricing = PricingConstants::default();
    let planner = CapacityPlanner::new(&config, &pricing);
    let report = CapacityReport::build(&planner, &snapshot.jobs, &snapshot.tables, &targets)?;

    for line in report.lines(!cli.quiet) {
        println!("{line}");
    }
    Ok(())
}

fn apply_cli_overrides(cfg: &mut CapacityConfig, cli: &Cli) {
    if let Some(slots) = cli.slots {
        cfg.reserved_units = slots;
    }
    if let Some(table) = &cli.state_table {
        cfg.state_table = table.clone();
    }
    if let Some(days) = cli.days {
        cfg.window_days = days;
    }
    if let Some(parallelism) = cli.parallelism {
        cfg.parallelism = parallelism;
    }
}
