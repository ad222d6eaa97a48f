//! Plan landing zones and delivery routes for a terrain scenario.

use anyhow::{bail, Context, Result};
use clap::Parser;
use relief_cli::{generate_scenario, Config, FleetOverrides, PlanReport, Scenario};
use relief_core::{plan_deliveries, GridCoord};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file (labels, elevations, targets, optional depot/fleet)
    #[arg(long, conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Generate a random ROWSxCOLS scenario instead of reading one
    #[arg(long, value_parser = parse_dims)]
    random: Option<(usize, usize)>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of people to place with --random
    #[arg(long, default_value_t = 1)]
    people: usize,

    /// Depot as ROW,COL (overrides the scenario)
    #[arg(long, value_parser = parse_coord)]
    depot: Option<GridCoord>,

    /// Cruise speed in cells per second
    #[arg(long)]
    speed: Option<f64>,

    /// Takeoff duration in seconds
    #[arg(long)]
    takeoff: Option<f64>,

    /// Landing duration in seconds
    #[arg(long)]
    landing: Option<f64>,

    /// Maximum flight time in seconds
    #[arg(long)]
    max_flight: Option<f64>,

    /// Targets per outbound trip
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of vehicles
    #[arg(long)]
    vehicles: Option<usize>,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Debug logging for the planner
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn fleet_overrides(&self) -> FleetOverrides {
        FleetOverrides {
            speed: self.speed,
            takeoff_time_s: self.takeoff,
            landing_time_s: self.landing,
            max_flight_time_s: self.max_flight,
            capacity: self.capacity,
            vehicle_count: self.vehicles,
        }
    }
}

fn parse_dims(value: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got `{value}`"))?;
    let rows: usize = rows
        .trim()
        .parse()
        .map_err(|e| format!("bad row count: {e}"))?;
    let cols: usize = cols
        .trim()
        .parse()
        .map_err(|e| format!("bad column count: {e}"))?;
    if rows == 0 || cols == 0 {
        return Err("grid dimensions must be positive".to_string());
    }
    Ok((rows, cols))
}

fn parse_coord(value: &str) -> Result<GridCoord, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{value}`"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column: {e}"))?;
    Ok(GridCoord::new(row, col))
}

fn init_tracing(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("relief_cli={level}").parse()?)
        .add_directive(format!("relief_core={level}").parse()?);

    let json = config.log_json;
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    init_tracing(&config, args.verbose)?;

    let scenario = match (&args.scenario, args.random) {
        (Some(path), _) => Scenario::load(path)?,
        (None, Some((rows, cols))) => {
            tracing::info!(
                rows,
                cols,
                people = args.people,
                seed = args.seed,
                "generating scenario"
            );
            generate_scenario(rows, cols, args.people, args.seed)
        }
        (None, None) => bail!("either --scenario or --random is required"),
    };

    let mut fleet = config.fleet.clone();
    if let Some(overrides) = &scenario.fleet {
        overrides.apply(&mut fleet);
    }
    args.fleet_overrides().apply(&mut fleet);

    let grid = scenario.grid().context("invalid terrain grid")?;
    let depot = args
        .depot
        .or(scenario.depot)
        .unwrap_or(GridCoord::new(0, 0));

    let plan = plan_deliveries(&grid, &scenario.targets, depot, &fleet)
        .context("planning failed")?;

    tracing::info!(
        routes = plan.routes.routes.len(),
        served = plan.routes.served_count(),
        unserved = plan.routes.unserved.len(),
        no_landing_zone = plan.no_landing_zone.len(),
        "plan ready"
    );

    let report = PlanReport::new(&grid, depot, fleet, plan);
    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
