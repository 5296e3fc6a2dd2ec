use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use routeforge_optimizer::{
    json::types::{FromProblem, JsonOptimizationRequest, JsonSolution},
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{solution::solution::Solution, solver::OptimizationResult},
};
use tracing::{debug, info};

use crate::parsers;

#[derive(Args)]
pub struct OptimizeArgs {
    /// JSON optimization request
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the JSON solution, printed to stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, env = "ROUTEFORGE_SEED")]
    seed: Option<u64>,

    #[arg(short, long)]
    generations: Option<usize>,

    #[arg(short, long)]
    population_size: Option<usize>,

    /// Wall-clock budget (e.g., "30s", "5m", "PT1M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,
}

impl OptimizeArgs {
    fn apply_overrides(&self, request: &mut JsonOptimizationRequest) {
        let params = request.params.get_or_insert_with(Default::default);

        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(population_size) = self.population_size {
            params.population_size = population_size;
            params.elite_size = params.elite_size.min(population_size);
        }
        if let Some(timeout) = self.timeout {
            params.max_duration = Some(timeout);
        }
    }
}

pub fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing {:?}", args.input);

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read {:?}", args.input))?;
    let mut request: JsonOptimizationRequest = serde_json::from_str(&content)
        .with_context(|| format!("Invalid optimization request {:?}", args.input))?;
    args.apply_overrides(&mut request);

    let mut solver = request.build_solver()?;
    solver.on_best_solution(|solution| {
        debug!(
            fitness = solution.fitness(),
            violations = solution.constraint_violations(),
            "Improved solution"
        );
    });

    let result = solver.solve()?;
    print_summary(solver.problem(), &result);

    let json = serde_json::to_string_pretty(&JsonSolution::from_problem(
        &result.best,
        solver.problem(),
    ))?;

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, json)?;
            info!("Solution written to {:?}", output);
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn print_summary(problem: &VehicleRoutingProblem, result: &OptimizationResult) {
    let best: &Solution = &result.best;

    let mut table = Table::new();
    table.set_header(vec![
        "Vehicle",
        "Driver",
        "Stops",
        "Distance (km)",
        "Duration",
        "Utilization",
        "On time",
    ]);

    for route in best.routes() {
        let vehicle = route.vehicle(problem);
        table.add_row(vec![
            vehicle.external_id().to_owned(),
            vehicle.driver_id().unwrap_or("-").to_owned(),
            route.len().to_string(),
            format!("{:.2}", route.total_distance_km()),
            format!("{:#}", route.total_duration()),
            format!("{:.0}%", route.capacity_utilization() * 100.0),
            format!("{}/{}", route.on_time_deliveries(), route.len()),
        ]);
    }

    eprintln!("{table}");
    info!(
        fitness = best.fitness(),
        violations = best.constraint_violations(),
        unassigned = best.unassigned().len(),
        generations = result.statistics.generations(),
        reason = ?result.statistics.termination_reason(),
        elapsed = %format!("{:#}", result.statistics.elapsed()),
        "Optimization finished"
    );
}
