use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_planner::domain::{ScheduleTime, StopId};
use transit_planner::graph::ScheduleGraph;
use transit_planner::ingest::load_csv;
use transit_planner::planner::{Engine, Itinerary, Objective, Planner, Query, SearchConfig};
use transit_planner::report::TripSummary;

/// Where to read the timetable and what to ask of it.
struct Settings {
    csv: PathBuf,
    from: String,
    to: String,
    at: String,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            csv: env_or("PLANNER_CSV", "connection_graph.csv").into(),
            from: env_or("PLANNER_FROM", "Prusa"),
            to: env_or("PLANNER_TO", "Kwiska"),
            at: env_or("PLANNER_AT", "17:00:00"),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_itinerary(title: &str, itinerary: &Itinerary, reference: ScheduleTime, elapsed_ms: f64) {
    println!("=== {title} ===");
    for edge in &itinerary.edges {
        println!("  {edge}");
    }
    println!("Execution time: {elapsed_ms:.3} ms");
    println!("Line changes: {}", itinerary.change_count());
    println!("Cost: {}", itinerary.cost);
    println!("{}", TripSummary::from_path(&itinerary.edges, reference));
    println!();
}

/// Run all three searches, returning how many failed.
fn run_tasks(graph: &ScheduleGraph, settings: &Settings) -> Result<usize, Box<dyn Error>> {
    let reference = ScheduleTime::parse(&settings.at)?;
    let source = StopId::parse(&settings.from)?;
    let destination = StopId::parse(&settings.to)?;

    let config = SearchConfig::default();
    let planner = Planner::new(graph, &config);

    let tasks = [
        (Engine::Dijkstra, Objective::Time),
        (Engine::AStar, Objective::Time),
        (Engine::AStar, Objective::Transfers),
    ];

    let mut failures = 0;
    for (engine, objective) in tasks {
        let title = match engine {
            Engine::Dijkstra => "Dijkstra".to_string(),
            Engine::AStar => format!("A* ({}: {objective})", objective.code()),
        };
        let query = Query::new(source.clone(), destination.clone(), reference, objective);

        let started = Instant::now();
        let result = planner.plan(&query, engine);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(itinerary) => print_itinerary(&title, &itinerary, reference, elapsed_ms),
            Err(e) => {
                eprintln!("{title}: {e}");
                failures += 1;
            }
        }
    }

    Ok(failures)
}

fn run(settings: &Settings) -> Result<usize, Box<dyn Error>> {
    let reference = ScheduleTime::parse(&settings.at)?;

    let records = load_csv(&settings.csv)?;
    let started = Instant::now();
    let graph = ScheduleGraph::from_records(&records, reference)?;
    info!(
        stops = graph.stop_count(),
        edges = graph.edge_count(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "schedule graph built"
    );

    run_tasks(&graph, settings)
}

fn main() -> ExitCode {
    init_logger();

    let settings = Settings::from_env();
    match run(&settings) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
