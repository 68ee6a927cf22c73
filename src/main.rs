use pathfinder_rust::config::{Cli, Config};
use pathfinder_rust::output::write_results;
use pathfinder_rust::render::render_path;
use pathfinder_rust::solver::{BatchSolver, Problem};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let from_file = cli.config.is_some();
    let config = (if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    })
    .override_from_command_line(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level)
                .with_context(|| format!("invalid log level: {}", config.log_level))?,
        )
        .init();
    if !from_file {
        info!("No config file specified, using default config");
    }

    config.validate()?;

    let problem = Problem::load(&config)?;
    let mut solver = BatchSolver::new(&problem.map);
    let mut results = Vec::with_capacity(problem.queries.len());

    for query in &problem.queries {
        let result = solver.solve(query);
        if config.render {
            println!("\n{}\n", render_path(&problem.map, query, result.path.as_ref()));
        }
        results.push(result);
    }

    let solved = results.iter().filter(|result| result.path.is_some()).count();
    info!("Solved {solved} of {} queries", results.len());
    solver.stats().print();

    if let Some(output_path) = &config.output_path {
        write_results(output_path, &results)?;
        info!("Wrote results to {output_path}");
    }

    Ok(())
}
