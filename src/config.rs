use anyhow::{anyhow, bail, Context};
use clap::Parser;
use serde::Deserialize;

use crate::common::Location;

#[derive(Parser, Debug)]
#[command(
    name = "Rust Pathfinder",
    about = "Minimum-cost 8-directional paths on obstacle grids.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to a MovingAI map file")]
    pub map_path: Option<String>,

    #[arg(long, help = "Path to a text grid of 1/0/S/E characters")]
    pub grid_path: Option<String>,

    #[arg(
        long,
        help = "Generate a random grid of COLS,ROWS",
        use_value_delimiter = true
    )]
    pub random_size: Vec<usize>,

    #[arg(long, help = "Probability that a random grid cell is blocked")]
    pub density: Option<f64>,

    #[arg(long, help = "Start location as X,Y", use_value_delimiter = true, allow_negative_numbers = true)]
    pub start: Vec<i32>,

    #[arg(long, help = "End location as X,Y", use_value_delimiter = true, allow_negative_numbers = true)]
    pub end: Vec<i32>,

    #[arg(long, help = "Path to a MovingAI scenario or a YAML query list")]
    pub scen_path: Option<String>,

    #[arg(long, help = "Number of scenario queries to run")]
    pub num_queries: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Path to the JSON output file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Print each grid with its path", default_value_t = false)]
    pub render: bool,

    #[arg(long, help = "Log filter, e.g. info or pathfinder_rust=debug")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridSource {
    MovingAi(String),
    Text(String),
    Random { cols: usize, rows: usize, density: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map_path: Option<String>,
    pub grid_path: Option<String>,
    pub random_size: Option<[usize; 2]>,
    pub density: f64,
    pub start: Option<Location>,
    pub end: Option<Location>,
    pub scen_path: Option<String>,
    pub num_queries: Option<usize>,
    pub seed: u64,
    pub output_path: Option<String>,
    pub render: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: None,
            grid_path: None,
            random_size: None,
            density: 0.2,
            start: None,
            end: None,
            scen_path: None,
            num_queries: None,
            seed: 0,
            output_path: None,
            render: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse config")
    }

    /// Flags given on the command line take precedence over the file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(map_path) = &cli.map_path {
            self.map_path = Some(map_path.clone());
        }
        if let Some(grid_path) = &cli.grid_path {
            self.grid_path = Some(grid_path.clone());
        }
        match cli.random_size.as_slice() {
            [] => {}
            &[cols, rows] => self.random_size = Some([cols, rows]),
            other => bail!("--random-size expects COLS,ROWS, got {other:?}"),
        }
        if let Some(density) = cli.density {
            self.density = density;
        }
        if let Some(start) = location_from_args(&cli.start, "start")? {
            self.start = Some(start);
        }
        if let Some(end) = location_from_args(&cli.end, "end")? {
            self.end = Some(end);
        }
        if let Some(scen_path) = &cli.scen_path {
            self.scen_path = Some(scen_path.clone());
        }
        if let Some(num_queries) = cli.num_queries {
            self.num_queries = Some(num_queries);
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        if cli.render {
            self.render = true;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        Ok(self)
    }

    pub fn grid_source(&self) -> anyhow::Result<GridSource> {
        let mut sources = Vec::new();
        if let Some(path) = &self.map_path {
            sources.push(GridSource::MovingAi(path.clone()));
        }
        if let Some(path) = &self.grid_path {
            sources.push(GridSource::Text(path.clone()));
        }
        if let Some([cols, rows]) = self.random_size {
            sources.push(GridSource::Random {
                cols,
                rows,
                density: self.density,
            });
        }

        match sources.len() {
            1 => Ok(sources.remove(0)),
            0 => Err(anyhow!(
                "No grid given, use one of map_path, grid_path or random_size"
            )),
            _ => Err(anyhow!(
                "Only one of map_path, grid_path or random_size can be given"
            )),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let source = self.grid_source()?;

        if !(0.0..1.0).contains(&self.density) {
            bail!("Density must be in [0, 1), got {}", self.density);
        }
        if self.num_queries == Some(0) {
            bail!("Number of queries must be positive");
        }

        match source {
            GridSource::Text(_) => {
                if self.start.is_some() || self.end.is_some() || self.scen_path.is_some() {
                    bail!("A text grid sets its own start and end, drop start, end and scen_path");
                }
            }
            GridSource::Random { cols, rows, .. } if cols == 0 || rows == 0 => {
                bail!("Random grid size must be positive, got {cols}x{rows}");
            }
            GridSource::MovingAi(_) | GridSource::Random { .. } => {
                match (self.start, self.end, &self.scen_path) {
                    (Some(_), Some(_), None) | (None, None, Some(_)) => {}
                    (Some(_), Some(_), Some(_)) => {
                        bail!("Give either start and end or scen_path, not both")
                    }
                    _ => bail!("Both start and end, or a scen_path, are required"),
                }
            }
        }
        Ok(())
    }
}

fn location_from_args(values: &[i32], name: &str) -> anyhow::Result<Option<Location>> {
    match values {
        [] => Ok(None),
        &[x, y] => Ok(Some(Location::new(x, y))),
        other => Err(anyhow!("--{name} expects X,Y, got {other:?}")),
    }
}
