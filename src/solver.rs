use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::algorithm::SearchContext;
use crate::common::Query;
use crate::config::{Config, GridSource};
use crate::map::Map;
use crate::output::QueryResult;
use crate::scenario::Scenario;
use crate::stat::Stats;

/// A grid together with the queries to run on it.
#[derive(Debug, Clone)]
pub struct Problem {
    pub map: Map,
    pub queries: Vec<Query>,
}

impl Problem {
    pub fn load(config: &Config) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let source = config.grid_source()?;
        let is_random = matches!(source, GridSource::Random { .. });

        let (mut map, queries) = match source {
            GridSource::Text(path) => {
                let (map, query) = Map::from_text_file(&path)?;
                (map, vec![query])
            }
            GridSource::MovingAi(path) => {
                let map = Map::from_file(&path)?;
                (map, load_queries(config, &mut rng)?)
            }
            GridSource::Random {
                cols,
                rows,
                density,
            } => {
                let map = Map::random(cols, rows, density, &mut rng);
                (map, load_queries(config, &mut rng)?)
            }
        };

        for query in &queries {
            if !map.contains(query) {
                bail!(
                    "query {} -> {} is outside the {}x{} map",
                    query.start,
                    query.end,
                    map.cols,
                    map.rows
                );
            }
        }

        // Random grids never block the requested endpoints.
        if is_random {
            for query in &queries {
                map.set_passable(query.start, true)?;
                map.set_passable(query.end, true)?;
            }
        }

        info!(
            "Loaded {}x{} map with {} queries",
            map.cols,
            map.rows,
            queries.len()
        );
        Ok(Problem { map, queries })
    }
}

fn load_queries(config: &Config, rng: &mut StdRng) -> Result<Vec<Query>> {
    if let (Some(start), Some(end)) = (config.start, config.end) {
        return Ok(vec![Query::new(start, end)]);
    }

    let Some(scen_path) = config.scen_path.as_deref() else {
        bail!("Both start and end, or a scen_path, are required");
    };

    if scen_path.ends_with(".yaml") || scen_path.ends_with(".yml") {
        let mut queries = Scenario::load_queries_from_yaml(scen_path)?;
        if let Some(num_queries) = config.num_queries {
            queries.truncate(num_queries);
        }
        return Ok(queries);
    }

    let scenario = Scenario::load_from_scen(scen_path)?;
    let num_queries = config
        .num_queries
        .unwrap_or_else(|| scenario.routes().count());
    scenario.sample_queries(num_queries, rng)
}

/// Runs every query of a problem through one reused [`SearchContext`].
pub struct BatchSolver<'a> {
    map: &'a Map,
    context: SearchContext,
    stats: Stats,
}

impl<'a> BatchSolver<'a> {
    pub fn new(map: &'a Map) -> Self {
        BatchSolver {
            map,
            context: SearchContext::new(map.cols, map.rows),
            stats: Stats::default(),
        }
    }

    pub fn solve(&mut self, query: &Query) -> QueryResult {
        let path = self.map.shortest_path(&mut self.context, query);
        let stats = self.context.stats().clone();
        self.stats.accumulate(&stats);

        match &path {
            Some(path) => info!(
                "{} -> {}: cost {:.2} over {} moves",
                query.start,
                query.end,
                path.cost,
                path.len() - 1
            ),
            None => info!("{} -> {}: no path found", query.start, query.end),
        }
        debug!("query stats: {stats:?}");

        QueryResult::new(query, path, stats)
    }

    pub fn solve_all(&mut self, queries: &[Query]) -> Vec<QueryResult> {
        queries.iter().map(|query| self.solve(query)).collect()
    }

    /// Counters summed over every query solved so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Location;

    #[test]
    fn test_load_text_grid_problem() {
        let config = Config {
            grid_path: Some("map_file/test/test.grid".to_string()),
            ..Config::default()
        };
        let problem = Problem::load(&config).unwrap();
        assert_eq!(
            problem.queries,
            vec![Query::new(Location::new(0, 0), Location::new(3, 2))]
        );

        let mut solver = BatchSolver::new(&problem.map);
        let results = solver.solve_all(&problem.queries);
        assert_eq!(results.len(), 1);
        assert!(results[0].path.is_some());
    }

    #[test]
    fn test_scenario_batch_reuses_context() {
        let config = Config {
            map_path: Some("map_file/test/test.map".to_string()),
            scen_path: Some("map_file/test/test.scen".to_string()),
            ..Config::default()
        };
        let problem = Problem::load(&config).unwrap();
        assert_eq!(problem.queries.len(), 4);

        let mut solver = BatchSolver::new(&problem.map);
        let results = solver.solve_all(&problem.queries);

        let scenario = Scenario::load_from_scen("map_file/test/test.scen").unwrap();
        for route in scenario.routes() {
            let result = results
                .iter()
                .find(|result| Query::new(result.start, result.end) == route.query())
                .unwrap();
            let path = result.path.as_ref().unwrap();
            assert!(path.verify(&problem.map.grid, problem.map.cols, problem.map.rows));
            assert!((path.cost - route.optimal_length.unwrap()).abs() < 1e-6);
        }

        let expanded: usize = results.iter().map(|r| r.stats.expanded_nodes).sum();
        assert_eq!(solver.stats().expanded_nodes, expanded);
    }

    #[test]
    fn test_random_problem_clears_endpoints() {
        let config = Config {
            random_size: Some([6, 6]),
            density: 0.9,
            start: Some(Location::new(0, 0)),
            end: Some(Location::new(5, 5)),
            seed: 11,
            ..Config::default()
        };
        let problem = Problem::load(&config).unwrap();
        assert!(problem.map.is_passable(Location::new(0, 0)));
        assert!(problem.map.is_passable(Location::new(5, 5)));
    }

    #[test]
    fn test_out_of_bounds_query_is_rejected() {
        let config = Config {
            map_path: Some("map_file/test/test.map".to_string()),
            start: Some(Location::new(0, 0)),
            end: Some(Location::new(9, 9)),
            ..Config::default()
        };
        assert!(Problem::load(&config).is_err());
    }
}
