use anyhow::{anyhow, bail, Context, Result};
use rand::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::common::{Location, Query};

#[derive(Debug, Deserialize, Clone, PartialEq, PartialOrd)]
pub struct Route {
    pub start_x: i32,
    pub start_y: i32,
    pub goal_x: i32,
    pub goal_y: i32,
    pub optimal_length: Option<f64>,
}

impl Route {
    pub fn query(&self) -> Query {
        Query::new(
            Location::new(self.start_x, self.start_y),
            Location::new(self.goal_x, self.goal_y),
        )
    }
}

type Bucket = Vec<Route>;

/// A MovingAI scenario: routes grouped by bucket.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub map: String,
    pub map_width: usize,
    pub map_height: usize,
    pub buckets: BTreeMap<usize, Bucket>,
}

impl Scenario {
    pub fn load_from_scen(path: &str) -> Result<Scenario> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read scenario {path}"))?;
        Self::parse_scen(&content).with_context(|| format!("invalid scenario file {path}"))
    }

    /// Parses `bucket map width height start_x start_y goal_x goal_y optimal`
    /// lines after a `version` line.
    pub fn parse_scen(content: &str) -> Result<Scenario> {
        let mut lines = content.lines();

        // First line is "version x.x" which we can skip
        let _version = lines.next().ok_or_else(|| anyhow!("scenario is empty"))?;

        let mut scenario = Scenario {
            map: String::new(),
            map_width: 0,
            map_height: 0,
            buckets: BTreeMap::new(),
        };

        for (line_number, line) in lines.enumerate() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            if parts.len() < 8 {
                bail!("line {}: expected at least 8 fields", line_number + 2);
            }

            let field = |index: usize| -> Result<i32> {
                parts[index]
                    .parse()
                    .with_context(|| format!("line {}: invalid field {index}", line_number + 2))
            };

            let bucket_index = field(0)? as usize;
            let route = Route {
                start_x: field(4)?,
                start_y: field(5)?,
                goal_x: field(6)?,
                goal_y: field(7)?,
                optimal_length: parts.get(8).and_then(|value| value.parse().ok()),
            };

            if scenario.map.is_empty() {
                // Initialize map details from the first route entry
                scenario.map = parts[1].to_string();
                scenario.map_width = field(2)? as usize;
                scenario.map_height = field(3)? as usize;
            }

            scenario.buckets.entry(bucket_index).or_default().push(route);
        }

        Ok(scenario)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.buckets.values().flatten()
    }

    /// Picks `num_queries` distinct routes in a seeded random order.
    pub fn sample_queries<R: Rng + ?Sized>(
        &self,
        num_queries: usize,
        rng: &mut R,
    ) -> Result<Vec<Query>> {
        let mut available: Vec<Query> = self.routes().map(Route::query).collect();
        if available.len() < num_queries {
            bail!(
                "Not enough routes available: requested {num_queries}, scenario has {}",
                available.len()
            );
        }

        available.shuffle(rng);
        available.truncate(num_queries);

        info!("Generate queries: {available:?}");
        Ok(available)
    }

    pub fn load_queries_from_yaml(path: &str) -> Result<Vec<Query>> {
        let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
        let reader = BufReader::new(file);
        let queries = serde_yaml::from_reader(reader)
            .with_context(|| format!("invalid query list {path}"))?;
        Ok(queries)
    }

    pub fn write_queries_to_yaml(path: &str, queries: &[Query]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(&queries)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_read_scenario() {
        let scen = Scenario::load_from_scen("map_file/test/test.scen").unwrap();

        assert_eq!(scen.map, "test.map");
        assert_eq!((scen.map_width, scen.map_height), (5, 4));
        assert_eq!(scen.buckets.len(), 2);
        assert_eq!(scen.routes().count(), 4);

        let first = &scen.buckets[&0][0];
        assert_eq!(
            first.query(),
            Query::new(Location::new(0, 0), Location::new(4, 0))
        );
        assert_eq!(first.optimal_length, Some(7.65685425));
    }

    #[test]
    fn test_sample_queries() {
        let scen = Scenario::load_from_scen("map_file/test/test.scen").unwrap();

        let a = scen
            .sample_queries(3, &mut StdRng::seed_from_u64(0))
            .unwrap();
        let b = scen
            .sample_queries(3, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);

        let mut distinct = a.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 3);

        assert!(scen.sample_queries(5, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_parse_scen_errors() {
        assert!(Scenario::parse_scen("").is_err());
        assert!(Scenario::parse_scen("version 1\n0 a.map 5 4 0 0\n").is_err());
        assert!(Scenario::parse_scen("version 1\n0 a.map 5 4 x 0 1 1 1.0\n").is_err());
    }

    #[test]
    fn test_queries_yaml_round_trip() {
        let path = std::env::temp_dir().join("pathfinder_rust_queries.yaml");
        let path = path.to_str().unwrap();
        let queries = vec![
            Query::new(Location::new(0, 0), Location::new(4, 0)),
            Query::new(Location::new(1, 2), Location::new(3, 3)),
        ];

        Scenario::write_queries_to_yaml(path, &queries).unwrap();
        assert_eq!(Scenario::load_queries_from_yaml(path).unwrap(), queries);
    }
}
