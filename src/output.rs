use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;

use crate::common::{Location, Path, Query};
use crate::stat::Stats;

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub start: Location,
    pub end: Location,
    pub path: Option<Path>,
    pub stats: Stats,
}

impl QueryResult {
    pub fn new(query: &Query, path: Option<Path>, stats: Stats) -> Self {
        QueryResult {
            start: query.start,
            end: query.end,
            path,
            stats,
        }
    }
}

/// Writes all results as a pretty-printed JSON array, creating parent directories.
pub fn write_results(path: &str, results: &[QueryResult]) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)
        .with_context(|| format!("failed to write results to {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::shortest_path;

    #[test]
    fn test_write_results() {
        let grid = vec![true; 4];
        let reachable = Query::new(Location::new(0, 0), Location::new(1, 1));
        let blocked = Query::new(Location::new(0, 0), Location::new(1, 0));
        let mut walled = grid.clone();
        walled[1] = false;

        let results = vec![
            QueryResult::new(
                &reachable,
                shortest_path(&grid, 2, 2, reachable.start, reachable.end),
                Stats::default(),
            ),
            QueryResult::new(
                &blocked,
                shortest_path(&walled, 2, 2, blocked.start, blocked.end),
                Stats::default(),
            ),
        ];

        let dir = std::env::temp_dir().join("pathfinder_rust_output");
        let path = dir.join("results.json");
        let path = path.to_str().unwrap();
        write_results(path, &results).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let entries = written.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["start"]["x"], 0);
        assert_eq!(entries[0]["path"]["locations"].as_array().unwrap().len(), 2);
        assert!(entries[1]["path"].is_null());
    }
}
