use anyhow::{anyhow, bail, Context, Result};
use rand::Rng;
use std::fs;

use crate::algorithm::SearchContext;
use crate::common::{Location, Path, Query};

/// Row-major obstacle grid, `true` = passable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub cols: usize,
    pub rows: usize,
    pub grid: Vec<bool>,
}

impl Map {
    pub fn new(cols: usize, rows: usize) -> Self {
        Map {
            cols,
            rows,
            grid: vec![true; cols * rows],
        }
    }

    /// Loads a MovingAI `.map` file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read map {path}"))?;
        Self::parse_movingai(&content).with_context(|| format!("invalid map file {path}"))
    }

    /// Parses the MovingAI map format: a `type`/`height`/`width`/`map` header
    /// followed by one line per row, where `.` and `G` are passable.
    pub fn parse_movingai(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let mut height = None;
        let mut width = None;

        for line in lines.by_ref() {
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("type") => {}
                Some("height") => height = Some(parse_dimension(parts.next(), "height")?),
                Some("width") => width = Some(parse_dimension(parts.next(), "width")?),
                Some("map") => break,
                Some(other) => bail!("unexpected header line starting with {other:?}"),
                None => {}
            }
        }

        let rows = height.ok_or_else(|| anyhow!("missing height"))?;
        let cols = width.ok_or_else(|| anyhow!("missing width"))?;

        let mut grid = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            let line = lines
                .next()
                .ok_or_else(|| anyhow!("expected {rows} rows, found {row}"))?;
            let cells: Vec<bool> = line.trim_end().chars().map(|ch| matches!(ch, '.' | 'G')).collect();
            if cells.len() != cols {
                bail!("row {row} has {} cells, expected {cols}", cells.len());
            }
            grid.extend(cells);
        }

        Ok(Map { cols, rows, grid })
    }

    /// Loads a text grid, see [`Map::parse_text_grid`].
    pub fn from_text_file(path: &str) -> Result<(Self, Query)> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read grid {path}"))?;
        Self::parse_text_grid(&content).with_context(|| format!("invalid grid file {path}"))
    }

    /// Parses a grid drawn with `1` (passable), `0` (blocked), `S` (start) and
    /// `E` (end), one line per row. Start and end are passable and must appear
    /// exactly once.
    pub fn parse_text_grid(content: &str) -> Result<(Self, Query)> {
        let mut lines: Vec<&str> = content.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let rows = lines.len();
        if rows == 0 {
            bail!("grid is empty");
        }
        let cols = lines[0].chars().count();
        if cols == 0 {
            bail!("row #1 is empty");
        }

        let mut grid = Vec::with_capacity(cols * rows);
        let mut start = None;
        let mut end = None;

        for (y, line) in lines.iter().enumerate() {
            let count = line.chars().count();
            if count != cols {
                bail!("row #{}: expected {cols} values, got {count}", y + 1);
            }

            for (x, ch) in line.chars().enumerate() {
                let location = Location::new(x as i32, y as i32);
                let passable = match ch {
                    '1' => true,
                    '0' => false,
                    'S' | 's' => {
                        if start.replace(location).is_some() {
                            bail!("row #{}: start point set more than once", y + 1);
                        }
                        true
                    }
                    'E' | 'e' => {
                        if end.replace(location).is_some() {
                            bail!("row #{}: end point set more than once", y + 1);
                        }
                        true
                    }
                    other => bail!("row #{}: unexpected character {other:?}", y + 1),
                };
                grid.push(passable);
            }
        }

        let start = start.ok_or_else(|| anyhow!("start point wasn't set"))?;
        let end = end.ok_or_else(|| anyhow!("end point wasn't set"))?;

        Ok((Map { cols, rows, grid }, Query::new(start, end)))
    }

    /// Each cell is blocked with probability `density`.
    pub fn random<R: Rng + ?Sized>(cols: usize, rows: usize, density: f64, rng: &mut R) -> Self {
        let grid = (0..cols * rows).map(|_| !rng.gen_bool(density)).collect();
        Map { cols, rows, grid }
    }

    /// Out-of-bounds locations are not passable.
    pub fn is_passable(&self, location: Location) -> bool {
        location.within_bounds(self.cols, self.rows) && self.grid[location.to_index(self.cols)]
    }

    pub fn set_passable(&mut self, location: Location, passable: bool) -> Result<()> {
        if !location.within_bounds(self.cols, self.rows) {
            bail!(
                "location {location} is outside the {}x{} map",
                self.cols,
                self.rows
            );
        }
        self.grid[location.to_index(self.cols)] = passable;
        Ok(())
    }

    pub fn contains(&self, query: &Query) -> bool {
        query.start.within_bounds(self.cols, self.rows)
            && query.end.within_bounds(self.cols, self.rows)
    }

    pub fn shortest_path(&self, context: &mut SearchContext, query: &Query) -> Option<Path> {
        context.shortest_path(&self.grid, self.cols, self.rows, query.start, query.end)
    }
}

fn parse_dimension(value: Option<&str>, name: &str) -> Result<usize> {
    value
        .ok_or_else(|| anyhow!("missing {name} value"))?
        .parse::<usize>()
        .with_context(|| format!("invalid {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_read_map() {
        let map = Map::from_file("map_file/test/test.map").unwrap();

        assert_eq!(map.rows, 4);
        assert_eq!(map.cols, 5);

        assert!(map.is_passable(Location::new(0, 0)));
        assert!(!map.is_passable(Location::new(2, 0)));
        assert!(!map.is_passable(Location::new(2, 2)));
        assert!(map.is_passable(Location::new(2, 3)));
        assert!(!map.is_passable(Location::new(5, 0)));
        assert!(!map.is_passable(Location::NONE));
    }

    #[test]
    fn test_map_file_search() {
        let map = Map::from_file("map_file/test/test.map").unwrap();
        let mut context = SearchContext::new(map.cols, map.rows);
        let query = Query::new(Location::new(0, 0), Location::new(4, 0));

        let path = map.shortest_path(&mut context, &query).unwrap();
        assert!(path.verify(&map.grid, map.cols, map.rows));
        assert!(path.locations.contains(&Location::new(2, 3)));
    }

    #[test]
    fn test_parse_movingai_errors() {
        assert!(Map::parse_movingai("type octile\nwidth 2\nmap\n..\n").is_err());
        assert!(Map::parse_movingai("type octile\nheight 2\nwidth 2\nmap\n..\n").is_err());
        assert!(Map::parse_movingai("type octile\nheight 1\nwidth 2\nmap\n...\n").is_err());
        assert!(Map::parse_movingai("type octile\nheight x\nwidth 2\nmap\n..\n").is_err());
    }

    #[test]
    fn test_read_text_grid() {
        let (map, query) = Map::from_text_file("map_file/test/test.grid").unwrap();

        assert_eq!(map.cols, 4);
        assert_eq!(map.rows, 3);
        assert_eq!(query.start, Location::new(0, 0));
        assert_eq!(query.end, Location::new(3, 2));
        assert!(map.is_passable(query.start));
        assert!(map.is_passable(query.end));
        assert!(!map.is_passable(Location::new(1, 1)));
    }

    #[test]
    fn test_parse_text_grid_lowercase_and_trailing_blank_lines() {
        let (map, query) = Map::parse_text_grid("s0\n1e\n\n").unwrap();
        assert_eq!((map.cols, map.rows), (2, 2));
        assert_eq!(query, Query::new(Location::new(0, 0), Location::new(1, 1)));
        assert_eq!(map.grid, vec![true, false, true, true]);
    }

    #[test]
    fn test_parse_text_grid_errors() {
        assert!(Map::parse_text_grid("").is_err());
        assert!(Map::parse_text_grid("S1\n1\nE1").is_err());
        assert!(Map::parse_text_grid("S1\n1x\n1E").is_err());
        assert!(Map::parse_text_grid("S1\n11").is_err());
        assert!(Map::parse_text_grid("11\n1E").is_err());
        assert!(Map::parse_text_grid("SS\n1E").is_err());
        assert!(Map::parse_text_grid("SE\nE1").is_err());
    }

    #[test]
    fn test_random_map_is_seeded() {
        let a = Map::random(16, 8, 0.3, &mut StdRng::seed_from_u64(7));
        let b = Map::random(16, 8, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.grid.len(), 128);

        let open = Map::random(4, 4, 0.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(open, Map::new(4, 4));
    }

    #[test]
    fn test_set_passable() {
        let mut map = Map::new(2, 2);
        map.set_passable(Location::new(1, 1), false).unwrap();
        assert!(!map.is_passable(Location::new(1, 1)));
        assert!(map.set_passable(Location::new(2, 1), false).is_err());
    }
}
