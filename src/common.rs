mod geometry;
mod lowlevel;

pub use geometry::{Direction, Location};
pub(crate) use lowlevel::SearchRecord;

use serde::{Deserialize, Serialize};

/// One start/end pair to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Query {
    pub start: Location,
    pub end: Location,
}

impl Query {
    pub fn new(start: Location, end: Location) -> Self {
        Query { start, end }
    }

    pub fn reversed(&self) -> Self {
        Query {
            start: self.end,
            end: self.start,
        }
    }
}

/// A route from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub cost: f64,
    pub locations: Vec<Location>,
}

impl Path {
    /// Rebuilds the locations by applying `directions` one after another from `start`.
    pub fn from_directions(start: Location, directions: &[Direction], cost: f64) -> Self {
        let mut locations = Vec::with_capacity(directions.len() + 1);
        let mut current = start;
        locations.push(current);
        for &direction in directions {
            current = current.step(direction);
            locations.push(current);
        }
        Path { cost, locations }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn start(&self) -> Option<Location> {
        self.locations.first().copied()
    }

    pub fn end(&self) -> Option<Location> {
        self.locations.last().copied()
    }

    /// The moves between consecutive locations.
    pub fn directions(&self) -> Vec<Direction> {
        self.locations
            .windows(2)
            .filter_map(|pair| pair[0].direction_to(pair[1]))
            .collect()
    }

    /// Every location is in bounds and passable, consecutive locations are one
    /// move apart, and the cost equals the sum of the step costs.
    pub fn verify(&self, grid: &[bool], cols: usize, rows: usize) -> bool {
        if self.locations.iter().any(|loc| {
            !loc.within_bounds(cols, rows) || !grid[loc.to_index(cols)]
        }) {
            return false;
        }

        let directions = self.directions();
        if directions.len() + 1 != self.locations.len() {
            return false;
        }

        let cost: f64 = directions.iter().map(|d| d.step_cost()).sum();
        (cost - self.cost).abs() < 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn test_path_directions_round_trip() {
        let start = Location::new(0, 0);
        let directions = vec![Direction::Right, Direction::DownRight, Direction::Down];
        let path = Path::from_directions(start, &directions, 2.0 + SQRT_2);

        assert_eq!(path.len(), 4);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.end(), Some(Location::new(2, 2)));
        assert_eq!(path.directions(), directions);
    }

    #[test]
    fn test_path_verify() {
        #[rustfmt::skip]
        let grid = vec![
            true, true,  true,
            true, false, true,
        ];
        let path = Path {
            cost: 2.0 + SQRT_2,
            locations: vec![
                Location::new(0, 1),
                Location::new(0, 0),
                Location::new(1, 0),
                Location::new(2, 1),
            ],
        };
        assert!(path.verify(&grid, 3, 2));

        let wrong_cost = Path { cost: 3.0, ..path.clone() };
        assert!(!wrong_cost.verify(&grid, 3, 2));

        let blocked = Path {
            cost: 2.0,
            locations: vec![Location::new(0, 1), Location::new(1, 1), Location::new(2, 1)],
        };
        assert!(!blocked.verify(&grid, 3, 2));

        let jump = Path {
            cost: 1.0,
            locations: vec![Location::new(0, 0), Location::new(2, 0)],
        };
        assert!(!jump.verify(&grid, 3, 2));
    }
}
