use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;

/// A cell coordinate, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Denotes "no location".
    pub const NONE: Location = Location { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    pub fn within_bounds(&self, cols: usize, rows: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < cols && (self.y as usize) < rows
    }

    /// Location reached by one move in `direction`. Sentinel directions do not move.
    pub fn step(&self, direction: Direction) -> Location {
        let (dx, dy) = direction.offset();
        Location {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Row-major index, only meaningful for in-bounds locations.
    pub(crate) fn to_index(self, cols: usize) -> usize {
        self.y as usize * cols + self.x as usize
    }

    pub(crate) fn from_index(index: usize, cols: usize) -> Self {
        Location {
            x: (index % cols) as i32,
            y: (index / cols) as i32,
        }
    }

    /// Direction of the unit move from `self` to `other`, if they are adjacent.
    pub fn direction_to(&self, other: Location) -> Option<Direction> {
        let offset = (other.x - self.x, other.y - self.y);
        Direction::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Location { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Cell not reached yet.
    #[default]
    Unknown,
    /// Cell is the root of the search.
    Origin,
    Up,
    Right,
    Down,
    Left,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    /// The real directions, in the order neighbors are evaluated. Among
    /// equal-cost routes the first direction relaxed wins.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpLeft => (-1, -1),
            Direction::Unknown | Direction::Origin => (0, 0),
        }
    }

    /// Sentinels have no opposite.
    pub fn opposite(&self) -> Option<Direction> {
        let opposite = match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
            Direction::Unknown | Direction::Origin => return None,
        };
        Some(opposite)
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Direction::UpRight | Direction::DownRight | Direction::DownLeft | Direction::UpLeft
        )
    }

    pub fn step_cost(&self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }
}
