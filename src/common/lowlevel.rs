use super::Direction;
use crate::algorithm::HeapEntry;

/// Per-cell state of one search, rooted at the end cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SearchRecord {
    pub(crate) cost: f64, // accumulated cost to the end cell, only valid once `parent` is known
    pub(crate) steps: usize,
    pub(crate) parent: Direction, // direction to step from this cell toward the end cell
    pub(crate) visited: bool,
    pub(crate) heap_index: usize, // 1-based slot in the queue, 0 when not queued
}

impl Default for SearchRecord {
    fn default() -> Self {
        SearchRecord {
            cost: f64::INFINITY,
            steps: 0,
            parent: Direction::Unknown,
            visited: false,
            heap_index: 0,
        }
    }
}

impl SearchRecord {
    pub(crate) fn reset(&mut self) {
        *self = SearchRecord::default();
    }

    pub(crate) fn is_reached(&self) -> bool {
        self.parent != Direction::Unknown
    }

    pub(crate) fn make_root(&mut self) {
        self.cost = 0.0;
        self.steps = 0;
        self.parent = Direction::Origin;
    }
}

impl HeapEntry for SearchRecord {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn heap_index(&self) -> usize {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: usize) {
        self.heap_index = index;
    }
}
