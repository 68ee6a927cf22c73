mod dijkstra;
mod queue;

pub use dijkstra::{shortest_path, SearchContext};
pub use queue::{HeapEntry, PriorityQueue};

use crate::common::{Location, Path, SearchRecord};

/// Walks the parent directions recorded by a finished search from `start` to `end`.
fn construct_path(records: &[SearchRecord], cols: usize, start: Location, end: Location) -> Path {
    let start_record = &records[start.to_index(cols)];
    assert!(
        start_record.is_reached(),
        "no path was recorded from {start} to {end}"
    );

    let mut locations = Vec::with_capacity(start_record.steps + 1);
    let mut current = start;
    locations.push(current);
    while current != end {
        current = current.step(records[current.to_index(cols)].parent);
        locations.push(current);
        assert!(
            locations.len() <= start_record.steps + 1,
            "parent chain from {start} does not reach {end}"
        );
    }

    Path {
        cost: start_record.cost,
        locations,
    }
}
