use super::{construct_path, PriorityQueue};
use crate::common::{Direction, Location, Path, SearchRecord};
use crate::stat::Stats;

use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Reusable buffers for repeated searches: one record per cell and the open queue.
///
/// Every search resets all of its state first, so a context can serve any
/// sequence of grids. Concurrent searches need one context each.
#[derive(Debug, Default, Clone)]
pub struct SearchContext {
    records: Vec<SearchRecord>,
    queue: PriorityQueue,
    cols: usize,
    rows: usize,
    stats: Stats,
}

impl SearchContext {
    pub fn new(cols: usize, rows: usize) -> Self {
        SearchContext {
            records: vec![SearchRecord::default(); cols * rows],
            queue: PriorityQueue::with_capacity(cols * rows),
            cols,
            rows,
            stats: Stats::default(),
        }
    }

    /// Counters of the last search.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Minimum-cost 8-directional path from `start` to `end` over `grid`
    /// (row-major, `true` = passable). Returns `None` when either endpoint is
    /// blocked or the endpoints are not connected.
    ///
    /// # Panics
    ///
    /// If `grid` does not hold `cols * rows` cells or an endpoint is outside the grid.
    #[instrument(skip_all, name = "shortest_path", fields(start = %start, end = %end), level = "debug")]
    pub fn shortest_path(
        &mut self,
        grid: &[bool],
        cols: usize,
        rows: usize,
        start: Location,
        end: Location,
    ) -> Option<Path> {
        assert_eq!(
            grid.len(),
            cols * rows,
            "obstacle grid must hold {cols}x{rows} cells"
        );
        assert!(
            start.within_bounds(cols, rows),
            "start {start} is outside the {cols}x{rows} grid"
        );
        assert!(
            end.within_bounds(cols, rows),
            "end {end} is outside the {cols}x{rows} grid"
        );

        let search_start_time = Instant::now();
        self.prepare(cols, rows);

        if !grid[start.to_index(cols)] || !grid[end.to_index(cols)] {
            debug!("start or end is not passable");
            return None;
        }

        self.search(grid, start, end);
        self.stats.time_us = search_start_time.elapsed().as_micros() as usize;

        if !self.records[start.to_index(cols)].is_reached() {
            debug!("cannot find path");
            return None;
        }

        let path = construct_path(&self.records, cols, start, end);
        debug!("path cost {:.3} with {} locations", path.cost, path.len());
        Some(path)
    }

    fn prepare(&mut self, cols: usize, rows: usize) {
        let cell_count = cols * rows;
        self.records.resize(cell_count, SearchRecord::default());
        self.records.iter_mut().for_each(SearchRecord::reset);
        self.queue.reset(cell_count);
        self.cols = cols;
        self.rows = rows;
        self.stats = Stats::default();
    }

    // Expands from `end` so that each reached cell records the direction that
    // leads toward `end`; the path is then read forward from `start`.
    fn search(&mut self, grid: &[bool], start: Location, end: Location) {
        let (cols, rows) = (self.cols, self.rows);
        let start_index = start.to_index(cols);
        let end_index = end.to_index(cols);

        self.records[end_index].make_root();
        self.queue.insert_or_relax(&mut self.records, end_index);

        while let Some(current_index) = self.queue.extract_min(&mut self.records) {
            let current = &mut self.records[current_index];
            current.visited = true;
            let (current_cost, current_steps) = (current.cost, current.steps);
            let current_location = Location::from_index(current_index, cols);
            self.stats.expanded_nodes += 1;
            trace!("expand {current_location} with cost {current_cost:.3}");

            for direction in Direction::ALL {
                let neighbor = current_location.step(direction);
                if !neighbor.within_bounds(cols, rows) {
                    continue;
                }

                let neighbor_index = neighbor.to_index(cols);
                let record = &self.records[neighbor_index];
                if !grid[neighbor_index] || record.visited {
                    continue;
                }

                let candidate_cost = current_cost + direction.step_cost();
                let cheaper = !record.is_reached() || candidate_cost < record.cost;

                // Nothing costing at least as much as the best known route from
                // start can improve the answer.
                let start_record = &self.records[start_index];
                let below_start = !start_record.is_reached() || candidate_cost < start_record.cost;

                if !(cheaper && below_start) {
                    continue;
                }
                let Some(back) = direction.opposite() else {
                    continue;
                };

                let record = &mut self.records[neighbor_index];
                record.cost = candidate_cost;
                record.parent = back;
                record.steps = current_steps + 1;
                self.queue.insert_or_relax(&mut self.records, neighbor_index);
                self.stats.relaxations += 1;
            }
        }
    }
}

/// One-off search with freshly allocated buffers. See [`SearchContext::shortest_path`].
pub fn shortest_path(
    grid: &[bool],
    cols: usize,
    rows: usize,
    start: Location,
    end: Location,
) -> Option<Path> {
    SearchContext::new(cols, rows).shortest_path(grid, cols, rows, start, end)
}
