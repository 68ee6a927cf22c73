use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub expanded_nodes: usize,
    pub relaxations: usize,
    pub time_us: usize,
}

impl Stats {
    pub fn accumulate(&mut self, other: &Stats) {
        self.expanded_nodes += other.expanded_nodes;
        self.relaxations += other.relaxations;
        self.time_us += other.time_us;
    }

    pub fn print(&self) {
        info!(
            "Time(microseconds) {:?} Expand nodes number: {:?} Relaxations number: {:?}",
            self.time_us, self.expanded_nodes, self.relaxations
        );
    }
}
