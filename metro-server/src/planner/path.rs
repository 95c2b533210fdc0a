//! Raw edge paths produced by the pathfinders.

use crate::network::Edge;

/// An ordered, contiguous run of edges from start to end.
#[derive(Debug, Clone)]
pub struct RoutePath<'n> {
    edges: Vec<&'n Edge>,
    transfers: usize,
}

impl<'n> RoutePath<'n> {
    /// Wrap a path, counting transfers as changes of line between edges.
    pub fn new(edges: Vec<&'n Edge>) -> Self {
        let transfers = line_changes(&edges);
        Self { edges, transfers }
    }

    /// Wrap a path whose transfer count was tracked by the search.
    pub fn with_transfers(edges: Vec<&'n Edge>, transfers: usize) -> Self {
        Self { edges, transfers }
    }

    pub fn edges(&self) -> &[&'n Edge] {
        &self.edges
    }

    pub fn transfers(&self) -> usize {
        self.transfers
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn distance_km(&self) -> f64 {
        self.edges.iter().map(|e| e.distance_km).sum()
    }

    /// Riding minutes plus `transfer_penalty` for every change of line.
    pub fn riding_minutes(&self, transfer_penalty: f64) -> f64 {
        let travel: f64 = self.edges.iter().map(|e| e.travel_minutes).sum();
        travel + transfer_penalty * line_changes(&self.edges) as f64
    }
}

/// Number of adjacent edge pairs on different lines.
pub fn line_changes(edges: &[&Edge]) -> usize {
    edges.windows(2).filter(|w| w[0].line != w[1].line).count()
}
