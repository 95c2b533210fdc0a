//! Time-optimal search.
//!
//! Dijkstra over `(station, arriving line)` states. An edge costs its riding
//! time, plus the transfer penalty when its line differs from the line the
//! passenger arrived on. Keying states by the arriving line keeps the search
//! exact even though the penalty depends on the previous edge.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use crate::domain::LineId;
use crate::network::{EdgeId, Network, StationId};

use super::path::RoutePath;

/// Station plus the line used to reach it; `None` only at the origin.
type Key<'n> = (StationId, Option<&'n LineId>);

#[derive(Debug, Clone, Copy)]
struct State<'n> {
    minutes: f64,
    key: Key<'n>,
    seq: usize,
}

// Reversed so that `BinaryHeap` pops the cheapest state first, earliest
// pushed among equals.
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .minutes
            .total_cmp(&self.minutes)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State<'_> {}

/// Find the quickest path from `start` to `end`.
///
/// Returns `None` if either station is unknown, `end` is unreachable, or
/// `start` and `end` are the same station.
pub fn fastest_path<'n>(
    network: &'n Network,
    start: &str,
    end: &str,
    transfer_penalty: f64,
) -> Option<RoutePath<'n>> {
    let start = network.station_id(start)?;
    let end = network.station_id(end)?;

    let mut best: HashMap<Key<'n>, f64> = HashMap::new();
    let mut previous: HashMap<Key<'n>, (Key<'n>, EdgeId)> = HashMap::new();
    let mut settled: HashSet<Key<'n>> = HashSet::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0;

    let origin = (start, None);
    best.insert(origin, 0.0);
    heap.push(State {
        minutes: 0.0,
        key: origin,
        seq,
    });

    let mut reached = None;
    while let Some(State { minutes, key, .. }) = heap.pop() {
        if !settled.insert(key) {
            continue;
        }
        let (station, arrived_on) = key;
        if station == end {
            reached = Some(key);
            break;
        }

        for (edge_id, edge) in network.outgoing(station) {
            let penalty = match arrived_on {
                Some(line) if *line != edge.line => transfer_penalty,
                _ => 0.0,
            };
            let candidate = minutes + edge.travel_minutes + penalty;
            let next = (edge.to, Some(&edge.line));

            if candidate < best.get(&next).copied().unwrap_or(f64::INFINITY) {
                best.insert(next, candidate);
                previous.insert(next, (key, edge_id));
                seq += 1;
                heap.push(State {
                    minutes: candidate,
                    key: next,
                    seq,
                });
            }
        }
    }

    trace!(
        settled = settled.len(),
        found = reached.is_some(),
        "fastest search complete"
    );

    let mut edges = Vec::new();
    let mut current = reached?;
    while let Some(&(parent, edge_id)) = previous.get(&current) {
        edges.push(network.edge(edge_id));
        current = parent;
    }
    edges.reverse();

    if edges.is_empty() {
        return None;
    }
    Some(RoutePath::new(edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_network::{line, network, station_names};

    #[test]
    fn unknown_station_is_none() {
        let network = network();
        assert!(fastest_path(&network, "Nowhere", "C", 5.0).is_none());
        assert!(fastest_path(&network, "A", "Nowhere", 5.0).is_none());
    }

    #[test]
    fn same_station_is_none() {
        let network = network();
        assert!(fastest_path(&network, "A", "A", 5.0).is_none());
    }

    #[test]
    fn unreachable_is_none() {
        let network = network();
        assert!(fastest_path(&network, "A", "Island", 5.0).is_none());
    }

    #[test]
    fn follows_single_line() {
        let network = network();
        let path = fastest_path(&network, "A", "C", 5.0).unwrap();
        assert_eq!(station_names(&network, &path), ["A", "B", "C"]);
        assert_eq!(path.transfers(), 0);
    }

    #[test]
    fn takes_faster_route_with_change() {
        // Red alone is 24 min; the Blue shortcut is 15 min riding plus two changes.
        let network = network();
        let path = fastest_path(&network, "A", "E", 1.0).unwrap();
        assert_eq!(station_names(&network, &path), ["A", "B", "X", "D", "E"]);
        assert_eq!(path.transfers(), 2);
    }

    #[test]
    fn penalty_can_keep_passenger_on_line() {
        let network = network();
        let path = fastest_path(&network, "A", "E", 10.0).unwrap();
        assert_eq!(station_names(&network, &path), ["A", "B", "C", "D", "E"]);
        assert_eq!(path.transfers(), 0);
    }

    #[test]
    fn arriving_line_matters() {
        // V is reached sooner on Spur, but staying on Main avoids the change.
        let mut network = network();
        network
            .add_line(line("Spur", &[("P", "V", 1.8)]))
            .unwrap();
        network
            .add_line(line("Main", &[("P", "V", 2.0), ("V", "T", 1.0)]))
            .unwrap();

        let path = fastest_path(&network, "P", "T", 5.0).unwrap();
        assert_eq!(path.transfers(), 0);
        assert!(path.edges().iter().all(|e| e.line.as_str() == "Main"));
        assert!((path.riding_minutes(5.0) - 4.5).abs() < 1e-9);
    }

    #[test]
    fn path_is_contiguous() {
        let network = network();
        let path = fastest_path(&network, "E", "Y", 5.0).unwrap();
        for pair in path.edges().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(path.edges().last().unwrap().to, network.station_id("Y").unwrap());
    }
}
