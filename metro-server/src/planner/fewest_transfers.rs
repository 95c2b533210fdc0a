//! Transfer-optimal search.
//!
//! Label-correcting search over `(station, line)` states, ordered by fewest
//! transfers and then least time. Changing line, whether standing at a
//! station or by boarding an edge of another line, costs one transfer and
//! the transfer penalty.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::domain::LineId;
use crate::network::{EdgeId, Network, StationId};

use super::path::RoutePath;

#[derive(Debug, Clone, Copy)]
struct Cost {
    transfers: usize,
    minutes: f64,
}

impl Cost {
    fn lexical_cmp(&self, other: &Self) -> Ordering {
        self.transfers
            .cmp(&other.transfers)
            .then_with(|| self.minutes.total_cmp(&other.minutes))
    }

    fn is_better_than(&self, other: &Self) -> bool {
        self.lexical_cmp(other) == Ordering::Less
    }
}

/// A reached state, with a back-pointer to the label it was reached from.
#[derive(Debug)]
struct Label<'n> {
    station: StationId,
    line: &'n LineId,
    cost: Cost,
    parent: Option<usize>,
    /// Edge ridden to get here; `None` for starts and line switches
    via: Option<EdgeId>,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: Cost,
    /// Label index, which is also insertion order
    label: usize,
}

// Reversed so that `BinaryHeap` pops the lexically smallest cost first, and
// among equal costs the earliest inserted label.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .lexical_cmp(&self.cost)
            .then_with(|| other.label.cmp(&self.label))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Default)]
struct Search<'n> {
    labels: Vec<Label<'n>>,
    best: HashMap<(StationId, &'n LineId), Cost>,
    heap: BinaryHeap<Entry>,
}

impl<'n> Search<'n> {
    /// Record `label` if it strictly improves on the best known cost for
    /// its `(station, line)` key.
    fn offer(&mut self, label: Label<'n>) {
        let key = (label.station, label.line);
        if let Some(known) = self.best.get(&key)
            && !label.cost.is_better_than(known)
        {
            return;
        }

        self.best.insert(key, label.cost);
        let index = self.labels.len();
        self.heap.push(Entry {
            cost: label.cost,
            label: index,
        });
        self.labels.push(label);
    }

    fn is_stale(&self, label: &Label<'n>) -> bool {
        self.best
            .get(&(label.station, label.line))
            .is_some_and(|best| best.is_better_than(&label.cost))
    }

    fn path_to(&self, index: usize, network: &'n Network) -> RoutePath<'n> {
        let transfers = self.labels[index].cost.transfers;
        let mut edges = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let label = &self.labels[i];
            if let Some(edge) = label.via {
                edges.push(network.edge(edge));
            }
            current = label.parent;
        }
        edges.reverse();
        RoutePath::with_transfers(edges, transfers)
    }
}

/// Find the path from `start` to `end` with the fewest changes of line,
/// breaking ties by total time.
///
/// Returns `None` if either station is unknown, `end` is unreachable, or
/// `start` and `end` are the same station.
pub fn fewest_transfers_path<'n>(
    network: &'n Network,
    start: &str,
    end: &str,
    transfer_penalty: f64,
) -> Option<RoutePath<'n>> {
    let start = network.station_id(start)?;
    let end = network.station_id(end)?;

    let mut search = Search::default();
    for line in network.station(start).line_ids() {
        search.offer(Label {
            station: start,
            line,
            cost: Cost {
                transfers: 0,
                minutes: 0.0,
            },
            parent: None,
            via: None,
        });
    }

    let mut found = None;
    while let Some(entry) = search.heap.pop() {
        let label = &search.labels[entry.label];
        if search.is_stale(label) {
            continue;
        }
        let (station, line, cost) = (label.station, label.line, label.cost);

        if station == end {
            found = Some(entry.label);
            break;
        }

        for other in network.station(station).line_ids() {
            if other == line {
                continue;
            }
            search.offer(Label {
                station,
                line: other,
                cost: Cost {
                    transfers: cost.transfers + 1,
                    minutes: cost.minutes + transfer_penalty,
                },
                parent: Some(entry.label),
                via: None,
            });
        }

        for (edge_id, edge) in network.outgoing(station) {
            let changes = edge.line != *line;
            let penalty = if changes { transfer_penalty } else { 0.0 };
            search.offer(Label {
                station: edge.to,
                line: &edge.line,
                cost: Cost {
                    transfers: cost.transfers + usize::from(changes),
                    minutes: cost.minutes + edge.travel_minutes + penalty,
                },
                parent: Some(entry.label),
                via: Some(edge_id),
            });
        }
    }

    trace!(
        labels = search.labels.len(),
        found = found.is_some(),
        "fewest-transfers search complete"
    );

    let path = search.path_to(found?, network);
    if path.is_empty() {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::fastest::fastest_path;
    use crate::planner::path::line_changes;
    use crate::planner::test_network::{line, network, station_names};

    #[test]
    fn unknown_station_is_none() {
        let network = network();
        assert!(fewest_transfers_path(&network, "Nowhere", "C", 5.0).is_none());
        assert!(fewest_transfers_path(&network, "A", "Nowhere", 5.0).is_none());
    }

    #[test]
    fn same_station_is_none() {
        let network = network();
        assert!(fewest_transfers_path(&network, "B", "B", 5.0).is_none());
    }

    #[test]
    fn unreachable_is_none() {
        let network = network();
        assert!(fewest_transfers_path(&network, "Islet", "A", 5.0).is_none());
    }

    #[test]
    fn stays_on_line_even_when_slower() {
        // The Blue shortcut is faster with a 1 minute penalty but needs two changes.
        let network = network();
        let fastest = fastest_path(&network, "A", "E", 1.0).unwrap();
        let fewest = fewest_transfers_path(&network, "A", "E", 1.0).unwrap();

        assert_eq!(fastest.transfers(), 2);
        assert_eq!(fewest.transfers(), 0);
        assert_eq!(station_names(&network, &fewest), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn counts_one_change() {
        let network = network();
        let path = fewest_transfers_path(&network, "C", "Y", 5.0).unwrap();

        assert_eq!(station_names(&network, &path), ["C", "D", "E", "Y"]);
        assert_eq!(path.transfers(), 1);
        assert_eq!(line_changes(path.edges()), 1);
    }

    #[test]
    fn starts_on_any_line_at_origin() {
        // B is served by Red and Blue; starting on Blue costs no transfer.
        let network = network();
        let path = fewest_transfers_path(&network, "B", "X", 5.0).unwrap();

        assert_eq!(station_names(&network, &path), ["B", "X"]);
        assert_eq!(path.transfers(), 0);
    }

    #[test]
    fn ties_on_transfers_broken_by_time() {
        // Two single-line routes from P to Q; the shorter one wins.
        let mut network = network();
        network
            .add_line(line("Slow", &[("P", "M", 10.0), ("M", "Q", 10.0)]))
            .unwrap();
        network
            .add_line(line("Quick", &[("P", "N", 2.0), ("N", "Q", 2.0)]))
            .unwrap();

        let path = fewest_transfers_path(&network, "P", "Q", 5.0).unwrap();
        assert_eq!(station_names(&network, &path), ["P", "N", "Q"]);
        assert_eq!(path.transfers(), 0);
    }

    #[test]
    fn path_is_contiguous() {
        let network = network();
        let path = fewest_transfers_path(&network, "X", "Y", 5.0).unwrap();
        for pair in path.edges().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(path.edges()[0].from, network.station_id("X").unwrap());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{Line, LineSegment};
    use crate::planner::fastest::fastest_path;
    use crate::planner::path::line_changes;
    use proptest::prelude::*;

    const STATIONS: usize = 8;

    /// Up to five lines, each a walk over a handful of the eight stations.
    fn arb_network() -> impl Strategy<Value = Network> {
        let hop = (0..STATIONS, 0.5f64..10.0);
        let line = (0..STATIONS, prop::collection::vec(hop, 1..5));
        prop::collection::vec(line, 1..5).prop_map(|lines| {
            let mut network = Network::new();
            for (n, (first, hops)) in lines.into_iter().enumerate() {
                let mut from = first;
                let mut segments = Vec::new();
                for (to, km) in hops {
                    if to == from {
                        continue;
                    }
                    segments.push(LineSegment::new(format!("S{from}"), format!("S{to}"), km));
                    from = to;
                }
                if segments.is_empty() {
                    continue;
                }
                let id = LineId::new(format!("L{n}"));
                network.add_line(Line::from_segments(id, 40.0, segments)).unwrap();
            }
            network
        })
    }

    proptest! {
        #[test]
        fn fastest_is_never_slower(
            network in arb_network(),
            a in 0..STATIONS,
            b in 0..STATIONS,
            penalty in 0.0f64..10.0,
        ) {
            let (start, end) = (format!("S{a}"), format!("S{b}"));
            let fastest = fastest_path(&network, &start, &end, penalty);
            let fewest = fewest_transfers_path(&network, &start, &end, penalty);

            prop_assert_eq!(fastest.is_some(), fewest.is_some());
            if let (Some(fastest), Some(fewest)) = (fastest, fewest) {
                prop_assert!(
                    fastest.riding_minutes(penalty) <= fewest.riding_minutes(penalty) + 1e-9
                );
                prop_assert!(fewest.transfers() <= fastest.transfers());
            }
        }

        #[test]
        fn paths_are_contiguous_and_count_changes(
            network in arb_network(),
            a in 0..STATIONS,
            b in 0..STATIONS,
        ) {
            let (start, end) = (format!("S{a}"), format!("S{b}"));
            for path in [
                fastest_path(&network, &start, &end, 5.0),
                fewest_transfers_path(&network, &start, &end, 5.0),
            ]
            .into_iter()
            .flatten()
            {
                let edges = path.edges();
                prop_assert_eq!(network.station_name(edges[0].from), start.as_str());
                prop_assert_eq!(network.station_name(edges[edges.len() - 1].to), end.as_str());
                for pair in edges.windows(2) {
                    prop_assert_eq!(pair[0].to, pair[1].from);
                }
                prop_assert_eq!(path.transfers(), line_changes(edges));
            }
        }
    }
}
