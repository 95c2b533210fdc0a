//! Small network shared by the planner tests.
//!
//! ```text
//! Red:   A --4-- B --4-- C --4-- D --4-- E
//! Blue:          B --1-- X --1-- D
//! Green:                                 E --2-- Y
//! Isle:  Island --1-- Islet
//! ```
//!
//! All lines run at 40 km/h, so each kilometre takes 1.5 minutes.

use crate::domain::LineId;
use crate::network::{Line, LineSegment, Network};

use super::path::RoutePath;

pub(crate) fn line(id: &str, hops: &[(&str, &str, f64)]) -> Line {
    let segments = hops
        .iter()
        .map(|&(from, to, km)| LineSegment::new(from, to, km))
        .collect();
    Line::from_segments(LineId::new(id), 40.0, segments)
}

pub(crate) fn network() -> Network {
    let mut network = Network::new();
    for line in [
        line(
            "Red",
            &[
                ("A", "B", 4.0),
                ("B", "C", 4.0),
                ("C", "D", 4.0),
                ("D", "E", 4.0),
            ],
        ),
        line("Blue", &[("B", "X", 1.0), ("X", "D", 1.0)]),
        line("Green", &[("E", "Y", 2.0)]),
        line("Isle", &[("Island", "Islet", 1.0)]),
    ] {
        network.add_line(line).unwrap();
    }
    network
}

/// Station names visited by `path`, origin first.
pub(crate) fn station_names<'a>(network: &'a Network, path: &RoutePath<'_>) -> Vec<&'a str> {
    let mut names = Vec::new();
    if let Some(first) = path.edges().first() {
        names.push(network.station_name(first.from));
    }
    names.extend(path.edges().iter().map(|e| network.station_name(e.to)));
    names
}
