//! The station/edge graph.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{LineId, Station};

use super::error::NetworkError;
use super::line::Line;

/// Index of a station within a [`Network`].
///
/// Only valid for the network that issued it, and only until the next
/// mutation of that network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(usize);

impl StationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an edge within a [`Network`]; same validity rules as [`StationId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

/// A directed hop between adjacent stations on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,
    pub line: LineId,
    pub distance_km: f64,
    /// Riding time in minutes at the line's speed
    pub travel_minutes: f64,
}

/// The metro network: stations, lines and the directed edges between them.
///
/// Every segment of every line yields two edges, one per direction.
/// Stations are created on first reference and never removed; a station
/// whose last line is deleted stays in the network with no lines.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    station_index: HashMap<String, StationId>,
    lines: BTreeMap<LineId, Line>,
    edges: Vec<Edge>,
    /// Outgoing edge ids per station, indexed by `StationId`.
    outgoing: Vec<Vec<EdgeId>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, creating any stations it references and its edges.
    pub fn add_line(&mut self, line: Line) -> Result<(), NetworkError> {
        if self.lines.contains_key(line.id()) {
            return Err(NetworkError::DuplicateLine(line.id().clone()));
        }
        if let Some((index, segment)) = line
            .segments()
            .iter()
            .enumerate()
            .find(|(_, s)| !s.distance_km.is_finite() || s.distance_km < 0.0)
        {
            return Err(NetworkError::InvalidDistance {
                index,
                value: segment.distance_km,
            });
        }

        let id = line.id().clone();
        for segment in line.segments() {
            let from = self.attach(&segment.from, &id);
            let to = self.attach(&segment.to, &id);
            let travel_minutes = line.travel_minutes(segment.distance_km);

            for (a, b) in [(from, to), (to, from)] {
                let edge_id = EdgeId(self.edges.len());
                self.edges.push(Edge {
                    from: a,
                    to: b,
                    line: id.clone(),
                    distance_km: segment.distance_km,
                    travel_minutes,
                });
                self.outgoing[a.0].push(edge_id);
            }
        }

        debug!(
            line = %id,
            segments = line.segments().len(),
            stations = self.stations.len(),
            edges = self.edges.len(),
            "added line"
        );
        self.lines.insert(id, line);
        Ok(())
    }

    /// Remove a line and all of its edges.
    ///
    /// Returns the removed line, or `None` if no line has this id. Stations
    /// keep existing even if no line serves them any more.
    pub fn delete_line(&mut self, id: &str) -> Option<Line> {
        let line = self.lines.remove(id)?;

        self.edges.retain(|e| e.line.as_str() != id);
        for station in &mut self.stations {
            station.detach_line(line.id());
        }
        self.rebuild_outgoing();

        debug!(line = %line.id(), edges = self.edges.len(), "deleted line");
        Some(line)
    }

    /// Look up a station by name.
    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.station_index.get(name).copied()
    }

    /// Returns the station for an id issued by this network.
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// Returns the station name for an id issued by this network.
    pub fn station_name(&self, id: StationId) -> &str {
        self.stations[id.0].name()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Edges leaving a station, with their ids.
    pub fn outgoing(&self, station: StationId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.outgoing[station.0]
            .iter()
            .map(move |&id| (id, &self.edges[id.0]))
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.get(id)
    }

    /// All lines, ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// All stations, ordered by name.
    pub fn stations(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.stations.iter().collect();
        stations.sort_by(|a, b| a.name().cmp(b.name()));
        stations
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get or create a station and attach a line to it.
    fn attach(&mut self, name: &str, line: &LineId) -> StationId {
        let id = match self.station_index.get(name) {
            Some(&id) => id,
            None => {
                let id = StationId(self.stations.len());
                self.stations.push(Station::new(name));
                self.station_index.insert(name.to_string(), id);
                self.outgoing.push(Vec::new());
                id
            }
        };
        self.stations[id.0].attach_line(line);
        id
    }

    fn rebuild_outgoing(&mut self) {
        for list in &mut self.outgoing {
            list.clear();
        }
        for (index, edge) in self.edges.iter().enumerate() {
            self.outgoing[edge.from.0].push(EdgeId(index));
        }
    }
}
