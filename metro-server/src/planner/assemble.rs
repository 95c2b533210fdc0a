//! Turns a raw edge path into a time-anchored itinerary.

use chrono::NaiveTime;
use tracing::debug;

use crate::domain::{DomainError, Itinerary, ItineraryTotals, RideSegment};
use crate::network::{Edge, Network};
use crate::timetable::{LineDirections, Timetable, WaitTime};

use super::config::RoutingConfig;
use super::fare::fare;
use super::fastest::fastest_path;
use super::fewest_transfers::fewest_transfers_path;
use super::overrides::RouteOverrides;
use super::path::RoutePath;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Unknown station, no connecting path, or start equal to end
    #[error("no route from {start} to {end}")]
    NoRoute { start: String, end: String },

    /// Assembled segments failed validation
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(#[from] DomainError),
}

/// What to optimise for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Least total time
    FastestTime,
    /// Fewest changes of line, then least time
    FewestTransfers,
}

/// A routing query.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
    /// Matched verbatim against timetable and override keys
    pub day_type: String,
    pub query_time: NaiveTime,
}

impl RouteRequest {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        day_type: impl Into<String>,
        query_time: NaiveTime,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            day_type: day_type.into(),
            query_time,
        }
    }

    fn no_route(&self) -> RouteError {
        RouteError::NoRoute {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

/// Route planner over a borrowed network snapshot.
pub struct Planner<'a> {
    network: &'a Network,
    timetable: &'a Timetable,
    directions: &'a LineDirections,
    overrides: &'a RouteOverrides,
    config: &'a RoutingConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(
        network: &'a Network,
        timetable: &'a Timetable,
        directions: &'a LineDirections,
        overrides: &'a RouteOverrides,
        config: &'a RoutingConfig,
    ) -> Self {
        Self {
            network,
            timetable,
            directions,
            overrides,
            config,
        }
    }

    /// Plan a route.
    ///
    /// While the network is closed, or once the first train has gone, the
    /// result is the no-service sentinel rather than an error.
    pub fn plan(
        &self,
        request: &RouteRequest,
        criterion: Criterion,
    ) -> Result<Itinerary, RouteError> {
        let departure = request.query_time;

        if self.config.closure.is_closed(departure) {
            debug!(time = %departure, "network closed");
            return Ok(Itinerary::no_service(departure));
        }

        if criterion == Criterion::FewestTransfers
            && let Some(found) = self
                .overrides
                .find(&request.day_type, &request.start, &request.end)
        {
            debug!(start = %request.start, end = %request.end, "using route override");
            return Ok(found.itinerary(departure)?);
        }

        let penalty = self.config.transfer_penalty_mins;
        let path = match criterion {
            Criterion::FastestTime => {
                fastest_path(self.network, &request.start, &request.end, penalty)
            }
            Criterion::FewestTransfers => {
                fewest_transfers_path(self.network, &request.start, &request.end, penalty)
            }
        }
        .ok_or_else(|| request.no_route())?;

        let wait = match self.wait(&path, &request.day_type, departure) {
            WaitTime::Minutes(m) => m,
            WaitTime::NoMoreService => {
                debug!(time = %departure, "no more service today");
                return Ok(Itinerary::no_service(departure));
            }
        };

        let distance_km = path.distance_km();
        let minutes = path.riding_minutes(penalty)
            + self.config.dwell_mins * path.len() as f64
            + f64::from(wait);
        let totals = ItineraryTotals {
            distance_km,
            minutes: minutes.round() as u32,
            transfers: path.transfers(),
            fare: fare(distance_km),
        };

        debug!(
            ?criterion,
            start = %request.start,
            end = %request.end,
            edges = path.len(),
            wait,
            minutes = totals.minutes,
            transfers = totals.transfers,
            "route planned"
        );

        Ok(Itinerary::new(self.segments(&path), totals, departure)?)
    }

    /// Wait for the first train, keyed by the direction of the first edge's
    /// line at the boarding station.
    fn wait(&self, path: &RoutePath<'_>, day_type: &str, at: NaiveTime) -> WaitTime {
        let Some(first) = path.edges().first() else {
            return WaitTime::Minutes(0);
        };
        let board = self.network.station_name(first.from);
        let line = first.line.as_str();
        match self.directions.direction_for(&first.line, board) {
            Some(direction) => self.timetable.wait(day_type, line, direction, board, at),
            None => WaitTime::Minutes(0),
        }
    }

    /// One ride segment per run of consecutive edges on the same line.
    fn segments(&self, path: &RoutePath<'_>) -> Vec<RideSegment> {
        path.edges()
            .chunk_by(|a, b| a.line == b.line)
            .map(|run| self.ride(run))
            .collect()
    }

    fn ride(&self, run: &[&Edge]) -> RideSegment {
        // chunk_by never yields an empty run
        let first = run[0];
        let last = run[run.len() - 1];
        let board = self.network.station_name(first.from);
        let alight = self.network.station_name(last.to);
        let minutes: f64 = run.iter().map(|e| e.travel_minutes).sum();

        let segment = RideSegment::new(first.line.clone(), board, alight, minutes.round() as u32);
        match self.directions.direction_for(&first.line, board) {
            Some(direction) => segment.with_direction(direction),
            None => segment,
        }
    }
}
