//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, RideSegment, Station, format_hhmm};
use crate::network::{Line, NewLine};

/// Query parameters for both path endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    pub start: String,
    pub end: String,

    /// Timetable day type (defaults to "weekday")
    #[serde(default = "default_day_type")]
    pub day_type: String,

    /// Time in HH:MM format (defaults to now)
    pub query_time: Option<String>,
}

fn default_day_type() -> String {
    "weekday".to_string()
}

/// Body of `POST /line`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEditRequest {
    pub line_id: String,
    #[serde(default)]
    pub stations: Vec<String>,
    /// Kilometres between consecutive stations
    #[serde(default)]
    pub distances: Vec<f64>,
    /// km/h; the default speed applies when absent
    pub speed: Option<f64>,
}

impl From<LineEditRequest> for NewLine {
    fn from(req: LineEditRequest) -> Self {
        NewLine {
            id: req.line_id,
            stations: req.stations,
            distances_km: req.distances,
            speed_kmh: req.speed,
        }
    }
}

/// A planned route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub segments: Vec<SegmentResponse>,
    /// Kilometres
    pub total_distance: f64,
    /// Minutes, including the initial wait
    pub total_time: u32,
    /// Yuan
    pub fare: u32,
    pub transfer_count: usize,
    pub departure_time: String,
    pub arrival_time: String,
}

/// One ride in a planned route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentResponse {
    pub line_id: String,
    pub direction: Option<String>,
    pub start_station: String,
    pub end_station: String,
    /// Minutes
    pub time: u32,
}

/// A line in the network listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub line_id: String,
    pub stations: Vec<String>,
    pub distances: Vec<f64>,
    pub speed: f64,
}

/// A station in the network listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    pub name: String,
    pub line_ids: Vec<String>,
    pub is_transfer: bool,
}

/// Acknowledgement for line edits.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&RideSegment> for SegmentResponse {
    fn from(segment: &RideSegment) -> Self {
        Self {
            line_id: segment.line.to_string(),
            direction: segment.direction.clone(),
            start_station: segment.board.clone(),
            end_station: segment.alight.clone(),
            time: segment.minutes,
        }
    }
}

impl From<&Itinerary> for ItineraryResponse {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            segments: itinerary.segments().iter().map(SegmentResponse::from).collect(),
            total_distance: itinerary.total_distance_km(),
            total_time: itinerary.total_minutes(),
            fare: itinerary.fare(),
            transfer_count: itinerary.transfer_count(),
            departure_time: format_hhmm(itinerary.departure()),
            arrival_time: format_hhmm(itinerary.arrival()),
        }
    }
}

impl From<&Line> for LineResponse {
    fn from(line: &Line) -> Self {
        Self {
            line_id: line.id().to_string(),
            stations: line.stations().into_iter().map(str::to_string).collect(),
            distances: line.distances_km(),
            speed: line.speed_kmh(),
        }
    }
}

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            line_ids: station.line_ids().iter().map(|l| l.to_string()).collect(),
            is_transfer: station.is_transfer(),
        }
    }
}
