//! On-disk record shapes and their conversion into network and direction
//! types.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::LineId;
use crate::network::{Line, LineSegment, Network};
use crate::timetable::{Direction, LineDirection, LineDirections};

use super::error::LoadError;

/// One row of `station_distance_final.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DistanceRecord {
    pub start_station: String,
    pub end_station: String,
    /// Metres
    pub distance: f64,
}

/// One entry of `line_direction_startAndEnd.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineDirectionRecord {
    pub line_id: String,
    #[serde(default)]
    pub directions: Vec<DirectionRecord>,
}

/// The start terminus is sometimes a list or null in the source data; only a
/// plain string is kept. The end terminus is not used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DirectionRecord {
    pub direction: String,
    #[serde(default)]
    pub start_station: Value,
}

/// Build the network from the line list and the per-line distance records.
///
/// Lines are added in list order. Records for lines not in the list are
/// ignored; a listed line with no records exists with no segments. A line
/// listed twice keeps its first occurrence.
///
/// A negative or non-finite distance on a listed line is an error.
pub(crate) fn build_network(
    line_ids: &[String],
    mut distances: HashMap<String, Vec<DistanceRecord>>,
    speed_kmh: f64,
) -> Result<Network, LoadError> {
    let mut network = Network::new();

    for id in line_ids {
        let segments = distances
            .remove(id)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                if !r.distance.is_finite() || r.distance < 0.0 {
                    return Err(LoadError::InvalidDistance {
                        line: id.clone(),
                        index,
                        value: r.distance,
                    });
                }
                Ok(LineSegment::new(r.start_station, r.end_station, r.distance / 1000.0))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let line = Line::from_segments(LineId::new(id.as_str()), speed_kmh, segments);
        if let Err(e) = network.add_line(line) {
            warn!(line = %id, error = %e, "skipping line");
        }
    }

    for id in distances.keys() {
        warn!(line = %id, "distance records for unlisted line ignored");
    }

    Ok(network)
}

pub(crate) fn build_directions(records: Vec<LineDirectionRecord>) -> LineDirections {
    let entries = records
        .into_iter()
        .map(|record| LineDirection {
            line: LineId::new(record.line_id),
            directions: record
                .directions
                .into_iter()
                .map(|d| Direction {
                    label: d.direction,
                    start_station: d.start_station.as_str().map(str::to_string),
                })
                .collect(),
        })
        .collect();
    LineDirections::new(entries)
}
