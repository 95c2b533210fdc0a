//! Reference data loading.
//!
//! The network, timetable and direction table are rebuilt from four JSON
//! files on every startup:
//!
//! - `subway_lines_final.json`: list of line ids
//! - `station_distance_final.json`: per-line station-to-station distances in metres
//! - `parsed_departure_times.json`: departure times by day type, line,
//!   direction and station
//! - `line_direction_startAndEnd.json`: each line's named directions and termini
//!
//! Any I/O or JSON error is fatal, as is a negative or non-finite distance.

mod departures;
mod error;
mod records;

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::network::Network;
use crate::timetable::{LineDirections, Timetable};

pub use error::LoadError;

use departures::build_timetable;
use records::{DistanceRecord, LineDirectionRecord, build_directions, build_network};

pub const LINES_FILE: &str = "subway_lines_final.json";
pub const DISTANCES_FILE: &str = "station_distance_final.json";
pub const DEPARTURES_FILE: &str = "parsed_departure_times.json";
pub const DIRECTIONS_FILE: &str = "line_direction_startAndEnd.json";

/// Everything built from the data directory.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub network: Network,
    pub timetable: Timetable,
    pub directions: LineDirections,
}

/// Load the reference data from `dir`.
///
/// Loaded lines run at `speed_kmh`.
pub fn load_dir(dir: &Path, speed_kmh: f64) -> Result<ReferenceData, LoadError> {
    let line_ids: Vec<String> = read_json(&dir.join(LINES_FILE))?;
    info!(count = line_ids.len(), "loaded line list");

    let distances: HashMap<String, Vec<DistanceRecord>> = read_json(&dir.join(DISTANCES_FILE))?;
    let network = build_network(&line_ids, distances, speed_kmh)?;
    info!(
        lines = network.line_count(),
        stations = network.station_count(),
        edges = network.edge_count(),
        "built network"
    );

    let tree: Value = read_json(&dir.join(DEPARTURES_FILE))?;
    let timetable = build_timetable(&tree);
    info!(entries = timetable.len(), "loaded departure times");

    let records: Vec<LineDirectionRecord> = read_json(&dir.join(DIRECTIONS_FILE))?;
    let directions = build_directions(records);
    info!(lines = directions.len(), "loaded line directions");

    Ok(ReferenceData {
        network,
        timetable,
        directions,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
