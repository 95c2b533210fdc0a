//! Lines and line drafts.

use crate::domain::LineId;

use super::error::NetworkError;

/// One inter-station hop of a line, as recorded in the reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

impl LineSegment {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance_km,
        }
    }
}

/// A metro line: an ordered run of segments ridden at a nominal speed.
///
/// Lines built through [`NewLine`] are simple paths, so they have exactly one
/// fewer distance than stations. Lines loaded from reference data keep the
/// segments as recorded; a ring line closes back on its first station and so
/// lists as many distances as stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    speed_kmh: f64,
    segments: Vec<LineSegment>,
}

impl Line {
    /// Build a line from recorded segments.
    pub fn from_segments(id: LineId, speed_kmh: f64, segments: Vec<LineSegment>) -> Self {
        Self {
            id,
            speed_kmh,
            segments,
        }
    }

    pub fn id(&self) -> &LineId {
        &self.id
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Stations in first-visited order, without duplicates.
    pub fn stations(&self) -> Vec<&str> {
        let mut stations: Vec<&str> = Vec::new();
        for segment in &self.segments {
            for name in [segment.from.as_str(), segment.to.as_str()] {
                if !stations.contains(&name) {
                    stations.push(name);
                }
            }
        }
        stations
    }

    /// Inter-station distances in km, one per segment.
    pub fn distances_km(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.distance_km).collect()
    }

    /// Minutes needed to ride `distance_km` at this line's speed.
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh * 60.0
    }
}

/// A line submitted for addition, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLine {
    pub id: String,
    pub stations: Vec<String>,
    pub distances_km: Vec<f64>,
    /// Nominal speed; the configured default applies when absent or not positive
    pub speed_kmh: Option<f64>,
}

impl NewLine {
    /// Validate the draft and build the line.
    pub fn into_line(self, default_speed_kmh: f64) -> Result<Line, NetworkError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(NetworkError::EmptyLineId);
        }

        if self.stations.len() < 2 {
            return Err(NetworkError::TooFewStations(self.stations.len()));
        }

        let expected = self.stations.len() - 1;
        if self.distances_km.len() != expected {
            return Err(NetworkError::DistanceCountMismatch {
                expected,
                actual: self.distances_km.len(),
            });
        }

        let stations: Vec<&str> = self.stations.iter().map(|s| s.trim()).collect();
        if let Some(index) = stations.iter().position(|s| s.is_empty()) {
            return Err(NetworkError::EmptyStationName(index));
        }

        for (index, &value) in self.distances_km.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(NetworkError::InvalidDistance { index, value });
            }
        }

        let speed_kmh = self
            .speed_kmh
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(default_speed_kmh);

        let segments = stations
            .windows(2)
            .zip(&self.distances_km)
            .map(|(pair, &km)| LineSegment::new(pair[0], pair[1], km))
            .collect();

        Ok(Line::from_segments(LineId::new(id), speed_kmh, segments))
    }
}
