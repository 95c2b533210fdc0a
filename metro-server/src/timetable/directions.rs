//! Line direction table.
//!
//! Each line runs in named directions (e.g. "东行"/"西行", "内环"/"外环"),
//! each starting at a terminus. The timetable is keyed by direction, so the
//! planner maps a boarding station to a direction through this table.

use crate::domain::LineId;

/// One named direction of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub label: String,
    /// Terminus the direction starts from, if recorded as a single name
    pub start_station: Option<String>,
}

/// All directions of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDirection {
    pub line: LineId,
    pub directions: Vec<Direction>,
}

/// The static line-direction table.
#[derive(Debug, Clone, Default)]
pub struct LineDirections {
    entries: Vec<LineDirection>,
}

impl LineDirections {
    pub fn new(entries: Vec<LineDirection>) -> Self {
        Self { entries }
    }

    /// Direction label for boarding `line` at `station`.
    ///
    /// Returns the first direction, across all entries for the line, whose
    /// start station is `station`. Boarding anywhere other than a recorded
    /// start station has no direction.
    pub fn direction_for(&self, line: &LineId, station: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|entry| &entry.line == line)
            .flat_map(|entry| &entry.directions)
            .find(|d| d.start_station.as_deref() == Some(station))
            .map(|d| d.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
