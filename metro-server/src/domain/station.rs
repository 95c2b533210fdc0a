//! Stations.

use super::LineId;

/// A station in the network.
///
/// Identified by its name. Tracks the lines serving it in the order they
/// were first attached, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    name: String,
    line_ids: Vec<LineId>,
}

impl Station {
    /// Create a station with no lines.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_ids: Vec::new(),
        }
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lines serving this station.
    pub fn line_ids(&self) -> &[LineId] {
        &self.line_ids
    }

    /// Returns true if the given line serves this station.
    pub fn serves(&self, line: &LineId) -> bool {
        self.line_ids.contains(line)
    }

    /// Returns true if two or more lines serve this station.
    pub fn is_transfer(&self) -> bool {
        self.line_ids.len() > 1
    }

    /// Attach a line. Returns false if it was already attached.
    pub(crate) fn attach_line(&mut self, line: &LineId) -> bool {
        if self.serves(line) {
            return false;
        }
        self.line_ids.push(line.clone());
        true
    }

    /// Detach a line. Returns false if it was not attached.
    pub(crate) fn detach_line(&mut self, line: &LineId) -> bool {
        let before = self.line_ids.len();
        self.line_ids.retain(|l| l != line);
        self.line_ids.len() != before
    }
}
