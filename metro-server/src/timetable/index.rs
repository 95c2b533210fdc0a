//! Departure-time index.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::domain::minutes_between;

/// (day type, line, direction, station)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DepartureKey {
    day_type: String,
    line: String,
    direction: String,
    station: String,
}

impl DepartureKey {
    fn new(day_type: &str, line: &str, direction: &str, station: &str) -> Self {
        Self {
            day_type: day_type.to_string(),
            line: line.to_string(),
            direction: direction.to_string(),
            station: station.to_string(),
        }
    }
}

/// How long a passenger waits for the first train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTime {
    /// Minutes until the next departure; zero when the timetable has no data
    Minutes(u32),
    /// Service has not started yet, or the last train has gone
    NoMoreService,
}

/// Departure times per (day type, line, direction, station).
///
/// Every list is sorted at insertion, so lookups never re-sort.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    departures: HashMap<DepartureKey, Vec<NaiveTime>>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the departures for a key.
    pub fn insert(
        &mut self,
        day_type: &str,
        line: &str,
        direction: &str,
        station: &str,
        mut times: Vec<NaiveTime>,
    ) {
        times.sort();
        self.departures
            .insert(DepartureKey::new(day_type, line, direction, station), times);
    }

    /// Sorted departures for a key; empty if the key is unknown.
    pub fn departures(
        &self,
        day_type: &str,
        line: &str,
        direction: &str,
        station: &str,
    ) -> &[NaiveTime] {
        self.departures
            .get(&DepartureKey::new(day_type, line, direction, station))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve the wait for the first departure at or after `at`.
    ///
    /// A missing or empty list imposes no constraint and yields a zero wait.
    /// A query before the first departure of the day, or after the last one,
    /// yields [`WaitTime::NoMoreService`].
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_server::timetable::{Timetable, WaitTime};
    /// use metro_server::domain::parse_hhmm;
    ///
    /// let mut timetable = Timetable::new();
    /// timetable.insert("工作日", "10号线", "外环", "巴沟", vec![
    ///     parse_hhmm("05:30").unwrap(),
    ///     parse_hhmm("05:40").unwrap(),
    /// ]);
    ///
    /// let wait = timetable.wait("工作日", "10号线", "外环", "巴沟", parse_hhmm("05:33").unwrap());
    /// assert_eq!(wait, WaitTime::Minutes(7));
    /// ```
    pub fn wait(
        &self,
        day_type: &str,
        line: &str,
        direction: &str,
        station: &str,
        at: NaiveTime,
    ) -> WaitTime {
        let departures = self.departures(day_type, line, direction, station);

        let Some(&first) = departures.first() else {
            return WaitTime::Minutes(0);
        };
        if at < first {
            return WaitTime::NoMoreService;
        }

        let next = departures.partition_point(|&d| d < at);
        match departures.get(next) {
            Some(&departure) => {
                let minutes = minutes_between(at, departure);
                WaitTime::Minutes(u32::try_from(minutes).unwrap_or(0))
            }
            None => WaitTime::NoMoreService,
        }
    }

    /// Number of (day, line, direction, station) entries.
    pub fn len(&self) -> usize {
        self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}
