//! Departure-time tree parsing.
//!
//! The source file is a loosely typed tree
//! `day type -> line -> direction -> station -> value`, where a station value
//! is either an object whose values are `HH:MM` strings or one
//! comma-separated string. Everything is normalised here so the timetable
//! only ever holds sorted clock times.

use chrono::NaiveTime;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{TimeError, parse_hhmm};
use crate::timetable::Timetable;

/// Build a timetable from the parsed departure-time tree.
///
/// Non-object nodes are skipped, and so are station values of any other JSON
/// type. A station value containing any time that does not parse is dropped
/// with a warning; lookups for it then impose no wait.
pub(crate) fn build_timetable(tree: &Value) -> Timetable {
    let mut timetable = Timetable::new();

    for (day_type, lines) in objects(tree) {
        for (line, directions) in objects(lines) {
            for (direction, stations) in objects(directions) {
                for (station, value) in objects(stations) {
                    match station_times(value) {
                        Ok(Some(times)) if !times.is_empty() => {
                            timetable.insert(day_type, line, direction, station, times);
                        }
                        Ok(_) => {}
                        Err(e) => warn!(
                            day_type = %day_type,
                            line = %line,
                            direction = %direction,
                            station = %station,
                            error = %e,
                            "dropping malformed departures"
                        ),
                    }
                }
            }
        }
    }

    debug!(entries = timetable.len(), "built timetable");
    timetable
}

/// Entries of an object node; nothing for any other node.
fn objects(value: &Value) -> impl Iterator<Item = (&str, &Value)> {
    value
        .as_object()
        .into_iter()
        .flat_map(Map::iter)
        .map(|(k, v)| (k.as_str(), v))
}

/// Times for one station value, or `None` for a value of an unusable type.
fn station_times(value: &Value) -> Result<Option<Vec<NaiveTime>>, TimeError> {
    match value {
        Value::Object(map) => {
            let mut times = Vec::with_capacity(map.len());
            for entry in map.values() {
                let Some(s) = entry.as_str() else {
                    return Err(TimeError::new("departure is not a string"));
                };
                if let Some(time) = parse_entry(s)? {
                    times.push(time);
                }
            }
            Ok(Some(times))
        }
        Value::String(s) => {
            let mut times = Vec::new();
            for part in s.split(',') {
                if let Some(time) = parse_entry(part)? {
                    times.push(time);
                }
            }
            Ok(Some(times))
        }
        _ => Ok(None),
    }
}

fn parse_entry(s: &str) -> Result<Option<NaiveTime>, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    parse_hhmm(s).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::WaitTime;
    use serde_json::json;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn object_values_are_sorted() {
        let tree = json!({
            "工作日": {"1号线/八通线": {"东行": {"古城": {"2": "05:20", "1": "05:10", "3": " "}}}}
        });
        let timetable = build_timetable(&tree);

        assert_eq!(
            timetable.departures("工作日", "1号线/八通线", "东行", "古城"),
            [time(5, 10), time(5, 20)]
        );
    }

    #[test]
    fn comma_separated_string() {
        let tree = json!({
            "双休日": {"10号线": {"外环": {"巴沟": "06:05, 05:55,,06:15"}}}
        });
        let timetable = build_timetable(&tree);

        assert_eq!(
            timetable.departures("双休日", "10号线", "外环", "巴沟"),
            [time(5, 55), time(6, 5), time(6, 15)]
        );
    }

    #[test]
    fn malformed_value_is_dropped() {
        let tree = json!({
            "工作日": {"2号线": {"内环": {
                "西直门": "05:10,5:20",
                "积水潭": {"1": 510},
                "鼓楼大街": "05:12"
            }}}
        });
        let timetable = build_timetable(&tree);

        assert!(timetable.departures("工作日", "2号线", "内环", "西直门").is_empty());
        assert!(timetable.departures("工作日", "2号线", "内环", "积水潭").is_empty());
        assert_eq!(timetable.len(), 1);
        assert_eq!(
            timetable.wait("工作日", "2号线", "内环", "西直门", time(23, 0)),
            WaitTime::Minutes(0)
        );
    }

    #[test]
    fn other_node_types_are_ignored() {
        let tree = json!({
            "工作日": {
                "1号线": "not a table",
                "2号线": {"内环": [1, 2, 3], "外环": {"西直门": 42, "车公庄": null}}
            },
            "节假日": 7
        });
        let timetable = build_timetable(&tree);
        assert!(timetable.is_empty());
    }

    #[test]
    fn non_object_root() {
        assert!(build_timetable(&json!([1, 2])).is_empty());
    }
}
