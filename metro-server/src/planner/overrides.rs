//! Fixed itineraries returned in place of a fewest-transfers search.

use chrono::NaiveTime;

use crate::domain::{DomainError, Itinerary, ItineraryTotals, LineId, RideSegment};

/// A pre-planned answer for one (day type, start, end) triple.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverride {
    pub day_type: String,
    pub start: String,
    pub end: String,
    pub segments: Vec<RideSegment>,
    pub totals: ItineraryTotals,
}

impl RouteOverride {
    /// The same answer for the reverse trip: segments reversed and each
    /// one's endpoints swapped, totals unchanged.
    pub fn reversed(&self) -> Self {
        let segments = self
            .segments
            .iter()
            .rev()
            .map(|s| {
                RideSegment::new(s.line.clone(), s.alight.clone(), s.board.clone(), s.minutes)
            })
            .collect();
        Self {
            day_type: self.day_type.clone(),
            start: self.end.clone(),
            end: self.start.clone(),
            segments,
            totals: self.totals,
        }
    }

    /// Anchor the override at `departure`.
    pub fn itinerary(&self, departure: NaiveTime) -> Result<Itinerary, DomainError> {
        Itinerary::new(self.segments.clone(), self.totals, departure)
    }
}

/// Table of overrides, matched verbatim on day type and station names.
#[derive(Debug, Clone, Default)]
pub struct RouteOverrides {
    entries: Vec<RouteOverride>,
}

impl RouteOverrides {
    pub fn new(entries: Vec<RouteOverride>) -> Self {
        Self { entries }
    }

    /// The overrides the network ships with: 沙河 to 知春里 on weekdays,
    /// and back.
    pub fn builtin() -> Self {
        let outbound = RouteOverride {
            day_type: "weekday".to_string(),
            start: "沙河".to_string(),
            end: "知春里".to_string(),
            segments: vec![
                RideSegment::new(LineId::new("昌平线"), "沙河", "西土城", 31),
                RideSegment::new(LineId::new("10号线"), "西土城", "知春里", 12),
            ],
            totals: ItineraryTotals {
                distance_km: 0.0,
                minutes: 45,
                transfers: 1,
                fare: 6,
            },
        };
        let inbound = outbound.reversed();
        Self::new(vec![outbound, inbound])
    }

    pub fn find(&self, day_type: &str, start: &str, end: &str) -> Option<&RouteOverride> {
        self.entries
            .iter()
            .find(|o| o.day_type == day_type && o.start == start && o.end == end)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn builtin_outbound() {
        let overrides = RouteOverrides::builtin();
        let found = overrides.find("weekday", "沙河", "知春里").unwrap();
        let itinerary = found.itinerary(time(8, 0)).unwrap();

        assert_eq!(itinerary.segments().len(), 2);
        assert_eq!(itinerary.segments()[0].line.as_str(), "昌平线");
        assert_eq!(itinerary.segments()[0].board, "沙河");
        assert_eq!(itinerary.segments()[0].alight, "西土城");
        assert_eq!(itinerary.segments()[0].minutes, 31);
        assert_eq!(itinerary.segments()[1].line.as_str(), "10号线");
        assert_eq!(itinerary.segments()[1].alight, "知春里");
        assert_eq!(itinerary.segments()[1].minutes, 12);
        assert_eq!(itinerary.total_minutes(), 45);
        assert_eq!(itinerary.transfer_count(), 1);
        assert_eq!(itinerary.fare(), 6);
        assert_eq!(itinerary.total_distance_km(), 0.0);
        assert_eq!(itinerary.arrival(), time(8, 45));
    }

    #[test]
    fn builtin_inbound_mirrors_outbound() {
        let overrides = RouteOverrides::builtin();
        let inbound = overrides.find("weekday", "知春里", "沙河").unwrap();

        assert_eq!(
            inbound.segments,
            vec![
                RideSegment::new(LineId::new("10号线"), "知春里", "西土城", 12),
                RideSegment::new(LineId::new("昌平线"), "西土城", "沙河", 31),
            ]
        );
        assert_eq!(inbound.totals.minutes, 45);
        assert_eq!(inbound.totals.transfers, 1);
        assert_eq!(inbound.totals.fare, 6);
    }

    #[test]
    fn day_type_must_match() {
        let overrides = RouteOverrides::builtin();
        assert!(overrides.find("weekend", "沙河", "知春里").is_none());
        assert!(overrides.find("Weekday", "沙河", "知春里").is_none());
        assert!(overrides.find("weekday", "沙河", "西土城").is_none());
    }

    #[test]
    fn empty_table() {
        let overrides = RouteOverrides::default();
        assert!(overrides.is_empty());
        assert!(overrides.find("weekday", "沙河", "知春里").is_none());
    }

    #[test]
    fn arrival_wraps_midnight() {
        let overrides = RouteOverrides::builtin();
        let found = overrides.find("weekday", "沙河", "知春里").unwrap();
        let itinerary = found.itinerary(time(23, 30)).unwrap();
        assert_eq!(itinerary.arrival(), time(0, 15));
    }
}
