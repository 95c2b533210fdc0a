//! Itinerary types.
//!
//! An [`Itinerary`] is the answer to a routing query: the rides to take,
//! anchored to a departure clock time, with totals and fare.

use chrono::NaiveTime;

use super::time::add_minutes;
use super::{DomainError, LineId};

/// One ride on a single line between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct RideSegment {
    /// Line ridden
    pub line: LineId,
    /// Direction label from the line-direction table, when known
    pub direction: Option<String>,
    /// Boarding station
    pub board: String,
    /// Alighting station
    pub alight: String,
    /// Riding time in minutes
    pub minutes: u32,
}

impl RideSegment {
    /// Create a ride segment with no direction label.
    pub fn new(
        line: LineId,
        board: impl Into<String>,
        alight: impl Into<String>,
        minutes: u32,
    ) -> Self {
        Self {
            line,
            direction: None,
            board: board.into(),
            alight: alight.into(),
            minutes,
        }
    }

    /// Set the direction label.
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }
}

/// A time-anchored route from start to end.
///
/// # Invariants
///
/// - Consecutive segments connect (alighting station = next boarding station)
/// - `arrival` is `departure` plus `total_minutes`, wrapping past midnight
///
/// An itinerary with no segments is the no-service sentinel: the network is
/// closed at the query time, or the first train has already left for the day.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    segments: Vec<RideSegment>,
    total_distance_km: f64,
    total_minutes: u32,
    transfer_count: usize,
    departure: NaiveTime,
    arrival: NaiveTime,
    fare: u32,
}

/// Totals for an itinerary, bundled for a cleaner constructor signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItineraryTotals {
    pub distance_km: f64,
    pub minutes: u32,
    pub transfers: usize,
    pub fare: u32,
}

impl Itinerary {
    /// Constructs an itinerary departing at `departure`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if consecutive segments don't connect.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_server::domain::{Itinerary, ItineraryTotals, LineId, RideSegment};
    /// use chrono::NaiveTime;
    ///
    /// let segments = vec![
    ///     RideSegment::new(LineId::new("昌平线"), "沙河", "西土城", 31),
    ///     RideSegment::new(LineId::new("10号线"), "西土城", "知春里", 12),
    /// ];
    /// let totals = ItineraryTotals { distance_km: 0.0, minutes: 45, transfers: 1, fare: 6 };
    /// let departure = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    ///
    /// let itinerary = Itinerary::new(segments, totals, departure).unwrap();
    /// assert_eq!(itinerary.arrival(), NaiveTime::from_hms_opt(8, 45, 0).unwrap());
    /// ```
    pub fn new(
        segments: Vec<RideSegment>,
        totals: ItineraryTotals,
        departure: NaiveTime,
    ) -> Result<Self, DomainError> {
        for window in segments.windows(2) {
            if window[0].alight != window[1].board {
                return Err(DomainError::SegmentsNotConnected {
                    alight: window[0].alight.clone(),
                    board: window[1].board.clone(),
                });
            }
        }

        Ok(Self {
            segments,
            total_distance_km: totals.distance_km,
            total_minutes: totals.minutes,
            transfer_count: totals.transfers,
            departure,
            arrival: add_minutes(departure, totals.minutes),
            fare: totals.fare,
        })
    }

    /// The no-service sentinel: no segments, zero totals, arrival equal to
    /// departure.
    pub fn no_service(at: NaiveTime) -> Self {
        Self {
            segments: Vec::new(),
            total_distance_km: 0.0,
            total_minutes: 0,
            transfer_count: 0,
            departure: at,
            arrival: at,
            fare: 0,
        }
    }

    /// Returns true for the no-service sentinel.
    pub fn is_no_service(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[RideSegment] {
        &self.segments
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn transfer_count(&self) -> usize {
        self.transfer_count
    }

    pub fn departure(&self) -> NaiveTime {
        self.departure
    }

    pub fn arrival(&self) -> NaiveTime {
        self.arrival
    }

    pub fn fare(&self) -> u32 {
        self.fare
    }

    /// Returns the boarding station of the first ride.
    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.board.as_str())
    }

    /// Returns the alighting station of the last ride.
    pub fn destination(&self) -> Option<&str> {
        self.segments.last().map(|s| s.alight.as_str())
    }
}
