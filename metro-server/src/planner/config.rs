//! Routing configuration for the planner.

use chrono::NaiveTime;

/// Daily window during which no trains run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    /// First closed minute (inclusive)
    pub closes_at: NaiveTime,
    /// First open minute after the closure (exclusive end of the closure)
    pub reopens_at: NaiveTime,
}

impl ServiceWindow {
    /// Returns true if the network is closed at `time`.
    pub fn is_closed(&self, time: NaiveTime) -> bool {
        time >= self.closes_at && time < self.reopens_at
    }
}

/// Configuration parameters for route planning.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Minutes added for each change of line.
    pub transfer_penalty_mins: f64,

    /// Minutes spent standing at each station passed through.
    /// Charged once per traversed edge.
    pub dwell_mins: f64,

    /// Nominal speed (km/h) for lines without one of their own.
    pub default_speed_kmh: f64,

    /// Nightly closure.
    pub closure: ServiceWindow,
}

impl RoutingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_penalty_mins: f64,
        dwell_mins: f64,
        default_speed_kmh: f64,
        closure: ServiceWindow,
    ) -> Self {
        Self {
            transfer_penalty_mins,
            dwell_mins,
            default_speed_kmh,
            closure,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_mins: 5.0,
            dwell_mins: 1.0,
            default_speed_kmh: 40.0,
            closure: ServiceWindow {
                closes_at: NaiveTime::from_hms_opt(1, 0, 0).expect("01:00 is a valid time"),
                reopens_at: NaiveTime::from_hms_opt(4, 30, 0).expect("04:30 is a valid time"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn default_config() {
        let config = RoutingConfig::default();

        assert_eq!(config.transfer_penalty_mins, 5.0);
        assert_eq!(config.dwell_mins, 1.0);
        assert_eq!(config.default_speed_kmh, 40.0);
        assert_eq!(config.closure.closes_at, time(1, 0));
        assert_eq!(config.closure.reopens_at, time(4, 30));
    }

    #[test]
    fn closure_bounds() {
        let closure = RoutingConfig::default().closure;

        assert!(!closure.is_closed(time(0, 59)));
        assert!(closure.is_closed(time(1, 0)));
        assert!(closure.is_closed(time(2, 0)));
        assert!(closure.is_closed(NaiveTime::from_hms_opt(4, 29, 59).unwrap()));
        assert!(!closure.is_closed(time(4, 30)));
        assert!(!closure.is_closed(time(12, 0)));
    }

    #[test]
    fn custom_config() {
        let closure = ServiceWindow {
            closes_at: time(0, 30),
            reopens_at: time(5, 0),
        };
        let config = RoutingConfig::new(3.0, 0.5, 60.0, closure);

        assert_eq!(config.transfer_penalty_mins, 3.0);
        assert_eq!(config.dwell_mins, 0.5);
        assert_eq!(config.default_speed_kmh, 60.0);
        assert!(config.closure.is_closed(time(0, 45)));
    }
}
