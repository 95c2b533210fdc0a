//! Distance-banded fare tariff.

/// Fare in yuan for a trip of `distance_km`.
///
/// Up to 6 km costs 3, up to 12 km costs 4, up to 22 km costs 5, up to
/// 32 km costs 6; beyond that each started 20 km adds 1.
///
/// # Examples
///
/// ```
/// use metro_server::planner::fare;
///
/// assert_eq!(fare(6.0), 3);
/// assert_eq!(fare(6.01), 4);
/// assert_eq!(fare(52.0), 7);
/// ```
pub fn fare(distance_km: f64) -> u32 {
    if distance_km <= 6.0 {
        3
    } else if distance_km <= 12.0 {
        4
    } else if distance_km <= 22.0 {
        5
    } else if distance_km <= 32.0 {
        6
    } else {
        6 + ((distance_km - 32.0) / 20.0).ceil() as u32
    }
}
