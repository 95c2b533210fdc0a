//! Route planning over the metro network.
//!
//! Two searches answer the same question with different priorities:
//! [`fastest_path`] minimises total time, [`fewest_transfers_path`] minimises
//! changes of line first and time second. The [`Planner`] wraps either one,
//! anchoring the resulting path to a clock time using the timetable and
//! pricing it with the distance tariff.

mod assemble;
mod config;
mod fare;
mod fastest;
mod fewest_transfers;
mod overrides;
mod path;

#[cfg(test)]
mod test_network;

pub use assemble::{Criterion, Planner, RouteError, RouteRequest};
pub use config::{RoutingConfig, ServiceWindow};
pub use fare::fare;
pub use fastest::fastest_path;
pub use fewest_transfers::fewest_transfers_path;
pub use overrides::{RouteOverride, RouteOverrides};
pub use path::{RoutePath, line_changes};
