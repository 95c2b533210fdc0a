//! The shared metro service.
//!
//! Owns the network behind a reader/writer lock together with the read-only
//! timetable, direction table, overrides and routing configuration. Route
//! queries hold a read guard for the whole search, so they always see a
//! consistent network; line edits take the write guard.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::{Itinerary, Station};
use crate::loader::ReferenceData;
use crate::network::{Line, Network, NetworkError, NewLine};
use crate::planner::{Criterion, Planner, RouteError, RouteOverrides, RouteRequest, RoutingConfig};
use crate::timetable::{LineDirections, Timetable};

/// Cheap to clone; all clones share the same network.
#[derive(Clone)]
pub struct MetroService {
    network: Arc<RwLock<Network>>,
    timetable: Arc<Timetable>,
    directions: Arc<LineDirections>,
    overrides: Arc<RouteOverrides>,
    config: Arc<RoutingConfig>,
}

impl MetroService {
    pub fn new(data: ReferenceData, overrides: RouteOverrides, config: RoutingConfig) -> Self {
        Self {
            network: Arc::new(RwLock::new(data.network)),
            timetable: Arc::new(data.timetable),
            directions: Arc::new(data.directions),
            overrides: Arc::new(overrides),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// The quickest route.
    pub async fn shortest_time_path(
        &self,
        request: &RouteRequest,
    ) -> Result<Itinerary, RouteError> {
        self.plan(request, Criterion::FastestTime).await
    }

    /// The route with the fewest changes of line.
    pub async fn least_transfer_path(
        &self,
        request: &RouteRequest,
    ) -> Result<Itinerary, RouteError> {
        self.plan(request, Criterion::FewestTransfers).await
    }

    async fn plan(
        &self,
        request: &RouteRequest,
        criterion: Criterion,
    ) -> Result<Itinerary, RouteError> {
        let network = self.network.read().await;
        Planner::new(
            &network,
            &self.timetable,
            &self.directions,
            &self.overrides,
            &self.config,
        )
        .plan(request, criterion)
    }

    /// Validate and add a line.
    pub async fn add_line(&self, new_line: NewLine) -> Result<(), NetworkError> {
        let line = new_line.into_line(self.config.default_speed_kmh)?;
        let id = line.id().clone();
        let stations = line.segments().len() + 1;

        let mut network = self.network.write().await;
        network.add_line(line)?;
        info!(line = %id, stations, "line added");
        Ok(())
    }

    /// Delete a line, returning it if it existed.
    pub async fn delete_line(&self, id: &str) -> Option<Line> {
        let mut network = self.network.write().await;
        let removed = network.delete_line(id);
        if removed.is_some() {
            info!(line = %id, "line deleted");
        }
        removed
    }

    /// Snapshot of all lines, ordered by id.
    pub async fn lines(&self) -> Vec<Line> {
        let network = self.network.read().await;
        network.lines().cloned().collect()
    }

    /// Snapshot of all stations, ordered by name.
    pub async fn stations(&self) -> Vec<Station> {
        let network = self.network.read().await;
        network.stations().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn new_line(id: &str, stations: &[&str], distances_km: &[f64]) -> NewLine {
        NewLine {
            id: id.to_string(),
            stations: stations.iter().map(|s| s.to_string()).collect(),
            distances_km: distances_km.to_vec(),
            speed_kmh: None,
        }
    }

    fn empty_service() -> MetroService {
        let data = ReferenceData {
            network: Network::new(),
            timetable: Timetable::new(),
            directions: LineDirections::default(),
        };
        MetroService::new(data, RouteOverrides::builtin(), RoutingConfig::default())
    }

    async fn service() -> MetroService {
        let service = empty_service();
        service
            .add_line(new_line("1号线", &["苹果园", "古城", "八角游乐园"], &[2.0, 2.0]))
            .await
            .unwrap();
        service
            .add_line(new_line("6号线", &["古城", "金安桥"], &[4.0]))
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn shortest_time_route() {
        let service = service().await;
        let request = RouteRequest::new("苹果园", "金安桥", "weekday", time(9, 0));
        let itinerary = service.shortest_time_path(&request).await.unwrap();

        // 3 + 6 minutes riding, one change, two stops
        assert_eq!(itinerary.total_minutes(), 16);
        assert_eq!(itinerary.transfer_count(), 1);
        assert_eq!(itinerary.fare(), 3);
        assert_eq!(itinerary.origin(), Some("苹果园"));
        assert_eq!(itinerary.destination(), Some("金安桥"));
    }

    #[tokio::test]
    async fn least_transfer_uses_override() {
        let service = service().await;
        let request = RouteRequest::new("沙河", "知春里", "weekday", time(9, 0));
        let itinerary = service.least_transfer_path(&request).await.unwrap();
        assert_eq!(itinerary.total_minutes(), 45);
    }

    #[tokio::test]
    async fn unknown_station_is_no_route() {
        let service = service().await;
        let request = RouteRequest::new("苹果园", "西单", "weekday", time(9, 0));
        let err = service.shortest_time_path(&request).await.unwrap_err();
        assert!(matches!(err, RouteError::NoRoute { .. }));
    }

    #[tokio::test]
    async fn add_line_uses_default_speed() {
        let service = service().await;
        let lines = service.lines().await;

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.speed_kmh() == 40.0));
    }

    #[tokio::test]
    async fn add_line_trims_names_and_links_stations() {
        let service = service().await;
        service
            .add_line(new_line("S1线", &[" 金安桥 ", "石厂"], &[3.0]))
            .await
            .unwrap();

        let stations = service.stations().await;
        let jinanqiao = stations.iter().find(|s| s.name() == "金安桥").unwrap();
        assert!(jinanqiao.is_transfer());
        assert!(stations.iter().any(|s| s.name() == "石厂"));
    }

    #[tokio::test]
    async fn add_duplicate_line_fails() {
        let service = service().await;
        let err = service
            .add_line(new_line("6号线", &["A", "B"], &[1.0]))
            .await
            .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateLine(_)));
    }

    #[tokio::test]
    async fn add_invalid_line_leaves_network_untouched() {
        let service = service().await;
        let err = service
            .add_line(new_line("7号线", &["A", "B", "C"], &[1.0]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            NetworkError::DistanceCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(service.lines().await.len(), 2);
    }

    #[tokio::test]
    async fn delete_line_disconnects_route() {
        let service = service().await;
        let removed = service.delete_line("6号线").await.unwrap();
        assert_eq!(removed.id().as_str(), "6号线");

        // 金安桥 stays as an orphan with no lines
        let stations = service.stations().await;
        let orphan = stations.iter().find(|s| s.name() == "金安桥").unwrap();
        assert!(orphan.line_ids().is_empty());

        let request = RouteRequest::new("苹果园", "金安桥", "weekday", time(9, 0));
        let err = service.shortest_time_path(&request).await.unwrap_err();
        assert!(matches!(err, RouteError::NoRoute { .. }));
    }

    #[tokio::test]
    async fn delete_unknown_line() {
        let service = service().await;
        assert!(service.delete_line("99号线").await.is_none());
    }

    #[tokio::test]
    async fn clones_share_network() {
        let service = empty_service();
        let other = service.clone();
        other
            .add_line(new_line("2号线", &["西直门", "积水潭"], &[1.9]))
            .await
            .unwrap();
        assert_eq!(service.lines().await.len(), 1);
    }
}
