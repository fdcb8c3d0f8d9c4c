use crate::catalog::{RadarCatalog, DEFAULT_RADIUS_KM};
use crate::config::RecenterPolicy;
use crate::models::{LocationError, LocationEvent, UserPosition};
use crate::view::{MapSurface, MapViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    AwaitingFirstFix,
    Tracking,
}

/// Session state driven by the location stream.
///
/// Owns the catalog and the markers it has put on the surface. Every fix
/// redraws the nearby radars from scratch.
pub struct PositionController<S: MapSurface> {
    catalog: RadarCatalog,
    recenter: RecenterPolicy,
    view: MapViewState<S::Marker>,
    last_position: Option<UserPosition>,
}

impl<S: MapSurface> PositionController<S> {
    pub fn new(catalog: RadarCatalog, recenter: RecenterPolicy) -> Self {
        PositionController {
            catalog,
            recenter,
            view: MapViewState::default(),
            last_position: None,
        }
    }

    pub fn state(&self) -> TrackingState {
        if self.view.user_marker().is_some() {
            TrackingState::Tracking
        } else {
            TrackingState::AwaitingFirstFix
        }
    }

    pub fn catalog(&self) -> &RadarCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &MapViewState<S::Marker> {
        &self.view
    }

    pub fn last_position(&self) -> Option<UserPosition> {
        self.last_position
    }

    pub fn handle(&mut self, surface: &mut S, event: LocationEvent) {
        match event {
            LocationEvent::Fix(position) => self.on_fix(surface, position),
            LocationEvent::Failure(error) => self.on_failure(error),
        }
    }

    pub fn on_fix(&mut self, surface: &mut S, position: UserPosition) {
        let at = position.lat_lng();

        self.view.place_user(surface, at);
        match self.recenter {
            RecenterPolicy::Pan => surface.pan_to(at),
            RecenterPolicy::Recenter { zoom } => surface.set_view(at, zoom),
        }

        let nearby = self
            .catalog
            .within(position.latitude, position.longitude, DEFAULT_RADIUS_KM);
        tracing::debug!(
            lat = position.latitude,
            lng = position.longitude,
            nearby = nearby.len(),
            "Position update"
        );
        self.view.replace_radars(surface, nearby);
        self.last_position = Some(position);
    }

    /// Failures leave the map untouched.
    pub fn on_failure(&mut self, error: LocationError) {
        tracing::error!(reason = %error, "Geolocation failed: {}", error.describe());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatLng, RadarRecord};
    use crate::scene::{MapScene, MarkerKind};
    use tracing_test::traced_test;

    fn paris_catalog() -> RadarCatalog {
        RadarCatalog::new(vec![
            RadarRecord::new(1, 48.8566, 2.3522, "fixed"),
            RadarRecord::new(2, 45.0, 0.0, "mobile"),
            RadarRecord::new(3, 48.8600, 2.3600, "feu rouge"),
        ])
    }

    fn radar_snapshot(scene: &MapScene) -> Vec<(LatLng, String)> {
        scene
            .markers_of(MarkerKind::Radar)
            .map(|(_, m)| (m.position, m.popup()))
            .collect()
    }

    #[test]
    fn test_first_fix_moves_to_tracking() {
        let mut scene = MapScene::new(LatLng::new(46.603354, 1.888334), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);
        assert_eq!(controller.state(), TrackingState::AwaitingFirstFix);

        controller.handle(
            &mut scene,
            LocationEvent::Fix(UserPosition::new(48.8566, 2.3522)),
        );

        assert_eq!(controller.state(), TrackingState::Tracking);
        assert_eq!(scene.markers_of(MarkerKind::User).count(), 1);
        assert_eq!(scene.markers_of(MarkerKind::Radar).count(), 2);
    }

    #[test]
    fn test_user_marker_is_reused_across_fixes() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        controller.on_fix(&mut scene, UserPosition::new(48.8566, 2.3522));
        let marker = *controller.view().user_marker().unwrap();
        controller.on_fix(&mut scene, UserPosition::new(45.0, 0.0));

        assert_eq!(*controller.view().user_marker().unwrap(), marker);
        let (_, user) = scene.markers_of(MarkerKind::User).next().unwrap();
        assert_eq!(user.position, LatLng::new(45.0, 0.0));
        assert_eq!(scene.markers_of(MarkerKind::User).count(), 1);
    }

    #[test]
    fn test_radar_markers_follow_latest_fix() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        controller.on_fix(&mut scene, UserPosition::new(48.8566, 2.3522));
        controller.on_fix(&mut scene, UserPosition::new(45.0, 0.0));

        let radars = radar_snapshot(&scene);
        assert_eq!(radars.len(), 1);
        assert_eq!(radars[0].1, "Type: mobile\nID: 2\nCoordinates: 45, 0");
        assert_eq!(controller.view().radar_markers().len(), 1);
    }

    #[test]
    fn test_repeated_fix_is_idempotent() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);
        let here = UserPosition::new(48.8566, 2.3522);

        controller.on_fix(&mut scene, here);
        let first = radar_snapshot(&scene);
        let total = scene.len();
        controller.on_fix(&mut scene, here);

        assert_eq!(radar_snapshot(&scene), first);
        assert_eq!(scene.len(), total);
    }

    #[test]
    fn test_pan_policy_keeps_zoom() {
        let mut scene = MapScene::new(LatLng::new(46.603354, 1.888334), 6);
        let mut controller = PositionController::new(RadarCatalog::empty(), RecenterPolicy::Pan);

        controller.on_fix(&mut scene, UserPosition::new(48.0, 2.0));

        assert_eq!(scene.center(), LatLng::new(48.0, 2.0));
        assert_eq!(scene.zoom(), 6);
    }

    #[test]
    fn test_recenter_policy_sets_zoom() {
        let mut scene = MapScene::new(LatLng::new(46.603354, 1.888334), 6);
        let mut controller = PositionController::new(
            RadarCatalog::empty(),
            RecenterPolicy::Recenter { zoom: 13 },
        );

        controller.on_fix(&mut scene, UserPosition::new(48.0, 2.0));

        assert_eq!(scene.center(), LatLng::new(48.0, 2.0));
        assert_eq!(scene.zoom(), 13);
    }

    #[test]
    fn test_permission_denied_before_first_fix() {
        let mut scene = MapScene::new(LatLng::new(46.603354, 1.888334), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);
        let before = scene.clone();

        controller.handle(
            &mut scene,
            LocationEvent::Failure(LocationError::PermissionDenied),
        );

        assert_eq!(scene, before);
        assert_eq!(controller.state(), TrackingState::AwaitingFirstFix);
    }

    #[test]
    fn test_failure_while_tracking_changes_nothing() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);
        controller.on_fix(&mut scene, UserPosition::new(48.8566, 2.3522));
        let before = scene.clone();

        for error in [
            LocationError::PermissionDenied,
            LocationError::PositionUnavailable,
            LocationError::Timeout,
            LocationError::Unknown,
        ] {
            controller.handle(&mut scene, LocationEvent::Failure(error));
        }

        assert_eq!(scene, before);
        assert_eq!(controller.state(), TrackingState::Tracking);
        assert_eq!(
            controller.last_position(),
            Some(UserPosition::new(48.8566, 2.3522))
        );
    }

    #[test]
    fn test_keeps_listening_after_timeout() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        controller.handle(&mut scene, LocationEvent::Failure(LocationError::Timeout));
        controller.handle(
            &mut scene,
            LocationEvent::Fix(UserPosition::new(48.8566, 2.3522)),
        );

        assert_eq!(controller.state(), TrackingState::Tracking);
        assert_eq!(scene.markers_of(MarkerKind::Radar).count(), 2);
    }

    #[test]
    #[traced_test]
    fn test_failure_logs_reason_category() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        controller.handle(
            &mut scene,
            LocationEvent::Failure(LocationError::PermissionDenied),
        );

        assert!(logs_contain("Geolocation failed"));
        assert!(logs_contain("permission denied"));
        assert!(logs_contain("user denied the request for geolocation"));
    }

    #[test]
    #[traced_test]
    fn test_every_failure_category_is_logged() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        for error in [
            LocationError::PositionUnavailable,
            LocationError::Timeout,
            LocationError::Unknown,
        ] {
            controller.handle(&mut scene, LocationEvent::Failure(error));
        }

        assert!(logs_contain("position unavailable"));
        assert!(logs_contain("the request to get user location timed out"));
        assert!(logs_contain("an unknown geolocation error occurred"));
    }

    #[test]
    #[traced_test]
    fn test_fix_does_not_log_failure() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut controller = PositionController::new(paris_catalog(), RecenterPolicy::Pan);

        controller.on_fix(&mut scene, UserPosition::new(48.8566, 2.3522));

        assert!(!logs_contain("Geolocation failed"));
    }
}
