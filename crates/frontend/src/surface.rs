use dioxus::prelude::*;
use radar_shared::models::LatLng;
use radar_shared::scene::{MapScene, MarkerId};
use radar_shared::view::MapSurface;

/// Map surface backed by the page's scene signal; every write re-renders the map.
pub struct SignalSurface {
    scene: Signal<MapScene>,
}

impl SignalSurface {
    pub fn new(scene: Signal<MapScene>) -> Self {
        SignalSurface { scene }
    }
}

impl MapSurface for SignalSurface {
    type Marker = MarkerId;

    fn add_user_marker(&mut self, at: LatLng) -> MarkerId {
        self.scene.write().add_user_marker(at)
    }

    fn add_radar_marker(&mut self, at: LatLng, label: &str) -> MarkerId {
        self.scene.write().add_radar_marker(at, label)
    }

    fn move_marker(&mut self, marker: &MarkerId, to: LatLng) {
        self.scene.write().move_marker(marker, to);
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.scene.write().remove_marker(marker);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.scene.write().set_view(center, zoom);
    }

    fn pan_to(&mut self, center: LatLng) {
        self.scene.write().pan_to(center);
    }
}
