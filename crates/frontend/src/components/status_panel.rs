use dioxus::prelude::*;
use radar_shared::catalog::DEFAULT_RADIUS_KM;
use radar_shared::scene::{MapScene, MarkerKind};

/// One-line summary of what the map currently shows.
pub fn status_text(scene: &MapScene) -> String {
    if scene.markers_of(MarkerKind::User).next().is_none() {
        return "Waiting for your position…".to_string();
    }
    match scene.markers_of(MarkerKind::Radar).count() {
        0 => format!("No radar within {} km", DEFAULT_RADIUS_KM),
        1 => format!("1 radar within {} km", DEFAULT_RADIUS_KM),
        n => format!("{} radars within {} km", n, DEFAULT_RADIUS_KM),
    }
}

#[component]
pub fn StatusPanel(scene: Signal<MapScene>) -> Element {
    let text = status_text(&scene.read());
    rsx! {
        div { class: "status-panel", "{text}" }
    }
}
