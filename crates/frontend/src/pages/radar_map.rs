use dioxus::prelude::*;
use radar_shared::config::{MapConfig, MapVariant, WatchOptions};
use radar_shared::loader::CatalogSource;
use radar_shared::scene::MapScene;
use radar_shared::session;

use crate::components::map_view::MapView;
use crate::components::status_panel::StatusPanel;
use crate::geolocation;
use crate::surface::SignalSurface;

#[component]
pub fn RadarMap(variant: MapVariant) -> Element {
    let config = use_hook(|| MapConfig::for_variant(variant));
    let scene = use_signal(|| MapScene::new(config.initial_center, config.initial_zoom));

    // Load the catalog, then follow the user for the rest of the page's life
    let session_config = config.clone();
    use_future(move || {
        let config = session_config.clone();
        async move {
            let source = CatalogSource::default();
            let options = WatchOptions::default();
            let mut surface = SignalSurface::new(scene);
            session::run_session(&source, &config, &mut surface, || {
                geolocation::subscribe(&options)
            })
            .await;
        }
    });

    let title = config.variant.title();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "{title}" }
                StatusPanel { scene: scene }
            }
            MapView { scene: scene, tiles: config.tiles.clone() }
        }
    }
}
