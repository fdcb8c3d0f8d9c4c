use futures::{Stream, StreamExt};

use crate::config::MapConfig;
use crate::controller::PositionController;
use crate::loader::CatalogSource;
use crate::models::LocationEvent;
use crate::view::MapSurface;

/// Load the catalog, then follow the location stream until it ends.
///
/// `subscribe` is only called once the load attempt has finished. It returns
/// `None` when no location provider is available.
pub async fn run_session<S, F, E>(
    source: &CatalogSource,
    config: &MapConfig,
    surface: &mut S,
    subscribe: F,
) -> PositionController<S>
where
    S: MapSurface,
    F: FnOnce() -> Option<E>,
    E: Stream<Item = LocationEvent> + Unpin,
{
    let catalog = source.load().await;
    let mut controller = PositionController::new(catalog, config.recenter);

    let Some(events) = subscribe() else {
        tracing::error!("Geolocation is not supported by this browser");
        return controller;
    };

    follow(&mut controller, surface, events).await;
    controller
}

/// Apply each event to completion before taking the next one.
pub async fn follow<S, E>(controller: &mut PositionController<S>, surface: &mut S, mut events: E)
where
    S: MapSurface,
    E: Stream<Item = LocationEvent> + Unpin,
{
    while let Some(event) = events.next().await {
        controller.handle(surface, event);
    }
    tracing::info!("Location stream closed");
}
