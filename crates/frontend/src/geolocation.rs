use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use radar_shared::config::WatchOptions;
use radar_shared::models::{LocationError, LocationEvent, UserPosition};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

/// Start a continuous position watch feeding a channel.
///
/// The callbacks stay registered for the rest of the page's life.
pub fn watch_position(
    options: &WatchOptions,
    tx: UnboundedSender<LocationEvent>,
) -> Result<i32, String> {
    let geolocation = web_sys::window()
        .ok_or("no window")?
        .navigator()
        .geolocation()
        .map_err(|e| format!("{:?}", e))?;

    let fix_tx = tx.clone();
    let on_fix = Closure::<dyn FnMut(GeolocationPosition)>::new(move |pos: GeolocationPosition| {
        let coords = pos.coords();
        let event = LocationEvent::Fix(UserPosition::new(coords.latitude(), coords.longitude()));
        let _ = fix_tx.unbounded_send(event);
    });

    let on_error =
        Closure::<dyn FnMut(GeolocationPositionError)>::new(move |err: GeolocationPositionError| {
            let event = LocationEvent::Failure(LocationError::from_code(err.code()));
            let _ = tx.unbounded_send(event);
        });

    let js_options = PositionOptions::new();
    js_options.set_enable_high_accuracy(options.enable_high_accuracy);
    js_options.set_maximum_age(options.maximum_age_ms);
    js_options.set_timeout(options.timeout_ms);

    let watch_id = geolocation
        .watch_position_with_error_callback_and_options(
            on_fix.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &js_options,
        );

    on_fix.forget();
    on_error.forget();
    Ok(watch_id)
}

/// Open the location stream, or `None` if the browser has no geolocation.
pub fn subscribe(options: &WatchOptions) -> Option<UnboundedReceiver<LocationEvent>> {
    let (tx, rx) = mpsc::unbounded();
    match watch_position(options, tx) {
        Ok(watch_id) => {
            tracing::info!(watch_id, "Watching position");
            Some(rx)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not start position watch");
            None
        }
    }
}
