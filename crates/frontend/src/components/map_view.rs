use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use radar_shared::config::TileLayer;
use radar_shared::scene::{MapScene, MarkerId, MarkerKind};
use radar_shared::view::MapSurface;

use crate::coords;

const MAP_CONTAINER_ID: &str = "radar-map-container";

/// Used until the container has been measured.
const DEFAULT_VIEWPORT: (f64, f64) = (960.0, 640.0);

/// Drag threshold in pixels. Smaller movements count as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Click distance (viewport pixels) within which a marker is hit.
const HIT_RADIUS: f64 = 16.0;

const USER_RADIUS: f64 = 8.0;
const USER_COLOR: &str = "#3388ff";
const RADAR_COLOR: &str = "#d7263d";
const RADAR_SELECTED_COLOR: &str = "#ff9f1c";

/// Pin height; the head of the pin sits this far above the radar position.
const PIN_HEAD_OFFSET: f64 = 20.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Usable viewport for a measured container; hidden or collapsed containers report nothing.
fn measured_viewport(width: f64, height: f64) -> Option<(f64, f64)> {
    (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        .then_some((width, height))
}

fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

// ---------------------------------------------------------------------------
// Marker layout (pure functions, easily testable)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct PlacedMarker {
    id: MarkerId,
    kind: MarkerKind,
    /// Anchor in viewport pixels (the geographic point).
    x: f64,
    y: f64,
}

impl PlacedMarker {
    /// Point that receives clicks and anchors the popup.
    fn head(&self) -> (f64, f64) {
        match self.kind {
            MarkerKind::User => (self.x, self.y),
            MarkerKind::Radar => (self.x, self.y - PIN_HEAD_OFFSET),
        }
    }
}

fn place_markers(scene: &MapScene, viewport: (f64, f64), tile_size: u32) -> Vec<PlacedMarker> {
    scene
        .markers()
        .map(|(id, m)| {
            let (x, y) = coords::to_viewport(m.position, scene.center(), scene.zoom(), viewport, tile_size);
            PlacedMarker { id, kind: m.kind, x, y }
        })
        .collect()
}

/// Nearest marker head within `threshold` of `click`.
fn find_marker(markers: &[PlacedMarker], click: (f64, f64), threshold: f64) -> Option<MarkerId> {
    let mut best = None;
    let mut best_dist = threshold;
    for marker in markers {
        let (hx, hy) = marker.head();
        let dist = ((hx - click.0).powi(2) + (hy - click.1).powi(2)).sqrt();
        if dist < best_dist {
            best_dist = dist;
            best = Some(marker.id);
        }
    }
    best
}

/// Split a popup label into `(field, value)` rows. Lines without a field name
/// come back with an empty field.
fn popup_rows(label: &str) -> Vec<(String, String)> {
    label
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((field, value)) => (field.to_string(), value.to_string()),
            None => (String::new(), line.to_string()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

fn build_marker_svg(markers: &[PlacedMarker], viewport: (f64, f64), selected: Option<MarkerId>) -> String {
    let mut svg = String::with_capacity(256 + markers.len() * 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="position:absolute;top:0;left:0;pointer-events:none;z-index:5;">"#,
        w = viewport.0,
        h = viewport.1
    ));

    // Radars first so the user marker stays on top
    for marker in markers.iter().filter(|m| m.kind == MarkerKind::Radar) {
        build_radar_pin(&mut svg, marker, selected == Some(marker.id));
    }
    for marker in markers.iter().filter(|m| m.kind == MarkerKind::User) {
        build_user_circle(&mut svg, marker, selected == Some(marker.id));
    }

    svg.push_str("</svg>");
    svg
}

fn build_user_circle(svg: &mut String, marker: &PlacedMarker, selected: bool) {
    let (x, y) = (marker.x, marker.y);
    let sw = if selected { 4.0 } else { 3.0 };
    svg.push_str(&format!(
        r#"<circle cx="{x}" cy="{y}" r="{USER_RADIUS}" fill="{USER_COLOR}" fill-opacity="0.5" stroke="{USER_COLOR}" stroke-width="{sw}"/>"#
    ));
}

fn build_radar_pin(svg: &mut String, marker: &PlacedMarker, selected: bool) {
    let (x, y) = (marker.x, marker.y);
    let fill = if selected { RADAR_SELECTED_COLOR } else { RADAR_COLOR };
    let head = PIN_HEAD_OFFSET;
    svg.push_str(&format!(
        r##"<g transform="translate({x},{y})"><path d="M0 0 C-4 -7 -9 -12 -9 -{head} A9 9 0 1 1 9 -{head} C9 -12 4 -7 0 0 Z" fill="{fill}" stroke="#ffffff" stroke-width="1.5"/><circle cx="0" cy="-{head}" r="3.5" fill="#ffffff"/></g>"##
    ));
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(scene: Signal<MapScene>, tiles: TileLayer) -> Element {
    // Mutable binding for drag/zoom writes (Signal is Copy)
    let mut scene = scene;
    let mut viewport = use_signal(|| DEFAULT_VIEWPORT);
    let mut selected = use_signal(|| None::<MarkerId>);

    // Drag state
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_center = use_signal(|| scene.read().center());

    let tile_size = tiles.tile_size;
    let vp = *viewport.read();
    let current = scene.read();
    let center = current.center();
    let zoom = current.zoom();

    let tile_slots: Vec<(String, String, String)> = coords::visible_tiles(center, zoom, vp, tile_size)
        .iter()
        .map(|slot| {
            let key = format!("{}/{}/{}@{}", slot.z, slot.x, slot.y, slot.left.round() as i64);
            let style = format!(
                "left: {}px; top: {}px; width: {tile_size}px; height: {tile_size}px;",
                slot.left, slot.top
            );
            (key, coords::tile_url(&tiles, slot), style)
        })
        .collect();

    let placed = place_markers(&current, vp, tile_size);
    let cur_selected = *selected.read();
    let svg_html = build_marker_svg(&placed, vp, cur_selected);

    // Popup for the selected marker, if it is still on the map
    let popup = cur_selected.and_then(|id| {
        let marker = current.marker(id)?;
        let head = placed.iter().find(|p| p.id == id)?.head();
        let offset = match marker.kind {
            MarkerKind::User => USER_RADIUS + 4.0,
            MarkerKind::Radar => 13.0,
        };
        Some((head.0, head.1 - offset, popup_rows(&marker.popup())))
    });
    drop(current);

    let container_class = if *is_dragging.read() && *did_drag.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onmounted: move |_| {
                if let Some(vp) = container_rect().and_then(|r| measured_viewport(r.width(), r.height())) {
                    viewport.set(vp);
                }
            },

            onresize: move |evt: Event<ResizeData>| {
                if let Ok(size) = evt.data().get_border_box_size() {
                    if let Some(vp) = measured_viewport(size.width, size.height) {
                        viewport.set(vp);
                    }
                }
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                let (center, zoom) = {
                    let s = scene.read();
                    (s.center(), s.zoom())
                };
                let new_zoom = if delta_y < 0.0 {
                    zoom.saturating_add(1).min(coords::MAX_ZOOM)
                } else {
                    zoom.saturating_sub(1).max(coords::MIN_ZOOM)
                };
                if new_zoom != zoom {
                    scene.write().set_view(center, new_zoom);
                }
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_center.set(scene.read().center());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let (sx, sy) = *drag_start.read();
                let dx = client.x - sx;
                let dy = client.y - sy;

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let zoom = scene.read().zoom();
                    let start_center = *drag_start_center.read();
                    scene
                        .write()
                        .pan_to(coords::pan_by(start_center, zoom, dx, dy, tile_size));
                }
            },

            onmouseup: move |evt: Event<MouseData>| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);

                // A mouseup without drag movement = a click
                if was_dragging && !was_drag {
                    let Some(rect) = container_rect() else { return };
                    let client = evt.client_coordinates();
                    let click = (client.x - rect.left(), client.y - rect.top());
                    let hit = {
                        let markers = place_markers(&scene.read(), *viewport.read(), tile_size);
                        find_marker(&markers, click, HIT_RADIUS)
                    };
                    let current = *selected.read();
                    selected.set(match hit {
                        Some(id) if current == Some(id) => None,
                        other => other,
                    });
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            div { class: "tile-layer",
                for (key, src, style) in tile_slots {
                    img {
                        key: "{key}",
                        class: "tile",
                        src: "{src}",
                        style: "{style}",
                        draggable: "false",
                        alt: "",
                    }
                }
            }

            div { class: "marker-layer", dangerous_inner_html: "{svg_html}" }

            if let Some((x, y, rows)) = popup {
                div {
                    class: "marker-popup",
                    style: "left: {x}px; top: {y}px;",
                    for (field, value) in rows {
                        div { class: "popup-row",
                            if !field.is_empty() {
                                b { "{field}:" }
                                " "
                            }
                            "{value}"
                        }
                    }
                }
            }

            div { class: "attribution",
                "© "
                a { href: "{tiles.attribution_url}", target: "_blank", "{tiles.attribution}" }
                " contributors"
            }
        }
    }
}
