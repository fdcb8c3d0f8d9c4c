use radar_shared::config::TileLayer;
use radar_shared::models::LatLng;

/// Web Mercator cannot represent the poles.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 19;

/// Size of the whole world in pixels at `zoom`.
pub fn world_size(zoom: u8, tile_size: u32) -> f64 {
    tile_size as f64 * 2f64.powi(zoom as i32)
}

/// Project to global Web Mercator pixel coordinates at `zoom` (origin top-left).
pub fn project(at: LatLng, zoom: u8, tile_size: u32) -> (f64, f64) {
    let size = world_size(zoom, tile_size);
    let lat = at.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (at.lng + 180.0) / 360.0 * size;
    let y = (1.0 - lat.tan().asinh() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: u8, tile_size: u32) -> LatLng {
    let size = world_size(zoom, tile_size);
    let lng = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    LatLng::new(n.sinh().atan().to_degrees(), lng)
}

/// Viewport pixel position of `at` for a view centered on `center`.
pub fn to_viewport(
    at: LatLng,
    center: LatLng,
    zoom: u8,
    viewport: (f64, f64),
    tile_size: u32,
) -> (f64, f64) {
    let (px, py) = project(at, zoom, tile_size);
    let (cx, cy) = project(center, zoom, tile_size);
    (px - cx + viewport.0 / 2.0, py - cy + viewport.1 / 2.0)
}

/// New view center after dragging the map by `(dx, dy)` pixels.
pub fn pan_by(center: LatLng, zoom: u8, dx: f64, dy: f64, tile_size: u32) -> LatLng {
    let (cx, cy) = project(center, zoom, tile_size);
    let size = world_size(zoom, tile_size);
    let y = (cy - dy).clamp(0.0, size);
    unproject(cx - dx, y, zoom, tile_size)
}

/// One base tile placed in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSlot {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    /// Offset of the tile's top-left corner in viewport pixels.
    pub left: f64,
    pub top: f64,
}

/// Tiles needed to cover the viewport. Columns wrap around the antimeridian,
/// rows outside the world are skipped.
pub fn visible_tiles(center: LatLng, zoom: u8, viewport: (f64, f64), tile_size: u32) -> Vec<TileSlot> {
    let ts = tile_size as f64;
    let (cx, cy) = project(center, zoom, tile_size);
    let origin_x = cx - viewport.0 / 2.0;
    let origin_y = cy - viewport.1 / 2.0;

    let first_col = (origin_x / ts).floor() as i64;
    let last_col = ((origin_x + viewport.0) / ts).floor() as i64;
    let first_row = (origin_y / ts).floor() as i64;
    let last_row = ((origin_y + viewport.1) / ts).floor() as i64;
    let tiles_per_axis = 1i64 << zoom;

    let mut slots = Vec::new();
    for row in first_row..=last_row {
        if row < 0 || row >= tiles_per_axis {
            continue;
        }
        for col in first_col..=last_col {
            slots.push(TileSlot {
                x: col.rem_euclid(tiles_per_axis) as u32,
                y: row as u32,
                z: zoom,
                left: col as f64 * ts - origin_x,
                top: row as f64 * ts - origin_y,
            });
        }
    }
    slots
}

/// Fill in the layer's URL template for one tile.
pub fn tile_url(layer: &TileLayer, slot: &TileSlot) -> String {
    let subdomain = if layer.subdomains.is_empty() {
        String::new()
    } else {
        let idx = (slot.x as usize + slot.y as usize) % layer.subdomains.len();
        layer.subdomains[idx].to_string()
    };
    layer
        .url_template
        .replace("{s}", &subdomain)
        .replace("{z}", &slot.z.to_string())
        .replace("{x}", &slot.x.to_string())
        .replace("{y}", &slot.y.to_string())
}
