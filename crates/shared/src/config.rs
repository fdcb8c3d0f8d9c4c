use crate::models::LatLng;

/// Geographic center of metropolitan France.
pub const FRANCE_CENTER: LatLng = LatLng::new(46.603354, 1.888334);

pub const LOCAL_ZOOM: u8 = 13;
pub const NATIONAL_ZOOM: u8 = 6;

/// How the view follows the user on each fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecenterPolicy {
    /// Pan to the fix, keep the current zoom.
    Pan,
    /// Jump to the fix at a fixed zoom.
    Recenter { zoom: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapVariant {
    Local,
    National,
}

impl MapVariant {
    pub fn title(&self) -> &'static str {
        match self {
            MapVariant::Local => "Radars near you",
            MapVariant::National => "Radars in France",
        }
    }
}

/// Base tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// `{s}`, `{z}`, `{x}` and `{y}` are substituted per tile.
    pub url_template: String,
    pub subdomains: Vec<char>,
    pub attribution: String,
    pub attribution_url: String,
    pub tile_size: u32,
}

impl Default for TileLayer {
    fn default() -> Self {
        TileLayer {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!['a', 'b', 'c'],
            attribution: "OpenStreetMap".to_string(),
            attribution_url: "https://www.openstreetmap.org/copyright".to_string(),
            tile_size: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub variant: MapVariant,
    pub initial_center: LatLng,
    pub initial_zoom: u8,
    pub recenter: RecenterPolicy,
    pub tiles: TileLayer,
}

impl MapConfig {
    /// City-level map that pans along with the user.
    pub fn local() -> Self {
        MapConfig {
            variant: MapVariant::Local,
            initial_center: FRANCE_CENTER,
            initial_zoom: LOCAL_ZOOM,
            recenter: RecenterPolicy::Pan,
            tiles: TileLayer::default(),
        }
    }

    /// Country-wide map that zooms in on the first and every later fix.
    pub fn national() -> Self {
        MapConfig {
            variant: MapVariant::National,
            initial_center: FRANCE_CENTER,
            initial_zoom: NATIONAL_ZOOM,
            recenter: RecenterPolicy::Recenter { zoom: LOCAL_ZOOM },
            tiles: TileLayer::default(),
        }
    }

    pub fn for_variant(variant: MapVariant) -> Self {
        match variant {
            MapVariant::Local => Self::local(),
            MapVariant::National => Self::national(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::local()
    }
}

/// Options handed to the location provider's watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
    /// 0 always asks for a fresh fix.
    pub maximum_age_ms: u32,
    pub timeout_ms: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        WatchOptions {
            enable_high_accuracy: true,
            maximum_age_ms: 0,
            timeout_ms: 5000,
        }
    }
}
