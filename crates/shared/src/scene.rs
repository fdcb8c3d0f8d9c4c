//! Retained map scene.
//!
//! Holds the view and the markers placed through [`MapSurface`]; a renderer
//! draws whatever is in here.

use std::collections::BTreeMap;

use crate::models::LatLng;
use crate::view::{self, MapSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    Radar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    pub kind: MarkerKind,
    pub position: LatLng,
    /// Bound popup text. User markers derive theirs from `position`.
    pub label: Option<String>,
}

impl SceneMarker {
    pub fn popup(&self) -> String {
        match (&self.label, self.kind) {
            (Some(label), _) => label.clone(),
            (None, MarkerKind::User) => view::user_label(self.position),
            (None, MarkerKind::Radar) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    center: LatLng,
    zoom: u8,
    markers: BTreeMap<MarkerId, SceneMarker>,
    next_id: u64,
}

impl MapScene {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        MapScene {
            center,
            zoom,
            markers: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&SceneMarker> {
        self.markers.get(&id)
    }

    /// All markers in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &SceneMarker)> {
        self.markers.iter().map(|(id, m)| (*id, m))
    }

    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = (MarkerId, &SceneMarker)> {
        self.markers().filter(move |(_, m)| m.kind == kind)
    }

    fn insert(&mut self, marker: SceneMarker) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, marker);
        id
    }
}

impl MapSurface for MapScene {
    type Marker = MarkerId;

    fn add_user_marker(&mut self, at: LatLng) -> MarkerId {
        self.insert(SceneMarker {
            kind: MarkerKind::User,
            position: at,
            label: None,
        })
    }

    fn add_radar_marker(&mut self, at: LatLng, label: &str) -> MarkerId {
        self.insert(SceneMarker {
            kind: MarkerKind::Radar,
            position: at,
            label: Some(label.to_string()),
        })
    }

    fn move_marker(&mut self, marker: &MarkerId, to: LatLng) {
        if let Some(m) = self.markers.get_mut(marker) {
            m.position = to;
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }
}
