use crate::models::{LatLng, RadarRecord};

/// Capabilities the controller needs from a map renderer.
///
/// Tiles and attribution are the renderer's own business; the controller only
/// places markers and moves the view.
pub trait MapSurface {
    type Marker;

    /// Add the user's position marker. Its popup shows its current coordinates.
    fn add_user_marker(&mut self, at: LatLng) -> Self::Marker;

    /// Add a radar marker with the given popup label.
    fn add_radar_marker(&mut self, at: LatLng, label: &str) -> Self::Marker;

    fn move_marker(&mut self, marker: &Self::Marker, to: LatLng);

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Center the view on `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Center the view on `center` keeping the current zoom.
    fn pan_to(&mut self, center: LatLng);
}

/// Popup text for a radar marker, one field per line.
pub fn radar_label(radar: &RadarRecord) -> String {
    format!(
        "Type: {}\nID: {}\nCoordinates: {}, {}",
        radar.type_label, radar.id, radar.lat, radar.lng
    )
}

/// Popup text for the user marker.
pub fn user_label(at: LatLng) -> String {
    format!("Coordinates: {}, {}", at.lat, at.lng)
}

/// Markers currently on the surface on behalf of the controller.
#[derive(Debug)]
pub struct MapViewState<M> {
    user_marker: Option<M>,
    radar_markers: Vec<M>,
}

impl<M> Default for MapViewState<M> {
    fn default() -> Self {
        MapViewState {
            user_marker: None,
            radar_markers: Vec::new(),
        }
    }
}

impl<M> MapViewState<M> {
    pub fn user_marker(&self) -> Option<&M> {
        self.user_marker.as_ref()
    }

    pub fn radar_markers(&self) -> &[M] {
        &self.radar_markers
    }

    /// Create the user marker on first use, move it afterwards.
    pub fn place_user<S>(&mut self, surface: &mut S, at: LatLng)
    where
        S: MapSurface<Marker = M>,
    {
        match &self.user_marker {
            Some(marker) => surface.move_marker(marker, at),
            None => self.user_marker = Some(surface.add_user_marker(at)),
        }
    }

    /// Drop every radar marker and draw `radars` in their place.
    ///
    /// Records without finite coordinates are not drawn.
    pub fn replace_radars<'a, S, I>(&mut self, surface: &mut S, radars: I)
    where
        S: MapSurface<Marker = M>,
        I: IntoIterator<Item = &'a RadarRecord>,
    {
        for marker in self.radar_markers.drain(..) {
            surface.remove_marker(marker);
        }

        for radar in radars {
            if !radar.has_valid_coordinates() {
                continue;
            }
            let marker = surface.add_radar_marker(radar.position(), &radar_label(radar));
            self.radar_markers.push(marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MapScene, MarkerKind};

    #[test]
    fn test_radar_label_format() {
        let radar = RadarRecord::new(7, 48.5, 2.25, "fixed");
        assert_eq!(radar_label(&radar), "Type: fixed\nID: 7\nCoordinates: 48.5, 2.25");
    }

    #[test]
    fn test_user_label_format() {
        assert_eq!(user_label(LatLng::new(1.5, -2.0)), "Coordinates: 1.5, -2");
    }

    #[test]
    fn test_place_user_creates_once_then_moves() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut view = MapViewState::default();

        view.place_user(&mut scene, LatLng::new(1.0, 1.0));
        let first = *view.user_marker().unwrap();
        view.place_user(&mut scene, LatLng::new(2.0, 2.0));

        assert_eq!(*view.user_marker().unwrap(), first);
        assert_eq!(scene.markers_of(MarkerKind::User).count(), 1);
        assert_eq!(scene.marker(first).unwrap().position, LatLng::new(2.0, 2.0));
    }

    #[test]
    fn test_replace_radars_removes_previous_markers() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut view = MapViewState::default();
        let a = RadarRecord::new(1, 48.0, 2.0, "fixed");
        let b = RadarRecord::new(2, 48.1, 2.1, "mobile");

        view.replace_radars(&mut scene, [&a, &b]);
        assert_eq!(scene.markers_of(MarkerKind::Radar).count(), 2);

        view.replace_radars(&mut scene, [&b]);
        assert_eq!(view.radar_markers().len(), 1);
        let labels: Vec<&str> = scene
            .markers_of(MarkerKind::Radar)
            .filter_map(|(_, m)| m.label.as_deref())
            .collect();
        assert_eq!(labels, vec!["Type: mobile\nID: 2\nCoordinates: 48.1, 2.1"]);
    }

    #[test]
    fn test_replace_radars_skips_invalid_coordinates() {
        let mut scene = MapScene::new(LatLng::new(0.0, 0.0), 13);
        let mut view = MapViewState::default();
        let bad = RadarRecord::new(1, f64::NAN, 2.0, "fixed");
        let good = RadarRecord::new(2, 48.0, 2.0, "fixed");

        view.replace_radars(&mut scene, [&bad, &good]);
        assert_eq!(view.radar_markers().len(), 1);
        assert_eq!(scene.len(), 1);
    }
}
