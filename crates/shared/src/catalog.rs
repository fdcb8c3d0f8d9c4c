use crate::geo;
use crate::models::RadarRecord;

/// Search radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Every record within `radius_km` of `(lat, lng)`, in catalog order.
pub fn filter_nearby(catalog: &[RadarRecord], lat: f64, lng: f64, radius_km: f64) -> Vec<&RadarRecord> {
    catalog
        .iter()
        .filter(|radar| geo::distance_km(lat, lng, radar.lat, radar.lng) <= radius_km)
        .collect()
}

/// Read-only set of radars for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarCatalog {
    records: Vec<RadarRecord>,
}

impl RadarCatalog {
    pub fn new(records: Vec<RadarRecord>) -> Self {
        RadarCatalog { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the feed body: a JSON array of radar objects.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<RadarRecord> = serde_json::from_str(body)?;
        Ok(RadarCatalog { records })
    }

    pub fn records(&self) -> &[RadarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn within(&self, lat: f64, lng: f64, radius_km: f64) -> Vec<&RadarRecord> {
        filter_nearby(&self.records, lat, lng, radius_km)
    }

    pub fn nearby(&self, lat: f64, lng: f64) -> Vec<&RadarRecord> {
        self.within(lat, lng, DEFAULT_RADIUS_KM)
    }
}
