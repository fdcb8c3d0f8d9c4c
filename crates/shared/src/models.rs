use serde::{Deserialize, Deserializer, Serialize};

/// Radar identifier as published by the feed: either a string or a number.
///
/// Anything else the feed sends (fractions, `null`, objects) is kept as its
/// JSON text so the record still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RadarId {
    Number(i64),
    Text(String),
}

impl From<serde_json::Value> for RadarId {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RadarId::Number(i),
                None => RadarId::Text(n.to_string()),
            },
            serde_json::Value::String(s) => RadarId::Text(s),
            other => RadarId::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RadarId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(RadarId::from)
    }
}

impl Default for RadarId {
    fn default() -> Self {
        RadarId::Text("null".to_string())
    }
}

impl std::fmt::Display for RadarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RadarId::Number(n) => write!(f, "{}", n),
            RadarId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RadarId {
    fn from(n: i64) -> Self {
        RadarId::Number(n)
    }
}

impl From<&str> for RadarId {
    fn from(s: &str) -> Self {
        RadarId::Text(s.to_string())
    }
}

/// One speed camera from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarRecord {
    #[serde(default)]
    pub id: RadarId,
    #[serde(default = "nan", deserialize_with = "lenient_coord")]
    pub lat: f64,
    #[serde(default = "nan", deserialize_with = "lenient_coord")]
    pub lng: f64,
    #[serde(default, deserialize_with = "lenient_label")]
    pub type_label: String,
}

impl RadarRecord {
    pub fn new(id: impl Into<RadarId>, lat: f64, lng: f64, type_label: &str) -> Self {
        RadarRecord {
            id: id.into(),
            lat,
            lng,
            type_label: type_label.to_string(),
        }
    }

    /// Whether the record can be drawn on the map.
    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Accepts any JSON value for a coordinate; anything that is not a number becomes NaN.
fn lenient_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(f64::NAN))
}

/// Missing or `null` labels are empty; other non-strings keep their JSON text.
fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Latest fix reported by the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl UserPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        UserPosition {
            latitude,
            longitude,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl LocationError {
    /// Map a W3C `GeolocationPositionError.code` onto a category.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "user denied the request for geolocation",
            LocationError::PositionUnavailable => "location information is unavailable",
            LocationError::Timeout => "the request to get user location timed out",
            LocationError::Unknown => "an unknown geolocation error occurred",
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "permission denied"),
            LocationError::PositionUnavailable => write!(f, "position unavailable"),
            LocationError::Timeout => write!(f, "timeout"),
            LocationError::Unknown => write!(f, "unknown"),
        }
    }
}

/// One item of the location stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    Fix(UserPosition),
    Failure(LocationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_numeric_id() {
        let json = r#"{"id":1,"lat":48.8566,"lng":2.3522,"typeLabel":"fixed"}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(radar.id, RadarId::Number(1));
        assert_eq!(radar.type_label, "fixed");
        assert!(radar.has_valid_coordinates());
    }

    #[test]
    fn test_record_deserializes_string_id() {
        let json = r#"{"id":"R-42","lat":45.0,"lng":0.0,"typeLabel":"mobile"}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(radar.id, RadarId::Text("R-42".to_string()));
        assert_eq!(radar.id.to_string(), "R-42");
    }

    #[test]
    fn test_record_with_null_coordinates_is_invalid() {
        let json = r#"{"id":3,"lat":null,"typeLabel":"fixed"}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert!(radar.lat.is_nan());
        assert!(radar.lng.is_nan());
        assert!(!radar.has_valid_coordinates());
    }

    #[test]
    fn test_record_with_string_coordinate_is_invalid() {
        let json = r#"{"id":4,"lat":"48.1","lng":2.0,"typeLabel":"fixed"}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert!(!radar.has_valid_coordinates());
    }

    #[test]
    fn test_record_with_null_type_label_decodes() {
        let json = r#"{"id":5,"lat":45.0,"lng":0.0,"typeLabel":null}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(radar.type_label, "");
        assert!(radar.has_valid_coordinates());
    }

    #[test]
    fn test_record_with_numeric_type_label_keeps_text() {
        let json = r#"{"id":5,"lat":45.0,"lng":0.0,"typeLabel":7}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(radar.type_label, "7");
    }

    #[test]
    fn test_record_with_fractional_id_keeps_text() {
        let json = r#"{"id":2.5,"lat":45.0,"lng":0.0,"typeLabel":"fixed"}"#;
        let radar: RadarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(radar.id, RadarId::Text("2.5".to_string()));
        assert_eq!(radar.id.to_string(), "2.5");
    }

    #[test]
    fn test_record_with_null_or_missing_id_decodes() {
        let null_id: RadarRecord =
            serde_json::from_str(r#"{"id":null,"lat":45.0,"lng":0.0,"typeLabel":"fixed"}"#)
                .unwrap();
        let missing_id: RadarRecord =
            serde_json::from_str(r#"{"lat":45.0,"lng":0.0,"typeLabel":"fixed"}"#).unwrap();
        assert_eq!(null_id.id.to_string(), "null");
        assert_eq!(missing_id.id, null_id.id);
    }

    #[test]
    fn test_location_error_from_code() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(LocationError::from_code(2), LocationError::PositionUnavailable);
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
        assert_eq!(LocationError::from_code(0), LocationError::Unknown);
        assert_eq!(LocationError::from_code(99), LocationError::Unknown);
    }

    #[test]
    fn test_radar_id_display_number() {
        assert_eq!(RadarId::from(17).to_string(), "17");
    }
}
