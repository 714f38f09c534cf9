//! Earthquake events read from feed features.
//!
//! Features without a magnitude or a 3-D point geometry are skipped, never
//! reported as errors.

use crate::core::geo::LatLng;
use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
use crate::quake::style::MarkerStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One seismic event as read from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    pub id: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub place: String,
    /// Origin time, milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub position: LatLng,
}

/// Why a feature could not be read as an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoGeometry,
    NotAPoint,
    NoDepth,
    InvalidPosition,
    NoMagnitude,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoGeometry => write!(f, "missing geometry"),
            SkipReason::NotAPoint => write!(f, "geometry is not a point"),
            SkipReason::NoDepth => write!(f, "point has no depth coordinate"),
            SkipReason::InvalidPosition => write!(f, "position out of range"),
            SkipReason::NoMagnitude => write!(f, "missing magnitude"),
        }
    }
}

impl EarthquakeEvent {
    /// Reads an event from a GeoJSON feature.
    ///
    /// `index` names features that carry no id of their own.
    pub fn from_feature(feature: &GeoJsonFeature, index: usize) -> Result<Self, SkipReason> {
        let coordinates = match &feature.geometry {
            None => return Err(SkipReason::NoGeometry),
            Some(GeoJsonGeometry::Point { coordinates }) => coordinates,
            Some(_) => return Err(SkipReason::NotAPoint),
        };
        let depth_km = *coordinates.get(2).ok_or(SkipReason::NoDepth)?;
        let position = LatLng::from_position(coordinates)
            .filter(LatLng::is_valid)
            .ok_or(SkipReason::InvalidPosition)?;
        let magnitude = feature
            .property("mag")
            .and_then(|v| v.as_f64())
            .ok_or(SkipReason::NoMagnitude)?;

        let place = feature
            .property("place")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let timestamp_ms = feature
            .property("time")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|t| t as i64)))
            .unwrap_or_default();
        let id = feature
            .id_string()
            .unwrap_or_else(|| format!("quake-{}", index));

        Ok(Self {
            id,
            magnitude,
            depth_km,
            place,
            timestamp_ms,
            position,
        })
    }

    /// Reads every usable feature of a document, skipping the rest
    pub fn from_geojson(geojson: &GeoJson) -> Vec<Self> {
        geojson
            .features()
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| match Self::from_feature(feature, index) {
                Ok(event) => Some(event),
                Err(reason) => {
                    log::debug!("skipping feature {}: {}", index, reason);
                    None
                }
            })
            .collect()
    }

    pub fn style(&self) -> MarkerStyle {
        MarkerStyle::for_event(self.magnitude, self.depth_km)
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// Origin time in the long form browsers print for a `Date`, in UTC
    pub fn formatted_time(&self) -> String {
        match self.time() {
            Some(time) => time
                .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
                .to_string(),
            None => "Invalid Date".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quake::style::DepthColor;

    fn feature(json: &str) -> GeoJsonFeature {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_event_from_feature() {
        let f = feature(
            r#"{"type": "Feature", "id": "us7000abcd",
                "properties": {"mag": 6.5, "place": "Off the coast", "time": 1700000000000},
                "geometry": {"type": "Point", "coordinates": [142.3, 38.1, 95.0]}}"#,
        );
        let event = EarthquakeEvent::from_feature(&f, 0).unwrap();

        assert_eq!(event.id, "us7000abcd");
        assert_eq!(event.magnitude, 6.5);
        assert_eq!(event.depth_km, 95.0);
        assert_eq!(event.place, "Off the coast");
        assert_eq!(event.timestamp_ms, 1_700_000_000_000);
        assert_eq!(event.position, LatLng::new(38.1, 142.3));

        let style = event.style();
        assert_eq!(style.radius, 26.0);
        assert_eq!(style.color, DepthColor::VeryDeep);
    }

    #[test]
    fn test_optional_fields_default() {
        let f = feature(
            r#"{"type": "Feature", "properties": {"mag": 0, "place": null},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0, -1.5]}}"#,
        );
        let event = EarthquakeEvent::from_feature(&f, 7).unwrap();
        assert_eq!(event.id, "quake-7");
        assert_eq!(event.place, "");
        assert_eq!(event.timestamp_ms, 0);
        assert_eq!(event.style().radius, 1.0);
    }

    #[test]
    fn test_skip_reasons() {
        let cases = [
            (
                r#"{"properties": {"mag": 1.0}, "geometry": null}"#,
                SkipReason::NoGeometry,
            ),
            (
                r#"{"properties": {"mag": 1.0}, "geometry": {"type": "LineString", "coordinates": [[0, 0, 1], [1, 1, 1]]}}"#,
                SkipReason::NotAPoint,
            ),
            (
                r#"{"properties": {"mag": 1.0}, "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}}"#,
                SkipReason::NoDepth,
            ),
            (
                r#"{"properties": {"mag": 1.0}, "geometry": {"type": "Point", "coordinates": [10.0, 120.0, 5.0]}}"#,
                SkipReason::InvalidPosition,
            ),
            (
                r#"{"properties": {"mag": null}, "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 5.0]}}"#,
                SkipReason::NoMagnitude,
            ),
        ];

        for (json, reason) in cases {
            assert_eq!(EarthquakeEvent::from_feature(&feature(json), 0), Err(reason));
        }
    }

    #[test]
    fn test_from_geojson_keeps_valid_features() {
        let geojson = GeoJson::collection(vec![
            feature(
                r#"{"properties": {"mag": 2.0}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}}"#,
            ),
            feature(r#"{"properties": {"mag": 2.0}, "geometry": null}"#),
        ]);
        let events = EarthquakeEvent::from_geojson(&geojson);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "quake-0");
    }

    #[test]
    fn test_formatted_time() {
        let event = EarthquakeEvent {
            id: "x".to_string(),
            magnitude: 1.0,
            depth_km: 1.0,
            place: String::new(),
            timestamp_ms: 1_700_000_000_000,
            position: LatLng::default(),
        };
        assert_eq!(
            event.formatted_time(),
            "Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)"
        );
    }
}
