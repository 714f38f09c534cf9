use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A GeoJSON position: `[lng, lat]` or `[lng, lat, elevation/depth]`
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
}

impl GeoJsonGeometry {
    pub fn point(lng: f64, lat: f64, depth: f64) -> Self {
        GeoJsonGeometry::Point {
            coordinates: vec![lng, lat, depth],
        }
    }

    /// Converts coordinates to LatLng points, dropping malformed positions
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                LatLng::from_position(coordinates).into_iter().collect()
            }
            GeoJsonGeometry::MultiPoint { coordinates }
            | GeoJsonGeometry::LineString { coordinates } => coordinates
                .iter()
                .filter_map(|c| LatLng::from_position(c))
                .collect(),
            GeoJsonGeometry::Polygon { coordinates } => coordinates
                .first()
                .map(|exterior| {
                    exterior
                        .iter()
                        .filter_map(|c| LatLng::from_position(c))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.to_lat_lng_points())
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    /// Looks up a property, treating JSON `null` as absent
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .filter(|value| !value.is_null())
    }

    /// Feature id as a string, whether the feed sent it as a string or a number
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Header the USGS summary feeds attach to a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    pub generated: Option<i64>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub count: Option<u64>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<FeedMetadata>,
        features: Vec<GeoJsonFeature>,
    },
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn collection(features: Vec<GeoJsonFeature>) -> Self {
        GeoJson::FeatureCollection {
            metadata: None,
            features,
        }
    }

    /// All features, a lone feature counting as a collection of one
    pub fn features(&self) -> &[GeoJsonFeature] {
        match self {
            GeoJson::Feature(feature) => std::slice::from_ref(feature),
            GeoJson::FeatureCollection { features, .. } => features,
        }
    }

    pub fn metadata(&self) -> Option<&FeedMetadata> {
        match self {
            GeoJson::FeatureCollection { metadata, .. } => metadata.as_ref(),
            GeoJson::Feature(_) => None,
        }
    }
}
