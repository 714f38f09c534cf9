//! Marker styling rules: depth picks the color, magnitude picks the size.
//!
//! Both functions are total. Any depth yields one of the six [`DepthColor`]
//! buckets and any magnitude yields a radius, including negative ones.

use crate::core::constants::{
    MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT, RADIUS_PER_MAGNITUDE,
    ZERO_MAGNITUDE_RADIUS,
};
use serde::{Deserialize, Serialize};

/// One of the six fixed depth buckets, shallowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthColor {
    /// depth <= 10 km
    Shallow,
    /// 10 < depth <= 30
    Upper,
    /// 30 < depth <= 50
    Middle,
    /// 50 < depth <= 70
    Lower,
    /// 70 < depth <= 90
    Deep,
    /// depth > 90
    VeryDeep,
}

impl DepthColor {
    pub const ALL: [DepthColor; 6] = [
        DepthColor::Shallow,
        DepthColor::Upper,
        DepthColor::Middle,
        DepthColor::Lower,
        DepthColor::Deep,
        DepthColor::VeryDeep,
    ];

    /// Hex color string as understood by the map front-end
    pub fn hex(&self) -> &'static str {
        match self {
            DepthColor::Shallow => "#98EE00",
            DepthColor::Upper => "#D4EE00",
            DepthColor::Middle => "#EECC00",
            DepthColor::Lower => "#EE9C00",
            DepthColor::Deep => "#EA822C",
            DepthColor::VeryDeep => "#EA2C2C",
        }
    }
}

impl std::fmt::Display for DepthColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hex())
    }
}

/// `(exclusive lower bound, color)` evaluated top-down; the first bound the
/// depth exceeds wins.
const DEPTH_THRESHOLDS: [(f64, DepthColor); 5] = [
    (90.0, DepthColor::VeryDeep),
    (70.0, DepthColor::Deep),
    (50.0, DepthColor::Lower),
    (30.0, DepthColor::Middle),
    (10.0, DepthColor::Upper),
];

/// Classifies a depth in kilometers (negative above sea level)
pub fn classify_depth(depth_km: f64) -> DepthColor {
    DEPTH_THRESHOLDS
        .iter()
        .find(|(threshold, _)| depth_km > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(DepthColor::Shallow)
}

/// Marker radius in pixels for a magnitude.
///
/// Zero maps to a fixed minimum; everything else scales linearly, so
/// negative magnitudes give negative radii.
pub fn marker_radius(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        return ZERO_MAGNITUDE_RADIUS;
    }
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Display-only style of one event marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: DepthColor,
}

impl MarkerStyle {
    pub fn for_event(magnitude: f64, depth_km: f64) -> Self {
        Self {
            radius: marker_radius(magnitude),
            color: classify_depth(depth_km),
        }
    }

    /// Expands to the full circle marker options handed to the front-end
    pub fn circle_options(&self) -> CircleMarkerOptions {
        CircleMarkerOptions {
            radius: self.radius,
            fill_color: self.color.hex().to_string(),
            ..CircleMarkerOptions::default()
        }
    }
}

/// Path options of a circle marker, serialized with Leaflet's field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub radius: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Outline color
    pub color: String,
    pub stroke: bool,
    /// Outline width
    pub weight: f64,
}

impl Default for CircleMarkerOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            fill_color: "#3388ff".to_string(),
            fill_opacity: MARKER_FILL_OPACITY,
            color: MARKER_STROKE_COLOR.to_string(),
            stroke: true,
            weight: MARKER_STROKE_WEIGHT,
        }
    }
}
