//! Map profiles and their resolved configuration
//!
//! A profile names a preset; [`MapProfile::resolve`] expands it into a
//! [`MapConfig`] that the builder and loaders consume.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER, DEFAULT_FEED_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_VIEWPORT_SIZE,
            DEFAULT_ZOOM,
        },
        geo::{LatLng, Point},
    },
    layers::tile::BaseMap,
    ui::elements::Position,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MapProfile {
    /// Street tiles and the depth legend
    Basic,
    /// Street, satellite and grayscale tiles with an expanded layer switcher
    Layered,
    Custom(MapConfig),
}

impl Default for MapProfile {
    fn default() -> Self {
        Self::Basic
    }
}

impl MapProfile {
    pub fn resolve(&self) -> MapConfig {
        match self {
            Self::Basic => MapConfig::default(),
            Self::Layered => MapConfig {
                base_maps: vec![BaseMap::Street, BaseMap::Satellite, BaseMap::Grayscale],
                layers_control: true,
                ..MapConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl std::str::FromStr for MapProfile {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "layered" => Ok(Self::Layered),
            other => Err(MapError::InvalidConfig(format!(
                "unknown map profile '{}', expected 'basic' or 'layered'",
                other
            ))),
        }
    }
}

/// Everything needed to assemble an earthquake map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub feed_url: String,
    pub center: LatLng,
    pub zoom: f64,
    /// Viewport size in pixels
    pub size: Point,
    /// Base maps in switcher order; the first one starts active
    pub base_maps: Vec<BaseMap>,
    pub layers_control: bool,
    pub layers_control_collapsed: bool,
    pub legend: bool,
    pub legend_position: Position,
    pub request_timeout_secs: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            size: Point::new(DEFAULT_VIEWPORT_SIZE.0, DEFAULT_VIEWPORT_SIZE.1),
            base_maps: vec![BaseMap::Street],
            layers_control: false,
            layers_control_collapsed: false,
            legend: true,
            legend_position: Position::BottomRight,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl MapConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects configurations no map can be built from
    pub fn validate(&self) -> Result<()> {
        if self.base_maps.is_empty() {
            return Err(MapError::InvalidConfig(
                "at least one base map is required".to_string(),
            ));
        }
        if !self.center.is_valid() {
            return Err(MapError::InvalidConfig(format!(
                "center ({}, {}) is out of range",
                self.center.lat, self.center.lng
            )));
        }
        if !(0.0..=18.0).contains(&self.zoom) {
            return Err(MapError::InvalidConfig(format!(
                "zoom {} is outside 0..=18",
                self.zoom
            )));
        }
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(MapError::InvalidConfig(
                "viewport size must be positive".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(MapError::InvalidConfig(
                "request timeout must be at least one second".to_string(),
            ));
        }
        if self.feed_url.trim().is_empty() {
            return Err(MapError::InvalidConfig("feed url is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_profile() {
        let config = MapProfile::Basic.resolve();
        assert_eq!(config.base_maps, vec![BaseMap::Street]);
        assert!(!config.layers_control);
        assert!(config.legend);
        assert_eq!(config.legend_position, Position::BottomRight);
        assert_eq!(config.center, LatLng::new(37.09, -95.71));
        assert_eq!(config.zoom, 5.0);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_layered_profile() {
        let config = MapProfile::Layered.resolve();
        assert_eq!(
            config.base_maps,
            vec![BaseMap::Street, BaseMap::Satellite, BaseMap::Grayscale]
        );
        assert!(config.layers_control);
        assert!(!config.layers_control_collapsed);
        assert_eq!(config.feed_url, MapProfile::Basic.resolve().feed_url);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Layered".parse::<MapProfile>().unwrap(), MapProfile::Layered);
        assert!(matches!(
            "fancy".parse::<MapProfile>(),
            Err(MapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: MapConfig =
            serde_json::from_str(r#"{"zoom": 3.0, "base_maps": ["satellite"]}"#).unwrap();
        assert_eq!(config.zoom, 3.0);
        assert_eq!(config.base_maps, vec![BaseMap::Satellite]);
        assert!(config.legend);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let mut config = MapConfig::default();
        config.base_maps.clear();
        assert!(config.validate().is_err());

        let config = MapConfig {
            zoom: 25.0,
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = MapConfig {
            request_timeout_secs: 0,
            ..MapConfig::default()
        };
        match config.validate() {
            Err(MapError::InvalidConfig(message)) => assert!(message.contains("timeout")),
            other => panic!("expected an invalid config error, got {:?}", other),
        }

        let config = MapConfig {
            request_timeout_secs: 1,
            ..MapConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
