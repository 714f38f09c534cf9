//! Map builder for fluent API configuration
//!
//! Starts from a [`MapProfile`] and applies individual overrides on top of
//! the resolved [`MapConfig`].

use crate::{
    core::{
        config::{MapConfig, MapProfile},
        geo::{LatLng, Point},
        map::Map,
    },
    data::feed::UsgsFeed,
    layers::tile::BaseMap,
    ui::elements::Position,
    Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    config: MapConfig,
}

impl MapBuilder {
    /// Create a new MapBuilder with the basic profile
    pub fn new() -> Self {
        Self::from_profile(MapProfile::default())
    }

    pub fn from_profile(profile: MapProfile) -> Self {
        Self {
            config: profile.resolve(),
        }
    }

    /// Replace every setting with the profile's, dropping earlier overrides
    pub fn with_profile(mut self, profile: MapProfile) -> Self {
        self.config = profile.resolve();
        self
    }

    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.feed_url = url.into();
        self
    }

    /// Use one of the USGS summary feeds
    pub fn with_usgs_feed(mut self, feed: UsgsFeed) -> Self {
        self.config.feed_url = feed.url();
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.config.center = center;
        self.config.zoom = zoom;
        self
    }

    /// Set the viewport size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.config.size = size;
        self
    }

    /// Append a base map; ignored if already present
    pub fn with_base_map(mut self, base_map: BaseMap) -> Self {
        if !self.config.base_maps.contains(&base_map) {
            self.config.base_maps.push(base_map);
        }
        self
    }

    /// Show the layer switcher, expanded or collapsed
    pub fn with_layers_control(mut self, enabled: bool, collapsed: bool) -> Self {
        self.config.layers_control = enabled;
        self.config.layers_control_collapsed = collapsed;
        self
    }

    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.config.legend = enabled;
        self
    }

    pub fn with_legend_position(mut self, position: Position) -> Self {
        self.config.legend_position = position;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The configuration without building a map, e.g. for `load_earthquake_map`
    pub fn into_config(self) -> MapConfig {
        self.config
    }

    /// Build the map
    pub fn build(self) -> Result<Map> {
        Map::new(self.config)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
