//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, MapProfile},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{load_earthquake_map, load_from_source, Map},
    viewport::Viewport,
};

pub use crate::layers::{
    base::LayerTrait, manager::LayerManager, marker::CircleMarker, quake::EarthquakeLayer,
    tile::BaseMap, tile::TileLayer,
};

pub use crate::data::{
    feed::{DataLoadError, FeedSource, HttpFeed, StaticFeed, UsgsFeed},
    geojson::{GeoJson, GeoJsonFeature},
};

pub use crate::quake::{
    classify_depth, marker_radius, CircleMarkerOptions, DepthColor, EarthquakeEvent, MarkerStyle,
};

pub use crate::rendering::context::{DrawCommand, RenderContext, Scene};

pub use crate::traits::MapControl;

pub use crate::ui::{elements::Position, popup::PopupContent};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::load_blocking;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
