//! # quakemap
//!
//! Headless earthquake map engine in the Leaflet mould.
//!
//! Earthquakes from a USGS GeoJSON feed become circle markers sized by
//! magnitude and colored by depth, drawn over switchable tile base layers
//! with a depth legend. Rendering produces a serializable [`Scene`] that a
//! front-end replays.
//!
//! ```no_run
//! # async fn run() -> quakemap::Result<()> {
//! use quakemap::{load_earthquake_map, MapProfile};
//!
//! let (_map, scene) = load_earthquake_map(MapProfile::Layered.resolve()).await?;
//! println!("{}", scene.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod quake;
pub mod rendering;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, MapProfile},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{load_earthquake_map, load_from_source, Map},
    viewport::Viewport,
};

pub use data::{
    feed::{DataLoadError, FeedSource, HttpFeed, StaticFeed, UsgsFeed},
    geojson::{GeoJson, GeoJsonFeature},
};

pub use layers::{
    base::LayerTrait, marker::CircleMarker, quake::EarthquakeLayer, tile::BaseMap,
    tile::TileLayer,
};

pub use quake::{
    classify_depth, depth_legend, legend_rows, marker_radius, CircleMarkerOptions, DepthColor,
    EarthquakeEvent, LegendRow, MarkerStyle,
};

pub use rendering::{DrawCommand, RenderContext, Scene};

pub use ui::{ControlManager, LayersControl, LegendControl, PopupContent};

#[cfg(feature = "tokio-runtime")]
pub use runtime::load_blocking;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = MapError;
