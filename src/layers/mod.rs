pub mod base;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod quake;
pub mod tile;

pub use base::{LayerProperties, LayerTrait, LayerType};
pub use manager::LayerManager;
pub use marker::CircleMarker;
pub use quake::EarthquakeLayer;
pub use tile::{BaseMap, TileLayer, TileLayerOptions};
