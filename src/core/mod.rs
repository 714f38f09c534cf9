pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
pub mod viewport;

pub use builder::MapBuilder;
pub use config::{MapConfig, MapProfile};
pub use geo::{LatLng, LatLngBounds, Point, TileCoord};
pub use map::{load_earthquake_map, load_from_source, Map, EARTHQUAKE_LAYER_ID};
pub use viewport::Viewport;
