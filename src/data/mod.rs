//! Feed access and the GeoJSON documents it returns

pub mod feed;
pub mod geojson;

pub use feed::{
    default_feed_url, DataLoadError, FeedMagnitude, FeedSource, FeedWindow, HttpFeed,
    StaticFeed, UsgsFeed,
};
pub use geojson::{FeedMetadata, GeoJson, GeoJsonFeature, GeoJsonGeometry, Position};
