//! Engine-wide defaults, taken from the Leaflet earthquake map this crate renders.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// USGS summary feed: every event of the past seven days.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Initial map center (contiguous United States).
pub const DEFAULT_CENTER: (f64, f64) = (37.09, -95.71);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Viewport size used when the host does not provide one.
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (1024.0, 768.0);

/// Circle marker fill opacity.
pub const MARKER_FILL_OPACITY: f64 = 0.6;

/// Circle marker outline color.
pub const MARKER_STROKE_COLOR: &str = "#000";

/// Circle marker outline width in pixels.
pub const MARKER_STROKE_WEIGHT: f64 = 0.8;

/// Pixels of radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 4.0;

/// Radius given to magnitude-zero events so they stay visible.
pub const ZERO_MAGNITUDE_RADIUS: f64 = 1.0;

/// Depth boundaries (km) listed by the legend.
pub const LEGEND_DEPTHS: [f64; 6] = [0.0, 1.0, 10.0, 30.0, 50.0, 70.0];

/// Overlay name used by the layers control.
pub const EARTHQUAKE_OVERLAY_NAME: &str = "Earthquakes";

/// z-index of base tile layers.
pub const BASE_LAYER_Z_INDEX: i32 = 1;

/// z-index of the earthquake overlay, above every base layer.
pub const OVERLAY_Z_INDEX: i32 = 10;

/// User agent sent with feed requests.
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Default request timeout for the feed, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
