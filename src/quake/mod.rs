//! Earthquake domain: events, marker styling and the depth legend.

pub mod event;
pub mod legend;
pub mod style;

pub use event::{EarthquakeEvent, SkipReason};
pub use legend::{depth_legend, legend_rows, LegendRow};
pub use style::{classify_depth, marker_radius, CircleMarkerOptions, DepthColor, MarkerStyle};
