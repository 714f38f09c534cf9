//! Depth legend rows.
//!
//! Each row takes its color from [`classify_depth`] one kilometer past the
//! row's lower boundary, so the legend always agrees with the markers.

use crate::core::constants::LEGEND_DEPTHS;
use crate::quake::style::{classify_depth, DepthColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub color: DepthColor,
    pub label: String,
}

/// Builds one row per boundary: `"lo–hi"` for closed ranges, `"lo+"` for the last
pub fn legend_rows(boundaries: &[f64]) -> Vec<LegendRow> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, lo)| {
            let label = match boundaries.get(i + 1) {
                Some(hi) => format!("{}\u{2013}{}", lo, hi),
                None => format!("{}+", lo),
            };
            LegendRow {
                color: classify_depth(lo + 1.0),
                label,
            }
        })
        .collect()
}

/// Legend rows for the standard depth boundaries
pub fn depth_legend() -> Vec<LegendRow> {
    legend_rows(&LEGEND_DEPTHS)
}
