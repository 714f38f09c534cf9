//! Blocking entry points for hosts without an async runtime
//!
//! Each call drives the async load to completion on its own
//! current-thread Tokio runtime.

use crate::{
    core::{config::MapConfig, map::Map},
    data::feed::DataLoadError,
    rendering::context::Scene,
    Result,
};
use std::future::Future;

/// Runs `future` to completion on a fresh current-thread runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = ::tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DataLoadError::Runtime)?;
    Ok(runtime.block_on(future))
}

/// Blocking form of [`crate::load_earthquake_map`]
pub fn load_blocking(config: MapConfig) -> Result<(Map, Scene)> {
    block_on(crate::core::map::load_earthquake_map(config))?
}
