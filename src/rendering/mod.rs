//! Headless rendering: draw command queue and the resulting scene

pub mod context;

pub use context::{DrawCommand, LayerEntry, RenderContext, Scene, SceneView, TileDraw};
