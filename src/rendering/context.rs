use crate::{
    core::{
        geo::{LatLng, Point, TileCoord},
        viewport::Viewport,
    },
    quake::{legend::LegendRow, style::CircleMarkerOptions},
    ui::{elements::Position, popup::PopupContent},
    Result,
};
use serde::{Deserialize, Serialize};

/// One tile of a base layer, placed in container pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDraw {
    pub coord: TileCoord,
    pub url: String,
    /// (min, max) screen coordinates
    pub bounds: (Point, Point),
}

/// Entry of the layer switcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub id: String,
    pub name: String,
    pub active: bool,
}

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    TileLayer {
        layer_id: String,
        name: String,
        url_template: String,
        attribution: Option<String>,
        opacity: f32,
        tiles: Vec<TileDraw>,
    },
    CircleMarker {
        layer_id: String,
        id: String,
        position: LatLng,
        pixel: Point,
        options: CircleMarkerOptions,
        popup: Option<PopupContent>,
    },
    Legend {
        position: Position,
        rows: Vec<LegendRow>,
        html: String,
    },
    LayersControl {
        position: Position,
        collapsed: bool,
        base_layers: Vec<LayerEntry>,
        overlays: Vec<LayerEntry>,
    },
}

/// Headless rendering context: layers and controls queue draw commands,
/// which a front-end replays
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    /// Drawing primitives queue
    pub drawing_queue: Vec<DrawCommand>,
    /// Viewport clipping bounds (min, max) in screen coordinates
    pub clip_bounds: Option<(Point, Point)>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            drawing_queue: Vec::new(),
            clip_bounds: None,
        }
    }

    /// Context sized to a viewport and clipped to it
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let mut context = Self::new(viewport.size.x as u32, viewport.size.y as u32);
        context.set_clip_bounds(Point::new(0.0, 0.0), viewport.size);
        context
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
    }

    /// Queue a tile layer, dropping tiles that fall completely outside the clip area
    pub fn render_tile_layer(
        &mut self,
        layer_id: &str,
        name: &str,
        url_template: &str,
        attribution: Option<&str>,
        opacity: f32,
        tiles: Vec<TileDraw>,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(crate::MapError::Layer(format!(
                "opacity {} of layer {} is outside 0.0..=1.0",
                opacity, layer_id
            )));
        }

        let tiles = tiles
            .into_iter()
            .filter_map(|tile| {
                self.clip_bounds_to_viewport(tile.bounds)
                    .map(|bounds| TileDraw { bounds, ..tile })
            })
            .collect();

        self.drawing_queue.push(DrawCommand::TileLayer {
            layer_id: layer_id.to_string(),
            name: name.to_string(),
            url_template: url_template.to_string(),
            attribution: attribution.map(str::to_string),
            opacity,
            tiles,
        });
        Ok(())
    }

    /// Queue a circle marker
    pub fn render_circle_marker(
        &mut self,
        layer_id: &str,
        id: &str,
        position: LatLng,
        pixel: Point,
        options: CircleMarkerOptions,
        popup: Option<PopupContent>,
    ) {
        self.drawing_queue.push(DrawCommand::CircleMarker {
            layer_id: layer_id.to_string(),
            id: id.to_string(),
            position,
            pixel,
            options,
            popup,
        });
    }

    /// Queue a control; controls are never clipped
    pub fn render_control(&mut self, command: DrawCommand) {
        self.drawing_queue.push(command);
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Set viewport clipping bounds (like Leaflet's clip rectangle)
    pub fn set_clip_bounds(&mut self, min: Point, max: Point) {
        self.clip_bounds = Some((min, max));
    }

    /// Clip bounds to viewport (returns None if completely outside)
    fn clip_bounds_to_viewport(&self, bounds: (Point, Point)) -> Option<(Point, Point)> {
        let Some((clip_min, clip_max)) = self.clip_bounds else {
            return Some(bounds);
        };
        let (tile_min, tile_max) = bounds;

        if tile_max.x < clip_min.x
            || tile_min.x > clip_max.x
            || tile_max.y < clip_min.y
            || tile_min.y > clip_max.y
        {
            return None;
        }

        let clipped_min = Point::new(tile_min.x.max(clip_min.x), tile_min.y.max(clip_min.y));
        let clipped_max = Point::new(tile_max.x.min(clip_max.x), tile_max.y.min(clip_max.y));

        Some((clipped_min, clipped_max))
    }

    /// Hands the queued commands over as a scene
    pub fn finish(self, viewport: &Viewport) -> Scene {
        Scene {
            view: SceneView {
                center: viewport.center,
                zoom: viewport.zoom,
                size: viewport.size,
            },
            commands: self.drawing_queue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneView {
    pub center: LatLng,
    pub zoom: f64,
    pub size: Point,
}

/// Output of one render pass, ready to be serialized for a front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub view: SceneView,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn tile_layer_ids(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::TileLayer { layer_id, .. } => Some(layer_id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn markers(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::CircleMarker { .. }))
    }

    pub fn legend_rows(&self) -> Option<&[LegendRow]> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Legend { rows, .. } => Some(rows.as_slice()),
            _ => None,
        })
    }

    pub fn layers_control(&self) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|command| matches!(command, DrawCommand::LayersControl { .. }))
    }
}
