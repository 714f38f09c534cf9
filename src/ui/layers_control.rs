use crate::{
    rendering::context::{DrawCommand, LayerEntry, RenderContext},
    traits::MapControl,
    ui::elements::Position,
    Result,
};

/// Base-layer switcher with overlay toggles
pub struct LayersControl {
    id: String,
    position: Position,
    collapsed: bool,
    visible: bool,
    base_layers: Vec<LayerEntry>,
    overlays: Vec<LayerEntry>,
}

impl LayersControl {
    pub fn new(id: String) -> Self {
        Self {
            id,
            position: Position::TopRight,
            collapsed: true,
            visible: true,
            base_layers: Vec::new(),
            overlays: Vec::new(),
        }
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Replaces the listed layers with the map's current ones
    pub fn update_entries(&mut self, base_layers: Vec<LayerEntry>, overlays: Vec<LayerEntry>) {
        self.base_layers = base_layers;
        self.overlays = overlays;
    }

    pub fn base_layers(&self) -> &[LayerEntry] {
        &self.base_layers
    }

    pub fn overlays(&self) -> &[LayerEntry] {
        &self.overlays
    }
}

impl MapControl for LayersControl {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        context.render_control(DrawCommand::LayersControl {
            position: self.position,
            collapsed: self.collapsed,
            base_layers: self.base_layers.clone(),
            overlays: self.overlays.clone(),
        });
        Ok(())
    }
}
