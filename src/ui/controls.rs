use crate::{
    rendering::context::{LayerEntry, RenderContext},
    traits::MapControl,
    ui::{layers_control::LayersControl, legend::LegendControl},
    Result,
};

/// Control manager that handles all map controls
pub struct ControlManager {
    legend: Option<LegendControl>,
    layers_control: Option<LayersControl>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self {
            legend: None,
            layers_control: None,
        }
    }

    /// Add a legend
    pub fn with_legend(mut self, legend: LegendControl) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Add a layer switcher
    pub fn with_layers_control(mut self, control: LayersControl) -> Self {
        self.layers_control = Some(control);
        self
    }

    pub fn legend(&self) -> Option<&LegendControl> {
        self.legend.as_ref()
    }

    pub fn layers_control(&self) -> Option<&LayersControl> {
        self.layers_control.as_ref()
    }

    /// Refresh the layer switcher with the map's layers
    pub fn update_layers(&mut self, base_layers: Vec<LayerEntry>, overlays: Vec<LayerEntry>) {
        if let Some(control) = &mut self.layers_control {
            control.update_entries(base_layers, overlays);
        }
    }

    /// Render all visible controls
    pub fn render(&self, context: &mut RenderContext) -> Result<()> {
        if let Some(legend) = &self.legend {
            if legend.is_visible() {
                legend.render(context)?;
            }
        }

        if let Some(control) = &self.layers_control {
            if control.is_visible() {
                control.render(context)?;
            }
        }

        Ok(())
    }

    /// Check if any control is visible
    pub fn has_visible_controls(&self) -> bool {
        self.legend.as_ref().is_some_and(|c| c.is_visible())
            || self.layers_control.as_ref().is_some_and(|c| c.is_visible())
    }

    /// Set visibility of all controls
    pub fn set_all_visible(&mut self, visible: bool) {
        if let Some(legend) = &mut self.legend {
            legend.set_visible(visible);
        }
        if let Some(control) = &mut self.layers_control {
            control.set_visible(visible);
        }
    }
}

impl Default for ControlManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_controls_not_rendered() {
        let mut controls = ControlManager::new()
            .with_legend(LegendControl::depth())
            .with_layers_control(LayersControl::new("layers".to_string()));
        assert!(controls.has_visible_controls());

        controls.set_all_visible(false);
        assert!(!controls.has_visible_controls());

        let mut context = RenderContext::new(100, 100);
        controls.render(&mut context).unwrap();
        assert!(context.get_drawing_queue().is_empty());
    }

    #[test]
    fn test_empty_manager() {
        let controls = ControlManager::default();
        assert!(!controls.has_visible_controls());
        assert!(controls.legend().is_none());
        assert!(controls.layers_control().is_none());
    }
}
