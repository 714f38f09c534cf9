use crate::{
    core::viewport::Viewport,
    layers::base::LayerTrait,
    prelude::HashMap,
    rendering::context::{LayerEntry, RenderContext},
    MapError, Result,
};

/// Manages layers for the map, handling ordering and rendering
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer, keeping render order sorted by z-index.
    ///
    /// Fails when a layer with the same id is already present.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id: {}", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // after every layer with the same z-index, so insertion order breaks ties
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Downcasts a layer to its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.get_layer(layer_id)
            .and_then(|layer| layer.as_any().downcast_ref::<T>())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Layer switcher entries: base layers (active one flagged) and overlays
    pub fn entries(&self, active_base: &str) -> (Vec<LayerEntry>, Vec<LayerEntry>) {
        let (base, overlays): (Vec<_>, Vec<_>) = self
            .layers()
            .into_iter()
            .partition(|layer| layer.layer_type().is_base());

        let base = base
            .into_iter()
            .map(|layer| LayerEntry {
                id: layer.id().to_string(),
                name: layer.name().to_string(),
                active: layer.id() == active_base,
            })
            .collect();
        let overlays = overlays
            .into_iter()
            .map(|layer| LayerEntry {
                id: layer.id().to_string(),
                name: layer.name().to_string(),
                active: layer.is_visible(),
            })
            .collect();
        (base, overlays)
    }

    /// Renders visible layers in z-order.
    ///
    /// Of the base layers only `active_base` is drawn. Every visible overlay
    /// is drawn in full, markers outside the viewport included, so a front-end
    /// can pan to them.
    pub fn render(
        &mut self,
        context: &mut RenderContext,
        viewport: &Viewport,
        active_base: Option<&str>,
    ) -> Result<()> {
        for layer_id in &self.render_order {
            let Some(layer) = self.layers.get_mut(layer_id) else {
                continue;
            };
            if !layer.is_visible() {
                continue;
            }

            if layer.layer_type().is_base() {
                if active_base == Some(layer_id.as_str()) {
                    layer.render(context, viewport)?;
                }
            } else {
                layer.render(context, viewport)?;
            }
        }
        Ok(())
    }

    /// Updates the render order based on current z-indices
    pub fn update_render_order(&mut self) {
        self.render_order.sort_by(|a, b| {
            let z_a = self.layers.get(a).map(|l| l.z_index()).unwrap_or(0);
            let z_b = self.layers.get(b).map(|l| l.z_index()).unwrap_or(0);
            z_a.cmp(&z_b)
        });
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::{LatLng, Point},
        layers::{marker::CircleMarker, tile::BaseMap},
        rendering::context::DrawCommand,
    };

    fn manager() -> LayerManager {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(CircleMarker::new(
                "marker".to_string(),
                LatLng::new(37.0, -95.0),
            )))
            .unwrap();
        manager.add_layer(Box::new(BaseMap::Street.layer())).unwrap();
        manager
            .add_layer(Box::new(BaseMap::Satellite.layer()))
            .unwrap();
        manager
    }

    #[test]
    fn test_render_order_follows_z_index() {
        let manager = manager();
        assert_eq!(
            manager.list_layers(),
            vec!["marker", "street", "satellite"]
        );

        let mut manager = manager;
        manager.with_layer_mut("marker", |layer| layer.set_z_index(10));
        manager.update_render_order();
        assert_eq!(
            manager.list_layers(),
            vec!["street", "satellite", "marker"]
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = manager();
        let err = manager
            .add_layer(Box::new(BaseMap::Street.layer()))
            .unwrap_err();
        assert!(matches!(err, MapError::Layer(_)));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_only_active_base_is_drawn() {
        let mut manager = manager();
        let viewport = Viewport::new(LatLng::new(37.09, -95.71), 5.0, Point::new(1024.0, 768.0));
        let mut context = RenderContext::for_viewport(&viewport);
        manager
            .render(&mut context, &viewport, Some("satellite"))
            .unwrap();

        let tile_layers: Vec<_> = context
            .get_drawing_queue()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::TileLayer { layer_id, .. } => Some(layer_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tile_layers, vec!["satellite"]);
        assert_eq!(context.get_drawing_queue().len(), 2);
    }

    #[test]
    fn test_offscreen_overlay_still_drawn() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(CircleMarker::new(
                "tokyo".to_string(),
                LatLng::new(35.68, 139.69),
            )))
            .unwrap();
        let viewport = Viewport::new(LatLng::new(37.09, -95.71), 5.0, Point::new(1024.0, 768.0));
        assert!(!viewport.bounds().contains(&LatLng::new(35.68, 139.69)));

        let mut context = RenderContext::for_viewport(&viewport);
        manager.render(&mut context, &viewport, None).unwrap();
        match context.get_drawing_queue() {
            [DrawCommand::CircleMarker { id, pixel, .. }] => {
                assert_eq!(id, "tokyo");
                assert!(pixel.x > 1024.0 || pixel.x < 0.0);
            }
            other => panic!("expected one marker, got {:?}", other),
        }
    }

    #[test]
    fn test_entries_split_base_and_overlays() {
        let manager = manager();
        let (base, overlays) = manager.entries("street");
        assert_eq!(base.len(), 2);
        assert!(base[0].active && !base[1].active);
        assert_eq!(base[0].name, "Street Map");
        assert_eq!(overlays.len(), 1);
        assert!(overlays[0].active);
    }

    #[test]
    fn test_remove_and_downcast() {
        let mut manager = manager();
        assert!(manager.get_layer_as::<CircleMarker>("marker").is_some());
        assert!(manager.get_layer_as::<CircleMarker>("street").is_none());
        assert!(manager.remove_layer("marker").is_some());
        assert_eq!(manager.len(), 2);
        assert!(manager.get_layer("marker").is_none());
    }
}
