use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    data::feed::{FeedSource, HttpFeed},
    layers::{base::LayerTrait, manager::LayerManager, quake::EarthquakeLayer},
    quake::event::EarthquakeEvent,
    rendering::context::{RenderContext, Scene},
    ui::{controls::ControlManager, layers_control::LayersControl, legend::LegendControl},
    MapError, Result,
};

/// Id of the earthquake overlay layer
pub const EARTHQUAKE_LAYER_ID: &str = "earthquakes";

/// Headless earthquake map: base layers, the earthquake overlay and its controls
pub struct Map {
    viewport: Viewport,
    layers: LayerManager,
    controls: ControlManager,
    active_base: String,
    config: MapConfig,
}

impl Map {
    /// Builds the base layers and controls a configuration asks for
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;

        let viewport = Viewport::new(config.center, config.zoom, config.size);

        let mut layers = LayerManager::new();
        for base_map in &config.base_maps {
            layers.add_layer(Box::new(base_map.layer()))?;
        }
        // validate() guarantees at least one base map
        let active_base = config
            .base_maps
            .first()
            .map(|base_map| base_map.id().to_string())
            .unwrap_or_default();

        let mut controls = ControlManager::new();
        if config.legend {
            controls = controls
                .with_legend(LegendControl::depth().with_position(config.legend_position));
        }
        if config.layers_control {
            controls = controls.with_layers_control(
                LayersControl::new("layers".to_string())
                    .with_collapsed(config.layers_control_collapsed),
            );
        }

        Ok(Self {
            viewport,
            layers,
            controls,
            active_base,
            config,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn controls(&self) -> &ControlManager {
        &self.controls
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidConfig(format!(
                "center ({}, {}) is out of range",
                center.lat, center.lng
            )));
        }
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        Ok(())
    }

    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: Option<f64>) {
        self.viewport.fit_bounds(bounds, padding);
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layers.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if layer_id == self.active_base {
            return Err(MapError::Layer(format!(
                "cannot remove the active base layer {}",
                layer_id
            )));
        }
        self.layers
            .remove_layer(layer_id)
            .map(|_| ())
            .ok_or_else(|| MapError::Layer(format!("no layer with id {}", layer_id)))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.with_layer_mut(layer_id, f)
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers.list_layers()
    }

    pub fn active_base_layer(&self) -> &str {
        &self.active_base
    }

    /// Switches the drawn base layer, like picking a radio button in the layer switcher
    pub fn set_active_base_layer(&mut self, layer_id: &str) -> Result<()> {
        match self.layers.get_layer(layer_id) {
            Some(layer) if layer.layer_type().is_base() => {
                self.active_base = layer_id.to_string();
                Ok(())
            }
            Some(_) => Err(MapError::Layer(format!("{} is not a base layer", layer_id))),
            None => Err(MapError::Layer(format!("no layer with id {}", layer_id))),
        }
    }

    /// Shows or hides an overlay, like ticking its checkbox in the layer switcher
    pub fn set_overlay_visible(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        self.layers
            .with_layer_mut(layer_id, |layer| {
                if layer.layer_type().is_base() {
                    Err(MapError::Layer(format!("{} is not an overlay", layer_id)))
                } else {
                    layer.set_visible(visible);
                    Ok(())
                }
            })
            .unwrap_or_else(|| Err(MapError::Layer(format!("no layer with id {}", layer_id))))
    }

    /// Puts the events on the map, replacing any previous earthquake overlay
    pub fn add_earthquakes(&mut self, events: Vec<EarthquakeEvent>) -> Result<()> {
        if self.layers.remove_layer(EARTHQUAKE_LAYER_ID).is_some() {
            log::debug!("replacing earthquake overlay");
        }
        log::info!("adding {} earthquakes to the map", events.len());
        self.layers.add_layer(Box::new(EarthquakeLayer::new(
            EARTHQUAKE_LAYER_ID.to_string(),
            events,
        )))
    }

    pub fn earthquake_layer(&self) -> Option<&EarthquakeLayer> {
        self.layers.get_layer_as::<EarthquakeLayer>(EARTHQUAKE_LAYER_ID)
    }

    /// Renders the active base layer, visible overlays and the controls
    pub fn render(&mut self) -> Result<Scene> {
        let mut context = RenderContext::for_viewport(&self.viewport);
        context.begin_frame();

        self.layers
            .render(&mut context, &self.viewport, Some(self.active_base.as_str()))?;

        let (base_layers, overlays) = self.layers.entries(&self.active_base);
        self.controls.update_layers(base_layers, overlays);
        self.controls.render(&mut context)?;

        let scene = context.finish(&self.viewport);
        log::debug!("rendered scene with {} commands", scene.commands.len());
        Ok(scene)
    }
}

/// Fetches events from `source` and builds the map around them
pub async fn load_from_source(source: &dyn FeedSource, config: MapConfig) -> Result<Map> {
    let mut map = Map::new(config)?;

    let geojson = source.fetch().await?;
    let events = EarthquakeEvent::from_geojson(&geojson);
    log::info!(
        "{} of {} features from {} are earthquakes",
        events.len(),
        geojson.features().len(),
        source.describe()
    );

    map.add_earthquakes(events)?;
    Ok(map)
}

/// Loads the configured feed and renders the map once
pub async fn load_earthquake_map(config: MapConfig) -> Result<(Map, Scene)> {
    let feed = HttpFeed::with_timeout(config.feed_url.clone(), config.request_timeout())?;
    let mut map = load_from_source(&feed, config).await?;
    let scene = map.render()?;
    Ok((map, scene))
}
