use crate::{
    core::{
        constants::{EARTHQUAKE_OVERLAY_NAME, OVERLAY_Z_INDEX},
        geo::LatLngBounds,
        viewport::Viewport,
    },
    data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        marker::CircleMarker,
    },
    quake::{event::EarthquakeEvent, style::CircleMarkerOptions},
    rendering::context::RenderContext,
    ui::popup::PopupContent,
    Result,
};
use std::collections::HashMap;

type StyleFn = Box<dyn Fn(&EarthquakeEvent) -> CircleMarkerOptions + Send + Sync>;
type PopupFn = Box<dyn Fn(&EarthquakeEvent) -> PopupContent + Send + Sync>;
type FilterFn = Box<dyn Fn(&EarthquakeEvent) -> bool + Send + Sync>;

/// Overlay turning each earthquake into a styled circle marker with a popup.
///
/// Markers are built from the events on every render, so a new style or
/// popup function takes effect immediately.
pub struct EarthquakeLayer {
    properties: LayerProperties,
    events: Vec<EarthquakeEvent>,
    style_function: StyleFn,
    popup_function: PopupFn,
    filter: Option<FilterFn>,
}

impl EarthquakeLayer {
    pub fn new(id: String, events: Vec<EarthquakeEvent>) -> Self {
        let mut properties =
            LayerProperties::new(id, EARTHQUAKE_OVERLAY_NAME.to_string(), LayerType::GeoJson);
        properties.z_index = OVERLAY_Z_INDEX;

        Self {
            properties,
            events,
            style_function: Box::new(|event: &EarthquakeEvent| event.style().circle_options()),
            popup_function: Box::new(PopupContent::for_event),
            filter: None,
        }
    }

    /// Reads the events of a GeoJSON document, skipping unusable features
    pub fn from_geojson(id: String, geojson: &GeoJson) -> Self {
        Self::new(id, EarthquakeEvent::from_geojson(geojson))
    }

    /// Sets a function to style markers based on their event
    pub fn set_style_function<F>(mut self, style_fn: F) -> Self
    where
        F: Fn(&EarthquakeEvent) -> CircleMarkerOptions + Send + Sync + 'static,
    {
        self.style_function = Box::new(style_fn);
        self
    }

    /// Sets a function building each marker's popup
    pub fn set_popup_function<F>(mut self, popup_fn: F) -> Self
    where
        F: Fn(&EarthquakeEvent) -> PopupContent + Send + Sync + 'static,
    {
        self.popup_function = Box::new(popup_fn);
        self
    }

    /// Sets a filter function to show/hide events
    pub fn set_filter<F>(mut self, filter_fn: F) -> Self
    where
        F: Fn(&EarthquakeEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter_fn));
        self
    }

    /// Events passing the filter
    pub fn events(&self) -> Vec<&EarthquakeEvent> {
        self.events
            .iter()
            .filter(|event| self.filter.as_ref().map_or(true, |f| f(event)))
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    /// One circle marker per shown event
    pub fn markers(&self) -> Vec<CircleMarker> {
        self.events()
            .into_iter()
            .map(|event| {
                let mut marker = CircleMarker::new(event.id.clone(), event.position)
                    .with_style((self.style_function)(event))
                    .with_popup((self.popup_function)(event));
                marker.set_opacity(self.properties.opacity);
                marker
            })
            .collect()
    }

    /// The shown events as GeoJSON whose properties carry the marker style and popup
    pub fn to_styled_geojson(&self) -> GeoJson {
        let features = self
            .events()
            .into_iter()
            .map(|event| {
                let style = (self.style_function)(event);
                let popup = (self.popup_function)(event);

                let mut properties: HashMap<String, serde_json::Value> = HashMap::new();
                properties.insert("mag".to_string(), event.magnitude.into());
                properties.insert("place".to_string(), event.place.clone().into());
                properties.insert("time".to_string(), event.timestamp_ms.into());
                properties.insert("radius".to_string(), style.radius.into());
                properties.insert("fillColor".to_string(), style.fill_color.clone().into());
                properties.insert("style".to_string(), serde_json::json!(style));
                properties.insert("popup".to_string(), popup.html.into());

                GeoJsonFeature {
                    id: Some(event.id.clone().into()),
                    geometry: Some(GeoJsonGeometry::point(
                        event.position.lng,
                        event.position.lat,
                        event.depth_km,
                    )),
                    properties: Some(properties),
                }
            })
            .collect();

        GeoJson::collection(features)
    }
}

impl LayerTrait for EarthquakeLayer {
    crate::impl_layer_trait!(EarthquakeLayer, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let markers = self.markers();
        log::debug!(
            "rendering {} earthquake markers in layer {}",
            markers.len(),
            self.properties.id
        );

        for marker in &markers {
            marker.draw(&self.properties.id, context, viewport);
        }
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.events().into_iter().map(|event| &event.position))
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "event_count": self.events.len(),
            "shown_count": self.event_count(),
            "filtered": self.filter.is_some()
        })
    }
}
