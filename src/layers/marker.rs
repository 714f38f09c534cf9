use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    quake::style::CircleMarkerOptions,
    rendering::context::RenderContext,
    ui::popup::PopupContent,
    Result,
};

/// A circle drawn at a fixed pixel radius, whatever the zoom
pub struct CircleMarker {
    properties: LayerProperties,
    position: LatLng,
    style: CircleMarkerOptions,
    popup: Option<PopupContent>,
}

impl CircleMarker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Circle Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            style: CircleMarkerOptions::default(),
            popup: None,
        }
    }

    pub fn with_style(mut self, style: CircleMarkerOptions) -> Self {
        self.style = style;
        self
    }

    pub fn with_popup(mut self, popup: PopupContent) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn with_popup_text(self, text: &str) -> Self {
        self.with_popup(PopupContent::text(text))
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn style(&self) -> &CircleMarkerOptions {
        &self.style
    }

    pub fn popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref()
    }

    /// Queues the marker as part of layer `layer_id`
    pub(crate) fn draw(&self, layer_id: &str, context: &mut RenderContext, viewport: &Viewport) {
        let mut style = self.style.clone();
        style.fill_opacity *= self.properties.opacity as f64;

        context.render_circle_marker(
            layer_id,
            &self.properties.id,
            self.position,
            viewport.lat_lng_to_pixel(&self.position),
            style,
            self.popup.clone(),
        );
    }
}

impl LayerTrait for CircleMarker {
    crate::impl_layer_trait!(CircleMarker, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        self.draw(&self.properties.id, context, viewport);
        Ok(())
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "style": self.style,
            "popup": self.popup.as_ref().map(|p| &p.text)
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}
