use crate::{
    core::{
        constants::{BASE_LAYER_Z_INDEX, TILE_SIZE},
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{RenderContext, TileDraw},
    Result,
};
use serde::{Deserialize, Serialize};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: Option<String>,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: None,
            tile_size: TILE_SIZE,
            max_zoom: 18,
            min_zoom: 0,
        }
    }
}

/// Base map preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMap {
    Street,
    Satellite,
    Grayscale,
}

impl BaseMap {
    pub fn id(&self) -> &'static str {
        match self {
            BaseMap::Street => "street",
            BaseMap::Satellite => "satellite",
            BaseMap::Grayscale => "grayscale",
        }
    }

    /// Name shown in the layer switcher
    pub fn display_name(&self) -> &'static str {
        match self {
            BaseMap::Street => "Street Map",
            BaseMap::Satellite => "Satellite",
            BaseMap::Grayscale => "Grayscale",
        }
    }

    pub fn options(&self) -> TileLayerOptions {
        match self {
            BaseMap::Street => TileLayerOptions {
                attribution: Some(
                    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                        .to_string(),
                ),
                ..TileLayerOptions::default()
            },
            BaseMap::Satellite => TileLayerOptions {
                url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".to_string(),
                // ArcGIS doesn't use subdomains
                subdomains: Vec::new(),
                attribution: Some(
                    "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community"
                        .to_string(),
                ),
                ..TileLayerOptions::default()
            },
            BaseMap::Grayscale => TileLayerOptions {
                url_template: "https://tiles.wmflabs.org/bw-mapnik/{z}/{x}/{y}.png".to_string(),
                subdomains: Vec::new(),
                attribution: Some(
                    "Map data &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                        .to_string(),
                ),
                ..TileLayerOptions::default()
            },
        }
    }

    pub fn layer(&self) -> TileLayer {
        TileLayer::with_options(
            self.id().to_string(),
            self.display_name().to_string(),
            self.options(),
        )
    }
}

/// A tile-based layer that displays map tiles from a tile server
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with default OpenStreetMap tiles
    pub fn new(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Tile);
        properties.z_index = BASE_LAYER_Z_INDEX;
        Self {
            properties,
            options,
        }
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Expands the URL template for one tile
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x + coord.y) % self.options.subdomains.len() as u32) as usize;
            self.options.subdomains[idx].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "")
    }

    /// Tiles covering the viewport at the nearest zoom this source serves
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileDraw> {
        let zoom = viewport
            .zoom
            .round()
            .clamp(self.options.min_zoom as f64, self.options.max_zoom as f64);
        let tile_zoom = zoom as u8;
        let tile_px = self.options.tile_size as f64 * 2_f64.powf(viewport.zoom - zoom);

        let origin = viewport.container_origin();
        let max_index = 2_u32.pow(tile_zoom as u32) - 1;
        let index = |world: f64| (world / tile_px).floor().clamp(0.0, max_index as f64) as u32;

        let (min_x, min_y) = (index(origin.x), index(origin.y));
        let (max_x, max_y) = (
            index(origin.x + viewport.size.x),
            index(origin.y + viewport.size.y),
        );

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let coord = TileCoord::new(x, y, tile_zoom);
                let min = Point::new(x as f64 * tile_px, y as f64 * tile_px).subtract(&origin);
                let max = min.add(&Point::new(tile_px, tile_px));
                tiles.push(TileDraw {
                    coord,
                    url: self.tile_url(coord),
                    bounds: (min, max),
                });
            }
        }
        tiles
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let tiles = self.visible_tiles(viewport);
        log::debug!(
            "rendering tile layer {}: {} tiles at zoom {}",
            self.properties.id,
            tiles.len(),
            viewport.zoom
        );

        context.render_tile_layer(
            &self.properties.id,
            &self.properties.name,
            &self.options.url_template,
            self.options.attribution.as_deref(),
            self.properties.opacity,
            tiles,
        )
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url_template": self.options.url_template,
            "subdomains": self.options.subdomains,
            "attribution": self.options.attribution,
            "min_zoom": self.options.min_zoom,
            "max_zoom": self.options.max_zoom
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    #[test]
    fn test_street_tile_url_rotates_subdomains() {
        let layer = BaseMap::Street.layer();
        assert_eq!(
            layer.tile_url(TileCoord::new(3, 5, 4)),
            "https://c.tile.openstreetmap.org/4/3/5.png"
        );
        assert_eq!(
            layer.tile_url(TileCoord::new(0, 0, 0)),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn test_satellite_url_is_row_major() {
        let layer = BaseMap::Satellite.layer();
        assert_eq!(
            layer.tile_url(TileCoord::new(3, 5, 4)),
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/4/5/3"
        );
    }

    #[test]
    fn test_grayscale_url() {
        let layer = BaseMap::Grayscale.layer();
        assert_eq!(layer.id(), "grayscale");
        assert_eq!(layer.name(), "Grayscale");
        assert_eq!(
            layer.tile_url(TileCoord::new(1, 2, 3)),
            "https://tiles.wmflabs.org/bw-mapnik/3/1/2.png"
        );
    }

    #[test]
    fn test_whole_world_at_zoom_zero() {
        let layer = TileLayer::new("osm".to_string(), "OSM".to_string());
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 0.0, Point::new(256.0, 256.0));
        let tiles = layer.visible_tiles(&viewport);

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].coord, TileCoord::new(0, 0, 0));
        assert_eq!(tiles[0].bounds.0, Point::new(0.0, 0.0));
        assert_eq!(tiles[0].bounds.1, Point::new(256.0, 256.0));
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let layer = BaseMap::Street.layer();
        let viewport = Viewport::new(LatLng::new(37.09, -95.71), 5.0, Point::new(1024.0, 768.0));
        let tiles = layer.visible_tiles(&viewport);

        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.coord.z == 5 && t.coord.is_valid()));
        let center_tile = TileCoord::from_lat_lng(&viewport.center, 5);
        assert!(tiles.iter().any(|t| t.coord == center_tile));
    }

    #[test]
    fn test_tile_layer_defaults() {
        let layer = BaseMap::Street.layer();
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(layer.z_index(), BASE_LAYER_Z_INDEX);
        assert_eq!(layer.options()["subdomains"].as_array().unwrap().len(), 3);
    }
}
