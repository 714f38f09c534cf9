use quakemap::{
    load_earthquake_map, DataLoadError, DrawCommand, HttpFeed, MapBuilder, MapConfig, MapError,
    MapProfile,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// A slice of a USGS summary feed: three usable events, one without a
/// magnitude and one with 2-D coordinates.
const FEED: &str = r#"{
    "type": "FeatureCollection",
    "metadata": {
        "generated": 1700000000000,
        "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson",
        "title": "USGS All Earthquakes, Past Week",
        "count": 5
    },
    "features": [
        {
            "type": "Feature",
            "id": "us7000deep",
            "properties": {"mag": 6.5, "place": "45 km W of Tulsa, Oklahoma", "time": 1700000000000},
            "geometry": {"type": "Point", "coordinates": [-96.4, 36.1, 95.2]}
        },
        {
            "type": "Feature",
            "id": "ok2023zero",
            "properties": {"mag": 0, "place": null, "time": 1700000100000},
            "geometry": {"type": "Point", "coordinates": [-97.5, 35.5, 5.0]}
        },
        {
            "type": "Feature",
            "id": "tx2023mid",
            "properties": {"mag": 2.5, "place": "Pecos, Texas", "time": 1700000200000},
            "geometry": {"type": "Point", "coordinates": [-103.5, 31.4, 70.0]}
        },
        {
            "type": "Feature",
            "id": "nomag",
            "properties": {"mag": null, "place": "Unknown", "time": 1700000300000},
            "geometry": {"type": "Point", "coordinates": [-100.0, 38.0, 12.0]}
        },
        {
            "type": "Feature",
            "id": "flat",
            "properties": {"mag": 3.1, "place": "Flatland", "time": 1700000400000},
            "geometry": {"type": "Point", "coordinates": [-100.0, 38.0]}
        }
    ]
}"#;

async fn feed_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary/all_week.geojson"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer, profile: MapProfile) -> MapConfig {
    MapBuilder::from_profile(profile)
        .with_feed_url(format!("{}/summary/all_week.geojson", server.uri()))
        .with_request_timeout_secs(5)
        .into_config()
}

fn marker_styles(scene: &quakemap::Scene) -> Vec<(String, f64, String)> {
    scene
        .markers()
        .filter_map(|command| match command {
            DrawCommand::CircleMarker { id, options, .. } => {
                Some((id.clone(), options.radius, options.fill_color.clone()))
            }
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_feed_renders_styled_markers() {
    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;

    let (map, scene) = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .unwrap();

    assert_eq!(
        marker_styles(&scene),
        vec![
            ("us7000deep".to_string(), 26.0, "#EA2C2C".to_string()),
            ("ok2023zero".to_string(), 1.0, "#98EE00".to_string()),
            ("tx2023mid".to_string(), 10.0, "#EE9C00".to_string()),
        ]
    );
    assert_eq!(map.earthquake_layer().unwrap().event_count(), 3);

    let legend: Vec<_> = scene
        .legend_rows()
        .unwrap()
        .iter()
        .map(|row| (row.color.hex(), row.label.as_str()))
        .collect();
    assert_eq!(
        legend,
        vec![
            ("#98EE00", "0–1"),
            ("#98EE00", "1–10"),
            ("#D4EE00", "10–30"),
            ("#EECC00", "30–50"),
            ("#EE9C00", "50–70"),
            ("#EA822C", "70+"),
        ]
    );
}

#[tokio::test]
async fn test_marker_popups_and_style_options() {
    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;
    let (_map, scene) = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .unwrap();

    let first = scene.markers().next().unwrap();
    match first {
        DrawCommand::CircleMarker { options, popup, .. } => {
            assert_eq!(options.fill_opacity, 0.6);
            assert_eq!(options.color, "#000");
            assert!(options.stroke);
            assert_eq!(options.weight, 0.8);
            assert_eq!(
                popup.as_ref().unwrap().text,
                "Magnitude: 6.5\nLocation: 45 km W of Tulsa, Oklahoma\nDepth: 95.2\n\
                 Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)"
            );
        }
        other => panic!("expected a marker, got {:?}", other),
    }

    let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
    let marker = json["commands"]
        .as_array()
        .unwrap()
        .iter()
        .find(|command| command["kind"] == "circle_marker")
        .unwrap();
    assert_eq!(marker["options"]["fillColor"], "#EA2C2C");
    assert_eq!(marker["options"]["fillOpacity"], 0.6);
}

#[tokio::test]
async fn test_layered_profile_scene() {
    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;
    let (map, scene) = load_earthquake_map(config_for(&server, MapProfile::Layered))
        .await
        .unwrap();

    assert_eq!(map.list_layers().len(), 4);
    assert_eq!(scene.tile_layer_ids(), vec!["street"]);

    match scene.layers_control() {
        Some(DrawCommand::LayersControl {
            collapsed,
            base_layers,
            overlays,
            ..
        }) => {
            assert!(!collapsed);
            let names: Vec<_> = base_layers.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["Street Map", "Satellite", "Grayscale"]);
            assert!(base_layers[0].active);
            assert_eq!(overlays[0].name, "Earthquakes");
            assert!(overlays[0].active);
        }
        other => panic!("expected a layers control, got {:?}", other),
    }
}

#[tokio::test]
async fn test_basic_profile_has_no_layers_control() {
    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;
    let (map, scene) = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .unwrap();

    assert_eq!(map.list_layers(), vec!["street", "earthquakes"]);
    assert!(scene.layers_control().is_none());
    assert!(scene.legend_rows().is_some());
}

#[tokio::test]
async fn test_styled_geojson_export() {
    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;
    let (map, _scene) = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .unwrap();

    let geojson = map.earthquake_layer().unwrap().to_styled_geojson();
    let features = geojson.features();
    assert_eq!(features.len(), 3);
    assert_eq!(features[1].property("radius").unwrap(), 1.0);
    assert_eq!(*features[1].property("fillColor").unwrap(), "#98EE00");
    assert!(features[2]
        .property("popup")
        .and_then(|p| p.as_str())
        .unwrap()
        .starts_with("<h3>Magnitude: 2.5</h3><h3>Location: Pecos, Texas</h3>"));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = feed_server(ResponseTemplate::new(500)).await;
    let err = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .err()
        .unwrap();

    match err {
        MapError::DataLoad(DataLoadError::Status { url, status }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/summary/all_week.geojson"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = feed_server(
        ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"),
    )
    .await;
    let err = load_earthquake_map(config_for(&server, MapProfile::Basic))
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err,
        MapError::DataLoad(DataLoadError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_http_feed_fetches_document() {
    use quakemap::FeedSource;

    let server =
        feed_server(ResponseTemplate::new(200).set_body_raw(FEED, "application/json")).await;
    let feed = HttpFeed::new(format!("{}/summary/all_week.geojson", server.uri()));
    let geojson = feed.fetch().await.unwrap();

    assert_eq!(geojson.features().len(), 5);
    assert_eq!(geojson.metadata().unwrap().count, Some(5));
}
