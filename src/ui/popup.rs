use crate::quake::event::EarthquakeEvent;
use serde::{Deserialize, Serialize};

/// Popup bound to a marker, in plain text and HTML form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    pub text: String,
    pub html: String,
}

impl PopupContent {
    /// Plain text popup, HTML form escaped from it
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let html = format!("<p>{}</p>", escape_html(&text).replace('\n', "<br>"));
        Self { text, html }
    }

    /// Popup describing one earthquake
    pub fn for_event(event: &EarthquakeEvent) -> Self {
        let time = event.formatted_time();
        let text = format!(
            "Magnitude: {}\nLocation: {}\nDepth: {}\n{}",
            event.magnitude, event.place, event.depth_km, time
        );
        let html = format!(
            "<h3>Magnitude: {}</h3><h3>Location: {}</h3><h3>Depth: {}</h3><hr><p>{}</p>",
            event.magnitude,
            escape_html(&event.place),
            event.depth_km,
            time
        );
        Self { text, html }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn event(place: &str) -> EarthquakeEvent {
        EarthquakeEvent {
            id: "ci40000001".to_string(),
            magnitude: 4.5,
            depth_km: 10.0,
            place: place.to_string(),
            timestamp_ms: 1_700_000_000_000,
            position: LatLng::new(33.5, -116.8),
        }
    }

    #[test]
    fn test_event_popup_text() {
        let popup = PopupContent::for_event(&event("10 km SW of Anza, CA"));
        assert_eq!(
            popup.text,
            "Magnitude: 4.5\nLocation: 10 km SW of Anza, CA\nDepth: 10\n\
             Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_event_popup_html_escapes_place() {
        let popup = PopupContent::for_event(&event("<b>Anza</b> & co"));
        assert!(popup
            .html
            .starts_with("<h3>Magnitude: 4.5</h3><h3>Location: &lt;b&gt;Anza&lt;/b&gt; &amp; co</h3>"));
        assert!(popup.html.contains("<h3>Depth: 10</h3><hr><p>Tue Nov 14 2023"));
    }

    #[test]
    fn test_text_popup() {
        let popup = PopupContent::text("a < b\nnext");
        assert_eq!(popup.html, "<p>a &lt; b<br>next</p>");
    }
}
