use serde::Serialize;

use crate::classify::hex_for;
use crate::constants::{MARKER_FILL_OPACITY, RADIUS_PER_MAGNITUDE};
use crate::feed::{EarthquakeEvent, LatLng};

/// Render-ready circle for one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub center: LatLng,
    pub fill_opacity: f64,
    /// Stroke color; `None` leaves the map library's default.
    pub color: Option<&'static str>,
    pub fill_color: Option<&'static str>,
    /// Metres.
    pub radius: f64,
    pub popup: String,
}

/// Every earthquake marker of one load, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EarthquakeLayer {
    pub markers: Vec<CircleMarker>,
}

pub fn radius_for(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

pub fn tsunami_alert(raised: bool) -> &'static str {
    if raised {
        "Tsunami alert"
    } else {
        "No Tsunami Alert"
    }
}

pub fn popup_content(event: &EarthquakeEvent) -> String {
    format!(
        "<h4>{}</h4>{}<br>{}<br>{}",
        escape_html(&event.event_type),
        escape_html(&event.place),
        event.timestamp.format("%a %b %d %Y %H:%M:%S GMT%z (UTC)"),
        tsunami_alert(event.tsunami)
    )
}

pub fn build_marker(event: &EarthquakeEvent) -> CircleMarker {
    let color = hex_for(event.magnitude);
    CircleMarker {
        center: event.coordinates,
        fill_opacity: MARKER_FILL_OPACITY,
        color,
        fill_color: color,
        radius: radius_for(event.magnitude),
        popup: popup_content(event),
    }
}

pub fn build_earthquake_layer(events: &[EarthquakeEvent]) -> EarthquakeLayer {
    EarthquakeLayer {
        markers: events.iter().map(build_marker).collect(),
    }
}

/// Popups are inserted as HTML; feed text is escaped before it enters one.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
