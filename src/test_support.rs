//! Fixtures and a throwaway feed server for tests.

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::settings::Settings;

/// 2024-01-15T12:30:00Z
pub const QUAKE_TIME_MS: i64 = 1_705_321_800_000;

/// Base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Settings whose feeds live under `base` at `/quakes` and `/plates`.
pub fn settings(base: &str) -> Settings {
    Settings {
        earthquakes_url: format!("{}/quakes", base),
        plates_url: format!("{}/plates", base),
        access_token: "pk.test".to_string(),
        ..Settings::default()
    }
}

pub fn quake_feature(mag: f64, lon: f64, lat: f64, tsunami: i64) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "mag": mag,
            "place": "10km NE of Testville, CA",
            "time": QUAKE_TIME_MS,
            "type": "earthquake",
            "tsunami": tsunami
        },
        "geometry": { "type": "Point", "coordinates": [lon, lat, 8.2] },
        "id": "test"
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// One `LineString` boundary and one `MultiLineString` boundary.
pub fn plates() -> Value {
    collection(vec![
        json!({
            "type": "Feature",
            "properties": { "Name": "AF-AN" },
            "geometry": {
                "type": "LineString",
                "coordinates": [[179.6, -0.4], [180.0, 1.2], [-179.5, 2.0]]
            }
        }),
        json!({
            "type": "Feature",
            "properties": { "Name": "AN-AU" },
            "geometry": {
                "type": "MultiLineString",
                "coordinates": [
                    [[10.0, 20.0], [11.0, 21.0]],
                    [[12.0, 22.0], [13.0, 23.0]]
                ]
            }
        }),
    ])
}
