//! Feed retrieval and decoding.
//!
//! Both feeds are GeoJSON `FeatureCollection` documents. Decoding is strict: one
//! malformed record fails the whole collection, and the caller turns that
//! failure into an unavailable layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::settings::Settings;

/// Errors raised while fetching or decoding a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid feed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("position has {0} value(s), expected at least longitude and latitude")]
    Coordinates(usize),
}

/// Geographic position in map order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Converts a GeoJSON position (`[lon, lat, ...]`) into map order.
    pub fn from_position(position: &[f64]) -> Result<Self, FeedError> {
        match position {
            [lng, lat, ..] => Ok(LatLng { lat: *lat, lng: *lng }),
            _ => Err(FeedError::Coordinates(position.len())),
        }
    }
}

/// One earthquake record, as read from the summary feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeEvent {
    pub magnitude: f64,
    pub coordinates: LatLng,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub place: String,
    /// Raised for any tsunami flag other than 0.
    pub tsunami: bool,
}

/// One plate boundary, flattened to its polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    pub lines: Vec<Vec<LatLng>>,
}

#[derive(Deserialize)]
struct FeatureCollection<F> {
    features: Vec<F>,
}

#[derive(Deserialize)]
struct QuakeFeature {
    properties: QuakeProperties,
    geometry: PointGeometry,
}

#[derive(Deserialize)]
struct QuakeProperties {
    mag: Option<f64>,
    place: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    time: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: Option<String>,
    tsunami: Option<serde_json::Value>,
}

/// Only a numeric zero clears the alert; null, strings and other numbers raise it.
fn tsunami_raised(flag: Option<&serde_json::Value>) -> bool {
    flag.and_then(serde_json::Value::as_f64) != Some(0.0)
}

#[derive(Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

#[derive(Deserialize)]
struct BoundaryFeature {
    geometry: LineGeometry,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum LineGeometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
}

impl TryFrom<QuakeFeature> for EarthquakeEvent {
    type Error = FeedError;

    fn try_from(feature: QuakeFeature) -> Result<Self, Self::Error> {
        let props = feature.properties;
        Ok(EarthquakeEvent {
            // Null fields render the way the browser coerced them
            magnitude: props.mag.unwrap_or(0.0),
            coordinates: LatLng::from_position(&feature.geometry.coordinates)?,
            timestamp: props.time,
            event_type: props.kind.unwrap_or_else(|| "null".to_string()),
            place: props.place.unwrap_or_default(),
            tsunami: tsunami_raised(props.tsunami.as_ref()),
        })
    }
}

fn to_path(positions: &[Vec<f64>]) -> Result<Vec<LatLng>, FeedError> {
    positions.iter().map(|p| LatLng::from_position(p)).collect()
}

impl TryFrom<BoundaryFeature> for PlateBoundary {
    type Error = FeedError;

    fn try_from(feature: BoundaryFeature) -> Result<Self, Self::Error> {
        let lines = match feature.geometry {
            LineGeometry::LineString { coordinates } => vec![to_path(&coordinates)?],
            LineGeometry::MultiLineString { coordinates } => coordinates
                .iter()
                .map(|line| to_path(line))
                .collect::<Result<_, _>>()?,
        };
        Ok(PlateBoundary { lines })
    }
}

/// Decodes the earthquake summary feed.
pub fn parse_earthquakes(body: &[u8]) -> Result<Vec<EarthquakeEvent>, FeedError> {
    let collection: FeatureCollection<QuakeFeature> = serde_json::from_slice(body)?;
    collection
        .features
        .into_iter()
        .map(EarthquakeEvent::try_from)
        .collect()
}

/// Decodes the plate boundary feed.
pub fn parse_plate_boundaries(body: &[u8]) -> Result<Vec<PlateBoundary>, FeedError> {
    let collection: FeatureCollection<BoundaryFeature> = serde_json::from_slice(body)?;
    collection
        .features
        .into_iter()
        .map(PlateBoundary::try_from)
        .collect()
}

/// HTTP client for both feeds. Cheap to clone.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    earthquakes_url: String,
    plates_url: String,
}

impl FeedClient {
    pub fn new(settings: &Settings) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            earthquakes_url: settings.earthquakes_url.clone(),
            plates_url: settings.plates_url.clone(),
        })
    }

    pub async fn fetch_earthquakes(&self) -> Result<Vec<EarthquakeEvent>, FeedError> {
        let body = self.get(&self.earthquakes_url).await?;
        let events = parse_earthquakes(&body)?;
        info!(count = events.len(), "earthquake feed loaded");
        Ok(events)
    }

    pub async fn fetch_plate_boundaries(&self) -> Result<Vec<PlateBoundary>, FeedError> {
        let body = self.get(&self.plates_url).await?;
        let plates = parse_plate_boundaries(&body)?;
        info!(count = plates.len(), "plate boundary feed loaded");
        Ok(plates)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        debug!(url, "fetching feed");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_owned(),
                status,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
