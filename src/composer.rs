//! Assembles the full map view: base layers, both overlays, legend and the
//! initial layer-control state.
//!
//! The view is a plain value. Layer toggling after load is handled by the map
//! library in the browser; [`LayerVisibility`] mirrors that state so the
//! initial selection can be requested and reasoned about server-side.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::boundaries::{render_boundaries, BoundaryOverlay};
use crate::classify::hex_for;
use crate::constants::{LEGEND_GRADES, TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL_TEMPLATE};
use crate::feed::{FeedClient, FeedError, LatLng};
use crate::markers::{build_earthquake_layer, CircleMarker, EarthquakeLayer};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseLayerKind {
    #[default]
    Satellite,
    Light,
}

impl BaseLayerKind {
    pub const ALL: [BaseLayerKind; 2] = [BaseLayerKind::Satellite, BaseLayerKind::Light];

    pub fn name(self) -> &'static str {
        match self {
            BaseLayerKind::Satellite => "Satellite",
            BaseLayerKind::Light => "Light",
        }
    }

    pub fn tile_id(self) -> &'static str {
        match self {
            BaseLayerKind::Satellite => "mapbox.satellite",
            BaseLayerKind::Light => "mapbox.light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Earthquakes,
    Plates,
}

/// Which base layer is selected (radio) and which overlays are on (checkboxes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerVisibility {
    pub base: BaseLayerKind,
    pub earthquakes: bool,
    pub plates: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            base: BaseLayerKind::Satellite,
            earthquakes: true,
            plates: true,
        }
    }
}

impl LayerVisibility {
    pub fn select_base(&mut self, base: BaseLayerKind) {
        self.base = base;
    }

    pub fn set(&mut self, overlay: Overlay, visible: bool) {
        match overlay {
            Overlay::Earthquakes => self.earthquakes = visible,
            Overlay::Plates => self.plates = visible,
        }
    }

    pub fn toggle(&mut self, overlay: Overlay) {
        let visible = self.is_visible(overlay);
        self.set(overlay, !visible);
    }

    pub fn is_visible(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Earthquakes => self.earthquakes,
            Overlay::Plates => self.plates,
        }
    }
}

/// Tile layer description handed to the map library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseLayer {
    pub kind: BaseLayerKind,
    pub name: &'static str,
    pub url_template: &'static str,
    pub id: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub access_token: String,
}

impl BaseLayer {
    fn new(kind: BaseLayerKind, access_token: &str) -> Self {
        Self {
            kind,
            name: kind.name(),
            url_template: TILE_URL_TEMPLATE,
            id: kind.tile_id(),
            attribution: TILE_ATTRIBUTION,
            max_zoom: TILE_MAX_ZOOM,
            access_token: access_token.to_string(),
        }
    }
}

/// Load outcome of one overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LayerStatus<T> {
    Ready { layer: T },
    Unavailable { reason: String },
}

impl<T> LayerStatus<T> {
    pub fn from_result(name: &str, result: Result<T, FeedError>) -> Self {
        match result {
            Ok(layer) => LayerStatus::Ready { layer },
            Err(e) => {
                warn!(layer = name, error = %e, "layer unavailable");
                LayerStatus::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LayerStatus::Ready { layer } => Some(layer),
            LayerStatus::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer<T> {
    pub name: &'static str,
    pub status: LayerStatus<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub entries: Vec<LegendEntry>,
}

/// Six magnitude bands, each swatch taken from the band's midpoint.
pub fn legend() -> Legend {
    Legend {
        position: "bottomleft",
        entries: LEGEND_GRADES
            .iter()
            .map(|&(grade, label)| LegendEntry {
                label,
                color: hex_for(grade),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub zoom_control: bool,
    pub layer_control_collapsed: bool,
}

impl MapOptions {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            center: LatLng {
                lat: settings.center_lat,
                lng: settings.center_lon,
            },
            zoom: settings.zoom,
            dragging: true,
            scroll_wheel_zoom: false,
            double_click_zoom: true,
            zoom_control: true,
            layer_control_collapsed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub options: MapOptions,
    pub base_layers: Vec<BaseLayer>,
    pub plates: OverlayLayer<BoundaryOverlay>,
    pub earthquakes: OverlayLayer<EarthquakeLayer>,
    pub legend: Legend,
    pub visibility: LayerVisibility,
}

impl MapView {
    pub fn base_layer(&self, kind: BaseLayerKind) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|b| b.kind == kind)
    }

    /// Markers on screen for the given layer-control state.
    pub fn visible_markers(&self, visibility: &LayerVisibility) -> &[CircleMarker] {
        match self.earthquakes.status.ready() {
            Some(layer) if visibility.earthquakes => &layer.markers,
            _ => &[],
        }
    }

    pub fn visible_boundaries(&self, visibility: &LayerVisibility) -> Option<&BoundaryOverlay> {
        self.plates.status.ready().filter(|_| visibility.plates)
    }
}

/// Builds a view from already loaded layers.
pub fn assemble(
    settings: &Settings,
    visibility: LayerVisibility,
    earthquakes: Result<EarthquakeLayer, FeedError>,
    plates: Result<BoundaryOverlay, FeedError>,
) -> MapView {
    MapView {
        options: MapOptions::from_settings(settings),
        base_layers: BaseLayerKind::ALL
            .iter()
            .map(|&kind| BaseLayer::new(kind, &settings.access_token))
            .collect(),
        plates: OverlayLayer {
            name: "Tectonic Plates",
            status: LayerStatus::from_result("plates", plates),
        },
        earthquakes: OverlayLayer {
            name: "Earthquakes",
            status: LayerStatus::from_result("earthquakes", earthquakes),
        },
        legend: legend(),
        visibility,
    }
}

/// Fetches both feeds concurrently and composes the view. A failed feed leaves
/// its overlay unavailable without affecting the other.
pub async fn compose(client: &FeedClient, settings: &Settings, visibility: LayerVisibility) -> MapView {
    let (earthquakes, plates) =
        tokio::join!(client.fetch_earthquakes(), client.fetch_plate_boundaries());

    assemble(
        settings,
        visibility,
        earthquakes.map(|events| build_earthquake_layer(&events)),
        plates.map(|plates| render_boundaries(&plates)),
    )
}
