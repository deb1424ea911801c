use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;
use serde::Deserialize;
use tracing::{error, info};

use crate::composer::{self, BaseLayerKind, LayerVisibility, Legend, MapView};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

/// Optional initial layer-control state for `/api/view`.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub base: Option<BaseLayerKind>,
    pub earthquakes: Option<bool>,
    pub plates: Option<bool>,
}

impl ViewQuery {
    pub fn visibility(&self) -> LayerVisibility {
        let mut visibility = LayerVisibility::default();
        if let Some(base) = self.base {
            visibility.select_base(base);
        }
        if let Some(on) = self.earthquakes {
            visibility.set(composer::Overlay::Earthquakes, on);
        }
        if let Some(on) = self.plates {
            visibility.set(composer::Overlay::Plates, on);
        }
        visibility
    }
}

// One full load of both feeds per request
pub async fn get_map_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<MapView> {
    let view = composer::compose(&state.client, &state.settings, query.visibility()).await;
    info!(
        markers = view.visible_markers(&view.visibility).len(),
        boundaries = view
            .visible_boundaries(&view.visibility)
            .map_or(0, |o| o.lines.len()),
        "map view composed"
    );
    Json(view)
}

pub async fn get_legend() -> Json<Legend> {
    Json(composer::legend())
}

fn embedded(path: &str, content_type: &'static str) -> Result<Response, StatusCode> {
    let file = Asset::get(path).ok_or_else(|| {
        error!(path, "embedded asset missing");
        StatusCode::NOT_FOUND
    })?;
    Ok(([(header::CONTENT_TYPE, content_type)], file.data.into_owned()).into_response())
}

pub async fn index_html() -> Result<Html<Vec<u8>>, StatusCode> {
    let file = Asset::get("index.html").ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(file.data.into_owned()))
}

pub async fn style_css() -> Result<Response, StatusCode> {
    embedded("style.css", "text/css")
}

pub async fn script_js() -> Result<Response, StatusCode> {
    embedded("script.js", "application/javascript")
}
