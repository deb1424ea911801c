use serde::Serialize;

use crate::constants::PLATE_STROKE_COLOR;
use crate::feed::{LatLng, PlateBoundary};

/// All plate boundaries as one overlay, drawn with a single stroke color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryOverlay {
    pub color: &'static str,
    pub lines: Vec<Vec<LatLng>>,
}

pub fn render_boundaries(plates: &[PlateBoundary]) -> BoundaryOverlay {
    BoundaryOverlay {
        color: PLATE_STROKE_COLOR,
        lines: plates.iter().flat_map(|p| p.lines.iter().cloned()).collect(),
    }
}
