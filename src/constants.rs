// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Feed sources
pub const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

// Tile service
pub const TILE_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";
pub const TILE_ATTRIBUTION: &str = "Map data &copy; <a href='https://www.openstreetmap.org/'>OpenStreetMap</a> contributors, <a href='https://creativecommons.org/licenses/by-sa/2.0/'>CC-BY-SA</a>, Imagery © <a href='https://www.mapbox.com/'>Mapbox</a>";
pub const TILE_MAX_ZOOM: u8 = 18;
pub const ACCESS_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

// Initial view
pub const DEFAULT_CENTER: (f64, f64) = (35.0, -70.0);
pub const DEFAULT_ZOOM: u8 = 3;

// Marker styling
pub const RADIUS_PER_MAGNITUDE: f64 = 50_000.0; // metres per magnitude unit, linear
pub const MARKER_FILL_OPACITY: f64 = 0.75;
pub const PLATE_STROKE_COLOR: &str = "#ff9933";

// Legend: representative magnitude for each band, paired with its label
pub const LEGEND_GRADES: [(f64, &str); 6] = [
    (0.5, "0-1"),
    (1.5, "1-2"),
    (2.5, "2-3"),
    (3.5, "3-4"),
    (4.5, "4-5"),
    (5.5, "5+"),
];
