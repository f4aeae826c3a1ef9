/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 16;

/// Default tile layer URL (OSM humanitarian style).
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";

/// Session configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Map zoom level for init and recall panning (default: `16`).
    pub zoom: u8,
    /// Tile layer URL template (default: OSM-HOT).
    pub tile_url: String,
}

impl SessionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var    | Default                                            |
    /// |------------|----------------------------------------------------|
    /// | `MAP_ZOOM` | `16`                                               |
    /// | `TILE_URL` | `https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png` |
    pub fn from_env() -> Self {
        let zoom: u8 = std::env::var("MAP_ZOOM")
            .unwrap_or_else(|_| DEFAULT_ZOOM.to_string())
            .parse()
            .expect("MAP_ZOOM must be a valid u8");

        let tile_url = std::env::var("TILE_URL").unwrap_or_else(|_| DEFAULT_TILE_URL.into());

        Self { zoom, tile_url }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
        }
    }
}
