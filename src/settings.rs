use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{
    ACCESS_TOKEN_ENV, DEFAULT_CENTER, DEFAULT_PORT, DEFAULT_ZOOM, EARTHQUAKES_URL, PLATES_URL,
};

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub earthquakes_url: String,
    pub plates_url: String,
    pub access_token: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            earthquakes_url: EARTHQUAKES_URL.to_string(),
            plates_url: PLATES_URL.to_string(),
            access_token: String::new(),
            center_lat: DEFAULT_CENTER.0,
            center_lon: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Settings {
    /// Loads `quakemap.ini`, writing a default one when none exists, then
    /// applies the access token from the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path(), std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    /// `load` against an explicit file and token, for callers that do not
    /// live next to the executable.
    pub fn load_from(config_path: &Path, env_token: Option<String>) -> Result<Self> {
        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            info!(path = %config_path.display(), "loaded settings");
            Self::from_ini(&content)
        } else {
            let defaults = Settings::default();
            if let Err(e) = defaults.save_to(config_path) {
                warn!(error = %e, "could not write default settings file");
            }
            defaults
        };

        settings.apply_token_override(env_token);
        if settings.access_token.is_empty() {
            warn!("no tile access token configured; set {} or access_token in quakemap.ini", ACCESS_TOKEN_ENV);
        }
        Ok(settings)
    }

    /// Parses `key = value` lines. Unknown keys and unparsable values keep
    /// their defaults.
    pub fn from_ini(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().trim_matches('"').to_string());
            }
        }

        if let Some(port) = config_map.get("port").and_then(|v| v.parse::<u16>().ok()) {
            settings.port = port;
        }
        if let Some(url) = config_map.get("earthquakes_url") {
            settings.earthquakes_url = url.clone();
        }
        if let Some(url) = config_map.get("plates_url") {
            settings.plates_url = url.clone();
        }
        if let Some(token) = config_map.get("access_token") {
            settings.access_token = token.clone();
        }
        if let Some(lat) = config_map.get("center_lat").and_then(|v| v.parse::<f64>().ok()) {
            settings.center_lat = lat;
        }
        if let Some(lon) = config_map.get("center_lon").and_then(|v| v.parse::<f64>().ok()) {
            settings.center_lon = lon;
        }
        if let Some(zoom) = config_map.get("zoom").and_then(|v| v.parse::<u8>().ok()) {
            settings.zoom = zoom;
        }

        settings
    }

    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = token;
        }
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# QuakeMap Configuration File\n");
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("earthquakes_url = \"{}\"\n", self.earthquakes_url));
        content.push_str(&format!("plates_url = \"{}\"\n", self.plates_url));
        content.push_str(&format!("access_token = \"{}\"\n", self.access_token));
        content.push_str(&format!("center_lat = {}\n", self.center_lat));
        content.push_str(&format!("center_lon = {}\n", self.center_lon));
        content.push_str(&format!("zoom = {}\n", self.zoom));
        content
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(config_path, self.to_ini()).context("Failed to write to config file")?;
        info!(path = %config_path.display(), "wrote default settings");
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_ini("");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.earthquakes_url, EARTHQUAKES_URL);
        assert_eq!(settings.plates_url, PLATES_URL);
        assert_eq!((settings.center_lat, settings.center_lon), DEFAULT_CENTER);
        assert_eq!(settings.zoom, DEFAULT_ZOOM);
        assert!(settings.access_token.is_empty());
    }

    #[test]
    fn reads_keys_and_skips_comments() {
        let content = "# comment\n\nport = 4100\naccess_token = \"pk.abc\"\nzoom = 5\nunknown = 1\ncenter_lat = 10.5\n";
        let settings = Settings::from_ini(content);
        assert_eq!(settings.port, 4100);
        assert_eq!(settings.access_token, "pk.abc");
        assert_eq!(settings.zoom, 5);
        assert_eq!(settings.center_lat, 10.5);
        assert_eq!(settings.center_lon, DEFAULT_CENTER.1);
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let settings = Settings::from_ini("port = eighty\nzoom = 900\n");
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn environment_token_overrides_file() {
        let mut settings = Settings::from_ini("access_token = from-file\n");
        settings.apply_token_override(Some("from-env".to_string()));
        assert_eq!(settings.access_token, "from-env");

        settings.apply_token_override(Some("  ".to_string()));
        assert_eq!(settings.access_token, "from-env");
        settings.apply_token_override(None);
        assert_eq!(settings.access_token, "from-env");
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("quakemap-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn first_run_writes_defaults_then_applies_env_token() {
        let dir = scratch_dir("first-run");
        let path = dir.join("quakemap.ini");

        let settings = Settings::load_from(&path, Some("pk.env".to_string())).unwrap();
        assert_eq!(settings.access_token, "pk.env");
        assert_eq!(settings.port, DEFAULT_PORT);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# QuakeMap Configuration File"));
        assert!(written.contains("access_token = \"\"\n"));

        let reloaded = Settings::load_from(&path, None).unwrap();
        assert!(reloaded.access_token.is_empty());
        assert_eq!(reloaded.earthquakes_url, EARTHQUAKES_URL);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_file_is_read_and_env_token_wins() {
        let dir = scratch_dir("existing");
        let path = dir.join("quakemap.ini");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "port = 4200\naccess_token = pk.file\n").unwrap();

        let from_file = Settings::load_from(&path, None).unwrap();
        assert_eq!(from_file.port, 4200);
        assert_eq!(from_file.access_token, "pk.file");

        let overridden = Settings::load_from(&path, Some("pk.env".to_string())).unwrap();
        assert_eq!(overridden.access_token, "pk.env");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn written_file_reads_back() {
        let mut original = Settings::default();
        original.port = 3999;
        original.access_token = "pk.xyz".to_string();
        let parsed = Settings::from_ini(&original.to_ini());
        assert_eq!(parsed.port, 3999);
        assert_eq!(parsed.access_token, "pk.xyz");
        assert_eq!(parsed.earthquakes_url, EARTHQUAKES_URL);
    }
}
