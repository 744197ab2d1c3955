//! Client configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional RON file, then `POKEDEX_*` environment variables.

use crate::errors::{PokedexError, PokedexResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Environment variable naming a RON configuration file.
pub const CONFIG_PATH_ENV: &str = "POKEDEX_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and host of the API, without the `/api` prefix.
    pub api_base_url: String,
    /// Directory holding the favorites file.
    pub data_dir: PathBuf,
    pub request_timeout_ms: u64,
    pub search_debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: PathBuf::from("."),
            request_timeout_ms: 10_000,
            search_debounce_ms: 300,
        }
    }
}

fn env_u64(name: &str) -> PokedexResult<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| PokedexError::Config(format!("{name} must be an integer, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}

impl ClientConfig {
    /// Parse a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> PokedexResult<Self> {
        ron::from_str(source).map_err(|e| PokedexError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> PokedexResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            PokedexError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_ron_str(&source)
    }

    /// Resolve the full configuration: explicit path, else `POKEDEX_CONFIG`,
    /// else defaults; then environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> PokedexResult<Self> {
        let from_env = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match explicit_path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> PokedexResult<()> {
        if let Ok(url) = env::var("POKEDEX_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(dir) = env::var("POKEDEX_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(timeout) = env_u64("POKEDEX_TIMEOUT_MS")? {
            self.request_timeout_ms = timeout;
        }
        Ok(())
    }

    pub fn validate(&self) -> PokedexResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PokedexError::Config(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(PokedexError::Config(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}
