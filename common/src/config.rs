//! Configuration parsing – reads a KEY=VALUE file (`pokedeck.conf`).
//!
//! The resulting [`Config`] is built once at startup and handed by reference
//! to whatever talks to the catalog service.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

/// Application configuration for the catalog client and the web server.
#[derive(Debug, Clone)]
pub struct Config {
    // ── catalog service ──────────────────────────────────────────────
    /// Base URL of the PokéAPI v2 service, without trailing slash.
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    /// Directory holding `{id}.png` official artwork.
    pub artwork_base_url: String,

    // ── deck ─────────────────────────────────────────────────────────
    /// Number of list entries requested per page.
    pub page_size: u32,
    /// Language code used to pick flavor text and genus entries.
    pub locale: String,
    /// Fetch detail + species records for every card.
    pub enrich: bool,

    // ── network ──────────────────────────────────────────────────────
    /// Address the web server listens on.
    pub listen_addr: String,
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "/etc/pokedeck/pokedeck.conf"
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        from_map(&HashMap::new())
    }
}

/// Parse a `KEY=VALUE` configuration file.
///
/// Lines starting with `#` are comments.  Values may be optionally
/// double-quoted.  Unknown keys are silently ignored.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let config = from_map(&parse_conf(&text));
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load `path` when it was given explicitly; otherwise try the default
/// location and fall back to built-in defaults when it does not exist.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load(p),
        None => {
            let default = Path::new(Config::default_path());
            if default.exists() {
                load(default)
            } else {
                info!("No config at {} – using defaults", default.display());
                Ok(Config::default())
            }
        }
    }
}

fn from_map(map: &HashMap<String, String>) -> Config {
    let get = |key: &str| -> Option<String> { map.get(key).cloned().filter(|v| !v.is_empty()) };
    let get_u64 = |key: &str, default: u64| -> u64 {
        get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    Config {
        api_base_url: get("POKEAPI_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "https://pokeapi.co/api/v2".into()),
        api_timeout_secs: get_u64("POKEAPI_TIMEOUT_SECS", 15),
        artwork_base_url: get("ARTWORK_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork".into()
            }),

        page_size: get("PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(50),
        locale: get("LOCALE").unwrap_or_else(|| "en".into()),
        enrich: get("ENRICH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true),

        listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────
