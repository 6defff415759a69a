//! Async client for the PokéAPI v2 catalog.
//!
//! The client is built from an explicit [`Config`] once at startup and cloned
//! into whatever needs it; the underlying `reqwest::Client` shares its
//! connection pool across clones.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use pokedeck_common::card::CardRecord;
use pokedeck_common::config::Config;
use pokedeck_common::protocol::{ListResponse, Pokemon, Species};

use crate::error::ClientError;

/// How a detail or species record is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKey {
    Id(u32),
    Name(String),
}

impl ResourceKey {
    /// Key for enriching `card`: its id, or its name when the id could not be
    /// parsed.  `None` when neither is usable.
    pub fn for_card(card: &CardRecord) -> Option<Self> {
        if card.id() > 0 {
            Some(Self::Id(card.id()))
        } else if !card.name().is_empty() {
            Some(Self::Name(card.name().to_string()))
        } else {
            None
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(&encode_segment(name)),
        }
    }
}

/// A read-only source of catalog pages and records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One page of the catalog listing.
    async fn list(&self, limit: u32, offset: u64) -> Result<ListResponse, ClientError>;

    /// Detail record (stats, types, abilities, dimensions).
    async fn pokemon(&self, key: &ResourceKey) -> Result<Pokemon, ClientError>;

    /// Species record (flavor text, genus).
    async fn species(&self, key: &ResourceKey) -> Result<Species, ClientError>;
}

/// HTTP implementation of [`CatalogSource`].
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout())
            .user_agent(concat!("pokedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;
        Ok(PokeApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self, limit: u32, offset: u64) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.base_url)
    }

    fn pokemon_url(&self, key: &ResourceKey) -> String {
        format!("{}/pokemon/{key}", self.base_url)
    }

    fn species_url(&self, key: &ResourceKey) -> String {
        format!("{}/pokemon-species/{key}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ClientError> {
        debug!("GET {url}");
        let resp = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(source) => return Err(ClientError::Http { url, source }),
        };

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(source) => return Err(ClientError::Http { url, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn list(&self, limit: u32, offset: u64) -> Result<ListResponse, ClientError> {
        self.get_json(self.list_url(limit, offset)).await
    }

    async fn pokemon(&self, key: &ResourceKey) -> Result<Pokemon, ClientError> {
        self.get_json(self.pokemon_url(key)).await
    }

    async fn species(&self, key: &ResourceKey) -> Result<Species, ClientError> {
        self.get_json(self.species_url(key)).await
    }
}

/// Minimal percent-encoding for a path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
