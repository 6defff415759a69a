//! Wire types for the PokéAPI v2 endpoints the deck consumes, plus the
//! health-check payload served by the web binary.
//!
//! Only the fields the card adapter reads are modelled; serde ignores the
//! rest.  Arrays default to empty so a trimmed upstream response still
//! decodes.

use serde::{Deserialize, Serialize};

/// `{name, url}` reference used all over the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /pokemon?limit=&offset=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// Total number of records in the catalog.
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

// ─── GET /pokemon/{id} ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Tenths of a metre.
    #[serde(default)]
    pub height: u32,
    /// Tenths of a kilogram.
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub slot: u32,
    #[serde(default)]
    pub is_hidden: bool,
    pub ability: NamedResource,
}

// ─── GET /pokemon-species/{id} ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub genera: Vec<Genus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

// ─── web ─────────────────────────────────────────────────────────────────────

/// Health-check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
