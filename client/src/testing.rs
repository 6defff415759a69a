//! In-memory catalog used by the adapter and pager tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use pokedeck_common::protocol::{
    AbilitySlot, FlavorText, Genus, ListResponse, NamedResource, Pokemon, Species, StatEntry,
    TypeSlot,
};

use crate::api::{CatalogSource, ResourceKey};
use crate::error::ClientError;

pub const ART: &str = "https://img.example/artwork";

pub fn entry(id: u32) -> NamedResource {
    NamedResource {
        name: format!("mon-{id}"),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    }
}

fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    total: u32,
    latency: bool,
    fail_list: AtomicBool,
    fail_pokemon: HashSet<u32>,
    fail_species: HashSet<u32>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(total: u32) -> Self {
        FakeCatalog {
            total,
            ..Default::default()
        }
    }

    /// Higher ids answer sooner.
    pub fn with_latency(mut self) -> Self {
        self.latency = true;
        self
    }

    pub fn failing_pokemon(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.fail_pokemon.extend(ids);
        self
    }

    pub fn failing_species(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.fail_species.extend(ids);
        self
    }

    pub fn set_list_failing(&self, failing: bool) {
        self.fail_list.store(failing, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn resolve(&self, key: &ResourceKey, path: &str) -> Result<u32, ClientError> {
        let id = match key {
            ResourceKey::Id(id) => *id,
            ResourceKey::Name(name) => name
                .strip_prefix("mon-")
                .and_then(|n| n.parse().ok())
                .unwrap_or(0),
        };
        if id == 0 || id > self.total {
            return Err(not_found(path, key));
        }
        Ok(id)
    }

    async fn delay(&self, id: u32) {
        if self.latency {
            let ms = u64::from(self.total.saturating_sub(id) % 16) * 2;
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

fn not_found(path: &str, key: &ResourceKey) -> ClientError {
    ClientError::Status {
        url: format!("fake://{path}/{key}"),
        status: StatusCode::NOT_FOUND,
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn list(&self, limit: u32, offset: u64) -> Result<ListResponse, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                url: "fake://pokemon".into(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        let total = u64::from(self.total);
        let end = (offset + u64::from(limit)).min(total);
        let results = (offset + 1..=end).map(|id| entry(id as u32)).collect();
        Ok(ListResponse {
            count: total,
            next: None,
            previous: None,
            results,
        })
    }

    async fn pokemon(&self, key: &ResourceKey) -> Result<Pokemon, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.resolve(key, "pokemon")?;
        self.delay(id).await;
        if self.fail_pokemon.contains(&id) {
            return Err(not_found("pokemon", key));
        }
        Ok(Pokemon {
            id,
            name: format!("mon-{id}"),
            height: 4,
            weight: 60,
            stats: vec![StatEntry {
                base_stat: id,
                stat: named("hp"),
            }],
            types: vec![TypeSlot {
                slot: 1,
                kind: named("electric"),
            }],
            abilities: vec![
                AbilitySlot {
                    slot: 3,
                    is_hidden: true,
                    ability: named("lightning-rod"),
                },
                AbilitySlot {
                    slot: 1,
                    is_hidden: false,
                    ability: named("static"),
                },
            ],
        })
    }

    async fn species(&self, key: &ResourceKey) -> Result<Species, ClientError> {
        let id = self.resolve(key, "pokemon-species")?;
        self.delay(id).await;
        if self.fail_species.contains(&id) {
            return Err(not_found("pokemon-species", key));
        }
        Ok(Species {
            flavor_text_entries: vec![FlavorText {
                flavor_text: format!("Entry\n{id}."),
                language: named("en"),
            }],
            genera: vec![Genus {
                genus: format!("Mon {id}"),
                language: named("en"),
            }],
        })
    }
}
