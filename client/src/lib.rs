//! PokéAPI client, card adapter and pagination for PokéDeck.

pub mod adapter;
pub mod api;
pub mod error;
pub mod pager;

#[cfg(test)]
mod testing;

pub use api::{CatalogSource, PokeApiClient, ResourceKey};
pub use error::ClientError;
pub use pager::Pager;
