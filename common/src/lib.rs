//! Shared building blocks for PokéDeck: configuration, upstream wire types,
//! card records and the swipe deck itself.

pub mod card;
pub mod config;
pub mod deck;
pub mod gesture;
pub mod protocol;
