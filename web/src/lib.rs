//! PokéDeck web – serves the swipe page and the deck API.

pub mod model;
pub mod server;
pub mod session;
pub mod view;
