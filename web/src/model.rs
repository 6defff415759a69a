//! Request and response bodies of the deck API.

use serde::{Deserialize, Serialize};

use pokedeck_common::deck::Decision;
use pokedeck_common::gesture::{Direction, DragRelease, DragSample, DragTracker};

use crate::view::CardView;

/// Everything the page needs to draw the deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckView {
    pub active: Option<CardView>,
    /// Card peeking behind the active one.
    pub next: Option<CardView>,
    pub remaining: usize,
    pub total: usize,
    pub has_more: bool,
    pub loading: bool,
    /// Banner text for the last failed page load.
    pub error: Option<String>,
    pub liked: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwipeRequest {
    pub direction: Direction,
}

/// A finished drag.  Either the offset/velocity pair is given directly, or
/// the raw samples are posted and the release is derived from them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseRequest {
    #[serde(default)]
    pub offset: Option<f64>,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub samples: Vec<DragSample>,
}

impl ReleaseRequest {
    pub fn to_release(&self) -> DragRelease {
        let tracked = DragTracker::from_samples(&self.samples);
        DragRelease {
            offset: self.offset.unwrap_or(tracked.offset),
            velocity: self.velocity.unwrap_or(tracked.velocity),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SwipeResponse {
    /// `None` when the swipe was a no-op or the card sprang back.
    pub decision: Option<Decision>,
    pub deck: DeckView,
}
