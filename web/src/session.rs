//! The deck session: card list, deck cursor, load state and liked cards.
//!
//! Page loads run on a separate loader task that owns the [`Pager`].  The
//! session lock is only taken to flip the loading flag and to append the
//! result, so the deck stays usable while a page is in flight.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use pokedeck_client::{CatalogSource, Pager};
use pokedeck_common::card::CardRecord;
use pokedeck_common::deck::{Decision, SwipeDeck};
use pokedeck_common::gesture::{Direction, DragRelease, GestureThresholds};

use crate::model::DeckView;
use crate::view::CardView;

/// Banner shown when a page load fails.
pub const LIST_ERROR: &str = "Failed to fetch Pokémon list";

pub type SharedSession = Arc<Mutex<Session>>;

/// Why a page load was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    Initial,
    Depleted,
    Retry,
}

pub struct Session {
    cards: Vec<CardRecord>,
    deck: SwipeDeck<CardRecord>,
    party: Vec<CardRecord>,
    loading: bool,
    has_more: bool,
    error: Option<String>,
}

impl Session {
    /// New empty session.  When the deck runs out, a [`LoadRequest::Depleted`]
    /// is queued on `load_tx`.
    pub fn new(load_tx: mpsc::Sender<LoadRequest>, thresholds: GestureThresholds) -> Self {
        let deck = SwipeDeck::new()
            .with_thresholds(thresholds)
            .on_swipe(|card: &CardRecord, dir| info!("Swiped {dir} on {card}"))
            .on_depleted(move || {
                if load_tx.try_send(LoadRequest::Depleted).is_err() {
                    debug!("Load already queued – depletion not forwarded");
                }
            });

        Session {
            cards: Vec::new(),
            deck,
            party: Vec::new(),
            loading: false,
            has_more: true,
            error: None,
        }
    }

    pub fn thresholds(&self) -> GestureThresholds {
        *self.deck.thresholds()
    }

    pub fn view(&mut self) -> DeckView {
        let frame = self.deck.render(&self.cards);
        DeckView {
            active: frame.active.map(CardView::from),
            next: frame.next.map(CardView::from),
            remaining: frame.remaining,
            total: frame.total,
            has_more: self.has_more,
            loading: self.loading,
            error: self.error.clone(),
            liked: self.party.len(),
        }
    }

    pub fn swipe(&mut self, direction: Direction) -> Option<Decision> {
        let decision = self.deck.decide(&self.cards, direction)?;
        self.record(decision);
        Some(decision)
    }

    pub fn release(&mut self, drag: DragRelease) -> Option<Decision> {
        let decision = self.deck.release(&self.cards, drag)?;
        self.record(decision);
        Some(decision)
    }

    /// Liked cards in the order they were swiped.
    pub fn party(&self) -> &[CardRecord] {
        &self.party
    }

    /// Mark a load as started.  `false` when one is already running or the
    /// catalog is exhausted.
    pub fn begin_load(&mut self) -> bool {
        if self.loading || !self.has_more {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish_load(&mut self, cards: Vec<CardRecord>, has_more: bool) {
        self.cards.extend(cards);
        self.has_more = has_more;
        self.loading = false;
        self.error = None;
    }

    pub fn fail_load(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
    }

    fn record(&mut self, decision: Decision) {
        if decision.direction == Direction::Right {
            if let Some(card) = self.cards.get(decision.index) {
                self.party.push(card.clone());
            }
        }
    }
}

/// Run page loads on their own task until the request channel closes.
pub fn spawn_loader<S>(
    session: SharedSession,
    mut pager: Pager<S>,
    mut rx: mpsc::Receiver<LoadRequest>,
) -> JoinHandle<()>
where
    S: CatalogSource + ?Sized + 'static,
{
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            if !session.lock().await.begin_load() {
                debug!("Ignoring {request:?} load request");
                continue;
            }

            debug!("Loading page at offset {} ({request:?})", pager.offset());
            let result = pager.load_more().await;

            let mut s = session.lock().await;
            match result {
                Ok(cards) => s.finish_load(cards, pager.has_more()),
                Err(e) => {
                    error!("Page load failed: {e}");
                    s.fail_load(LIST_ERROR);
                }
            }
            drop(s);

            // Anything queued while the page was in flight is answered by it.
            while let Ok(stale) = rx.try_recv() {
                debug!("Dropping {stale:?} load request queued during a load");
            }
        }
        info!("Loader stopped");
    })
}
