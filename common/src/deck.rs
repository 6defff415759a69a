//! The swipe deck: a cursor over a caller-owned, append-only list.
//!
//! The deck never owns or mutates the items.  Every call takes the current
//! slice, and the cursor is resynced against its length before it is read:
//!
//! * the cursor is clamped to `len - 1`;
//! * when the deck is depleted and the list has grown past what the deck has
//!   already absorbed, the cursor jumps to the new top of the stack.
//!
//! Deciding the last card of a batch while a newer batch is already waiting
//! moves straight onto that batch and does not count as depletion.
//!
//! Cards are shown from the top of the stack (highest index) down to index 0.

use serde::Serialize;

use crate::gesture::{Direction, DragRelease, GestureThresholds};

/// Called with the decided item and the direction, before the cursor moves.
pub type SwipeObserver<T> = Box<dyn FnMut(&T, Direction) + Send>;

/// Called once each time the last card is decided and nothing is waiting.
pub type DepletedObserver = Box<dyn FnMut() + Send>;

/// Result of a recorded decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Index of the decided item in the caller's list.
    pub index: usize,
    pub direction: Direction,
    /// This decision emptied the deck.
    pub depleted: bool,
}

/// What to draw.
#[derive(Debug)]
pub struct DeckFrame<'a, T> {
    pub active: Option<&'a T>,
    /// Card peeking from behind the active one.
    pub next: Option<&'a T>,
    /// Index of `active` in the caller's list.
    pub cursor: Option<usize>,
    /// Cards left including the active one.
    pub remaining: usize,
    pub total: usize,
}

impl<T> DeckFrame<'_, T> {
    pub fn is_exhausted(&self) -> bool {
        self.active.is_none()
    }
}

pub struct SwipeDeck<T> {
    /// Active index; `None` once depleted.
    cursor: Option<usize>,
    /// Lowest index of the batch currently being walked.
    floor: usize,
    /// List length when the cursor was last placed on top.
    absorbed: usize,
    thresholds: GestureThresholds,
    on_swipe: Option<SwipeObserver<T>>,
    on_depleted: Option<DepletedObserver>,
}

impl<T> Default for SwipeDeck<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SwipeDeck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeDeck")
            .field("cursor", &self.cursor)
            .field("floor", &self.floor)
            .field("absorbed", &self.absorbed)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl<T> SwipeDeck<T> {
    pub fn new() -> Self {
        SwipeDeck {
            cursor: None,
            floor: 0,
            absorbed: 0,
            thresholds: GestureThresholds::default(),
            on_swipe: None,
            on_depleted: None,
        }
    }

    pub fn with_thresholds(mut self, thresholds: GestureThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn on_swipe(mut self, f: impl FnMut(&T, Direction) + Send + 'static) -> Self {
        self.on_swipe = Some(Box::new(f));
        self
    }

    pub fn on_depleted(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_depleted = Some(Box::new(f));
        self
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Index of the active item, if any.  Does not resync.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Reconcile the cursor with the current list length.
    pub fn sync(&mut self, len: usize) {
        if len < self.absorbed {
            self.absorbed = len;
            self.floor = self.floor.min(len);
        }
        if let Some(i) = self.cursor {
            if i >= len {
                self.cursor = len.checked_sub(1).filter(|&top| top >= self.floor);
            }
        }
        if self.cursor.is_none() && len > self.absorbed {
            self.cursor = Some(len - 1);
            self.floor = self.absorbed;
            self.absorbed = len;
        }
    }

    pub fn render<'a>(&mut self, items: &'a [T]) -> DeckFrame<'a, T> {
        self.sync(items.len());
        let (active, next) = match self.cursor {
            Some(i) => (items.get(i), self.below(i).and_then(|j| items.get(j))),
            None => (None, None),
        };
        DeckFrame {
            active,
            next,
            cursor: self.cursor,
            remaining: self.cursor.map_or(0, |i| i + 1 - self.floor),
            total: items.len(),
        }
    }

    /// Record a decision on the active item.  A no-op returning `None` when
    /// the deck is depleted.
    pub fn decide(&mut self, items: &[T], direction: Direction) -> Option<Decision> {
        self.sync(items.len());
        let index = self.cursor()?;
        let item = items.get(index)?;

        if let Some(f) = self.on_swipe.as_mut() {
            f(item, direction);
        }
        self.cursor = self.below(index);
        if self.cursor.is_none() && items.len() > self.absorbed {
            // A page arrived while this batch was in play; move straight on.
            self.cursor = Some(items.len() - 1);
            self.floor = self.absorbed;
            self.absorbed = items.len();
        }

        let depleted = self.cursor.is_none();
        if depleted {
            if let Some(f) = self.on_depleted.as_mut() {
                f();
            }
        }

        Some(Decision {
            index,
            direction,
            depleted,
        })
    }

    /// Interpret a released drag.  `None` means the card springs back and
    /// nothing changes.
    pub fn release(&mut self, items: &[T], drag: DragRelease) -> Option<Decision> {
        let direction = drag.classify(&self.thresholds)?;
        self.decide(items, direction)
    }

    fn below(&self, i: usize) -> Option<usize> {
        (i > self.floor).then(|| i - 1)
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────
