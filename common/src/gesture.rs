//! Drag-gesture interpretation for the swipe deck.
//!
//! A drag is tracked along the horizontal axis only.  On release the offset
//! and velocity are compared against [`GestureThresholds`]; either trigger
//! alone is enough for a decision.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Window over which release velocity is measured.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

// ── Direction ────────────────────────────────────────────────────────────────

/// A swipe decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Reject.
    Left,
    /// Accept.
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Thresholds ───────────────────────────────────────────────────────────────

/// Numbers that govern gesture decisions and on-card feedback.
///
/// Served to the page as-is so the browser animates with the same values the
/// server decides with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Release offset beyond which a swipe is decided.
    pub distance: f64,
    /// Release speed (units/s) beyond which a swipe is decided.
    pub velocity: f64,
    /// Offset where the like/nope indicator starts to fade in.
    pub feedback_start: f64,
    /// Offset where the indicator is fully opaque.
    pub feedback_full: f64,
    /// Offset at which rotation saturates.
    pub rotation_range: f64,
    /// Maximum card rotation in degrees.
    pub max_rotation_deg: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        GestureThresholds {
            distance: 160.0,
            velocity: 800.0,
            feedback_start: 50.0,
            feedback_full: 120.0,
            rotation_range: 250.0,
            max_rotation_deg: 15.0,
        }
    }
}

// ── Release ──────────────────────────────────────────────────────────────────

/// Drag state at the moment the pointer is let go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragRelease {
    /// Offset from the card's rest position.
    pub offset: f64,
    /// Units per second, signed.
    pub velocity: f64,
}

impl DragRelease {
    pub fn new(offset: f64, velocity: f64) -> Self {
        DragRelease { offset, velocity }
    }

    /// Decide the release.  `None` means the card springs back to centre.
    ///
    /// Right is tested first, so a release never yields both directions.
    pub fn classify(&self, t: &GestureThresholds) -> Option<Direction> {
        if self.offset > t.distance || self.velocity > t.velocity {
            Some(Direction::Right)
        } else if self.offset < -t.distance || self.velocity < -t.velocity {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

// ── Feedback ─────────────────────────────────────────────────────────────────

/// Visual state of a card being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Opacity of the affirmative ("LIKE") indicator, 0..=1.
    pub like_opacity: f64,
    /// Opacity of the negative ("NOPE") indicator, 0..=1.
    pub nope_opacity: f64,
    /// Card rotation in degrees.
    pub rotation_deg: f64,
}

impl Feedback {
    pub fn at(offset: f64, t: &GestureThresholds) -> Self {
        Feedback {
            like_opacity: ramp(offset, t.feedback_start, t.feedback_full),
            nope_opacity: ramp(-offset, t.feedback_start, t.feedback_full),
            rotation_deg: (offset / t.rotation_range * t.max_rotation_deg)
                .clamp(-t.max_rotation_deg, t.max_rotation_deg),
        }
    }
}

/// Linear 0→1 between `from` and `to`, clamped outside.
fn ramp(x: f64, from: f64, to: f64) -> f64 {
    if to <= from {
        return if x >= to { 1.0 } else { 0.0 };
    }
    ((x - from) / (to - from)).clamp(0.0, 1.0)
}

// ── Tracker ──────────────────────────────────────────────────────────────────

/// One position sample, `t` measured from the start of the drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    /// Seconds since the drag started.
    pub t: f64,
    pub x: f64,
}

/// Accumulates position samples for one drag and derives the release.
#[derive(Debug, Default)]
pub struct DragTracker {
    origin: Option<f64>,
    samples: VecDeque<DragSample>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position.  The first sample sets the origin.
    pub fn sample(&mut self, t: f64, x: f64) {
        let origin = *self.origin.get_or_insert(x);
        self.samples.push_back(DragSample { t, x: x - origin });

        // Keep only what the velocity window can use, plus one anchor.
        let window = VELOCITY_WINDOW.as_secs_f64();
        while self.samples.len() > 2 && t - self.samples[1].t > window {
            self.samples.pop_front();
        }
    }

    /// Current offset from the origin.
    pub fn offset(&self) -> f64 {
        self.samples.back().map(|s| s.x).unwrap_or(0.0)
    }

    /// Finish the drag.
    pub fn release(self) -> DragRelease {
        DragRelease {
            offset: self.offset(),
            velocity: self.velocity(),
        }
    }

    /// Release from a batch of samples, e.g. as posted by a browser.
    pub fn from_samples(samples: &[DragSample]) -> DragRelease {
        let mut tracker = DragTracker::new();
        for s in samples {
            tracker.sample(s.t, s.x);
        }
        tracker.release()
    }

    fn velocity(&self) -> f64 {
        let Some(last) = self.samples.back() else {
            return 0.0;
        };
        let window = VELOCITY_WINDOW.as_secs_f64();
        let first = self
            .samples
            .iter()
            .find(|s| last.t - s.t <= window)
            .unwrap_or(last);
        let dt = last.t - first.t;
        if dt <= f64::EPSILON {
            return 0.0;
        }
        (last.x - first.x) / dt
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────
