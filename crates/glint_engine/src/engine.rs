//! The per-view animation engine
//!
//! Owns the caret map and the blink clock for one editor view. The caller
//! drives it each tick: `prune` stale carets, `observe` fresh anchors,
//! `advance` interpolation, then sample `blink_value` for painting.

use rustc_hash::FxHashMap;
use tracing::debug;

use glint_core::{CaretId, OverlaySettings, Point};

use crate::blink::{BlinkState, BlinkValue};
use crate::caret::CaretVisual;

/// Floor for the cached reference character width; a zero width would make
/// every caret look infinitely far behind
pub const MIN_CHAR_WIDTH: f64 = 1.0;

/// Animation state for all carets of one view.
///
/// Pure computation over caller-supplied monotonic milliseconds; owns no
/// timers and never touches the host.
#[derive(Debug)]
pub struct AnimationEngine {
    carets: FxHashMap<CaretId, CaretVisual>,
    blink: BlinkState,
    /// Host-supplied reference character width, recomputed only when the
    /// width source changes
    char_width: f64,
}

impl AnimationEngine {
    pub fn new(now_ms: f64) -> Self {
        Self {
            carets: FxHashMap::default(),
            blink: BlinkState::new(now_ms),
            char_width: MIN_CHAR_WIDTH,
        }
    }

    /// Update the cached reference character width.
    pub fn set_char_width(&mut self, width: f64) {
        self.char_width = if width.is_finite() {
            width.max(MIN_CHAR_WIDTH)
        } else {
            MIN_CHAR_WIDTH
        };
    }

    pub fn char_width(&self) -> f64 {
        self.char_width
    }

    /// Feed one caret's authoritative anchor for this tick.
    ///
    /// Unseen carets appear in place; anchors past the teleport threshold
    /// snap; anything else retargets the interpolation. Non-finite anchors
    /// are dropped and the caret keeps its last good target.
    ///
    /// Returns whether the caret is still moving afterward.
    pub fn observe(&mut self, id: CaretId, anchor: Point, now_ms: f64) -> bool {
        if !anchor.is_finite() {
            debug!(caret = id.0, "dropping non-finite caret anchor");
            return self.carets.get(&id).is_some_and(|c| c.is_moving());
        }

        match self.carets.get_mut(&id) {
            None => {
                self.carets.insert(id, CaretVisual::new(anchor));
                false
            }
            Some(caret) => {
                if caret.retarget(anchor) {
                    self.blink.note_motion(now_ms);
                }
                caret.is_moving()
            }
        }
    }

    /// Drop carets the host no longer reports. Must run before the tick's
    /// `observe` calls so removed carets don't leak. Idempotent.
    pub fn prune(&mut self, live: &[CaretId]) {
        self.carets.retain(|id, _| live.contains(id));
    }

    /// Step interpolation for every caret.
    ///
    /// Returns whether anything moved, which is what decides if a repaint
    /// is worth requesting.
    pub fn advance(&mut self, now_ms: f64, settings: &OverlaySettings) -> bool {
        let mut any_moved = false;
        for caret in self.carets.values_mut() {
            let k = speed_factor(caret, self.char_width, settings);
            any_moved |= caret.step(k);
        }
        if any_moved {
            self.blink.note_motion(now_ms);
        }
        any_moved
    }

    /// Sample the blink waveform for this tick.
    pub fn blink_value(&self, now_ms: f64, settings: &OverlaySettings) -> BlinkValue {
        self.blink
            .value(settings.blink_style, settings.blink_interval_ms, now_ms)
    }

    /// Milliseconds since the last caret motion
    pub fn since_last_motion(&self, now_ms: f64) -> f64 {
        self.blink.since_last_motion(now_ms)
    }

    /// Any caret still away from its target
    pub fn has_motion(&self) -> bool {
        self.carets.values().any(|c| c.is_moving())
    }

    /// Current interpolated positions, one per tracked caret
    pub fn positions(&self) -> impl Iterator<Item = (CaretId, Point)> + '_ {
        self.carets.iter().map(|(id, c)| (*id, c.current))
    }

    pub fn caret_count(&self) -> usize {
        self.carets.len()
    }

    /// Discard all caret state and restart the blink cycle. Used on view
    /// switches, where animating from the previous view's coordinates
    /// would be nonsense.
    pub fn reset(&mut self, now_ms: f64) {
        self.carets.clear();
        self.blink = BlinkState::new(now_ms);
    }
}

/// Pick the interpolation factor for one caret.
///
/// Adaptive mode compares the horizontal lag against the reference
/// character width so fast typing gets elevated catch-up speeds; vertical
/// motion (line changes) stays at the base factor.
fn speed_factor(caret: &CaretVisual, char_width: f64, settings: &OverlaySettings) -> f64 {
    if !settings.adaptive_speed {
        return settings.smoothness;
    }
    let (dx, _) = caret.delta();
    if dx.abs() > 2.0 * char_width {
        settings.max_catchup_speed
    } else if dx.abs() > char_width {
        settings.catchup_speed
    } else {
        settings.smoothness
    }
}
