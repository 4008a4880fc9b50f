//! Per-caret interpolation state

use glint_core::Point;

/// Distance below which a caret counts as having arrived, in pixels
pub const POSITION_EPSILON: f64 = 0.01;

/// Axis distance above which a retarget is a discontinuous jump and the
/// caret snaps instead of interpolating, in pixels
pub const TELEPORT_THRESHOLD: f64 = 1000.0;

/// Interpolated visual state of one caret.
///
/// `current` is the last rendered position; `target` is the most recent
/// authoritative position from the host. `current` converges toward
/// `target` by a fixed fraction per step, so it never overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretVisual {
    pub current: Point,
    pub target: Point,
}

impl CaretVisual {
    /// A caret seen for the first time appears in place, without animating
    /// in from anywhere.
    pub fn new(anchor: Point) -> Self {
        Self {
            current: anchor,
            target: anchor,
        }
    }

    /// Feed a fresh anchor from the host.
    ///
    /// Jumps past [`TELEPORT_THRESHOLD`] on either axis snap immediately;
    /// interpolating across a page scroll would smear the caret over the
    /// whole viewport.
    ///
    /// Returns whether the target moved beyond [`POSITION_EPSILON`].
    pub fn retarget(&mut self, anchor: Point) -> bool {
        let changed = (anchor.x - self.target.x).abs() > POSITION_EPSILON
            || (anchor.y - self.target.y).abs() > POSITION_EPSILON;

        if (anchor.x - self.target.x).abs() > TELEPORT_THRESHOLD
            || (anchor.y - self.target.y).abs() > TELEPORT_THRESHOLD
        {
            self.current = anchor;
            self.target = anchor;
        } else {
            self.target = anchor;
        }
        changed
    }

    /// Remaining distance on each axis
    pub fn delta(&self) -> (f64, f64) {
        (
            self.target.x - self.current.x,
            self.target.y - self.current.y,
        )
    }

    /// Still more than [`POSITION_EPSILON`] away from the target
    pub fn is_moving(&self) -> bool {
        let (dx, dy) = self.delta();
        dx.abs() > POSITION_EPSILON || dy.abs() > POSITION_EPSILON
    }

    /// Move a fraction `k` ∈ (0, 1] of the remaining distance.
    ///
    /// Returns whether the caret moved. A settled caret is left untouched
    /// so repeated steps are free.
    pub fn step(&mut self, k: f64) -> bool {
        let (dx, dy) = self.delta();
        if dx.abs() <= POSITION_EPSILON && dy.abs() <= POSITION_EPSILON {
            return false;
        }
        self.current.x += dx * k;
        self.current.y += dy * k;
        true
    }
}
