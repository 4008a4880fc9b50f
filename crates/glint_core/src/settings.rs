//! Overlay settings snapshot
//!
//! Owned and persisted by the host; the overlay reads one snapshot per
//! tick and never mutates it. Serde derives let hosts store it alongside
//! their own configuration.

use serde::{Deserialize, Serialize};

/// Visual shape of the drawn caret
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaretStyle {
    /// Filled rectangle covering the character cell width
    Block,
    /// Thin vertical bar (default)
    #[default]
    Line,
    /// Thin bar pinned to the bottom of the line box
    Underscore,
}

/// Blink animation style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkStyle {
    /// Always visible, no animation
    Solid,
    /// Classic hard on/off blink
    Blink,
    /// Linear fade out and back in (default)
    #[default]
    Smooth,
    /// Sinusoidal dip that never fully disappears
    Phase,
    /// Vertical shrink/grow instead of an opacity change
    Expand,
}

/// One immutable settings snapshot, read at the start of each tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Master switch; a disabled overlay never paints or ticks
    pub enabled: bool,
    pub caret_style: CaretStyle,
    /// Caret bar width in pixels
    pub caret_width: u32,
    /// Pixels trimmed from the top and bottom of the line box
    pub caret_height_margins: u32,
    /// Base interpolation factor per tick, in (0, 1]; larger is faster
    pub smoothness: f64,
    /// Switch to elevated speed factors when the caret falls behind
    pub adaptive_speed: bool,
    /// Factor used when the caret trails its target by more than one
    /// character width
    pub catchup_speed: f64,
    /// Factor used when it trails by more than two character widths
    pub max_catchup_speed: f64,
    pub blink_style: BlinkStyle,
    /// Full blink cycle duration in milliseconds
    pub blink_interval_ms: u64,
    /// Suppress the host's native caret while attached
    pub replace_default_caret: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            caret_style: CaretStyle::default(),
            caret_width: 2,
            caret_height_margins: 0,
            smoothness: 0.3,
            adaptive_speed: true,
            catchup_speed: 0.55,
            max_catchup_speed: 0.8,
            blink_style: BlinkStyle::default(),
            blink_interval_ms: 500,
            replace_default_caret: true,
        }
    }
}

impl OverlaySettings {
    /// Clamp a snapshot into the ranges the engine assumes.
    ///
    /// Hosts deserialize settings from user-edited storage, so out-of-range
    /// values must degrade rather than divide by zero or stall convergence.
    pub fn sanitized(mut self) -> Self {
        self.caret_width = self.caret_width.max(1);
        self.smoothness = clamp_factor(self.smoothness);
        self.catchup_speed = clamp_factor(self.catchup_speed);
        self.max_catchup_speed = clamp_factor(self.max_catchup_speed);
        self.blink_interval_ms = self.blink_interval_ms.max(100);
        self
    }
}

/// Speed factors live in (0, 1]; 0 would never converge.
fn clamp_factor(f: f64) -> f64 {
    if f.is_finite() {
        f.clamp(0.01, 1.0)
    } else {
        0.01
    }
}
