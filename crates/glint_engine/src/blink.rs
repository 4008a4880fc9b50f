//! Blink timing and waveforms
//!
//! Visibility is derived, never stored: each tick the overlay asks for the
//! current opacity/scale pair from the elapsed cycle time. Any caret motion
//! freezes the caret at full visibility and restarts the cycle once motion
//! has settled for [`RESUME_BLINK_DELAY_MS`]: a caret that vanishes
//! mid-typing reads as input lag.

use std::f64::consts::PI;

use glint_core::BlinkStyle;

/// How long after the last motion the caret stays frozen at full
/// visibility before the blink cycle restarts, in milliseconds
pub const RESUME_BLINK_DELAY_MS: f64 = 100.0;

/// Evaluated waveform sample: paint alpha plus vertical scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkValue {
    pub opacity: f64,
    pub scale_y: f64,
}

impl BlinkValue {
    pub const FULL: BlinkValue = BlinkValue {
        opacity: 1.0,
        scale_y: 1.0,
    };
}

/// Per-overlay blink clock.
///
/// Timestamps are caller-supplied monotonic milliseconds, same time base
/// as the rest of the engine.
#[derive(Clone, Copy, Debug)]
pub struct BlinkState {
    blink_start_ms: f64,
    last_move_ms: f64,
}

impl BlinkState {
    pub fn new(now_ms: f64) -> Self {
        Self {
            blink_start_ms: now_ms,
            last_move_ms: now_ms,
        }
    }

    /// Record caret motion: freeze at full visibility and defer the cycle
    /// restart until motion settles.
    pub fn note_motion(&mut self, now_ms: f64) {
        self.blink_start_ms = now_ms;
        self.last_move_ms = now_ms;
    }

    /// Milliseconds since the last recorded motion
    pub fn since_last_motion(&self, now_ms: f64) -> f64 {
        now_ms - self.last_move_ms
    }

    /// Evaluate the waveform for `style` at `now_ms`.
    pub fn value(&self, style: BlinkStyle, interval_ms: u64, now_ms: f64) -> BlinkValue {
        if style == BlinkStyle::Solid {
            return BlinkValue::FULL;
        }
        if self.since_last_motion(now_ms) <= RESUME_BLINK_DELAY_MS {
            return BlinkValue::FULL;
        }

        let interval = interval_ms.max(1) as f64;
        let elapsed = now_ms - self.blink_start_ms - RESUME_BLINK_DELAY_MS;
        let t = if elapsed < 0.0 {
            0.0
        } else {
            (elapsed % interval) / interval
        };
        waveform(style, t)
    }
}

/// Waveform table over normalized cycle time `t` ∈ [0, 1).
///
/// The coefficients encode the visual feel of each style; changing any of
/// them is a regression, not a cleanup.
pub fn waveform(style: BlinkStyle, t: f64) -> BlinkValue {
    match style {
        BlinkStyle::Solid => BlinkValue::FULL,
        BlinkStyle::Blink => {
            if t < 0.5 {
                BlinkValue::FULL
            } else {
                BlinkValue {
                    opacity: 0.0,
                    scale_y: 1.0,
                }
            }
        }
        BlinkStyle::Smooth => {
            let opacity = if t < 0.3 {
                1.0
            } else if t < 0.7 {
                1.0 - (t - 0.3) * 2.5
            } else {
                (t - 0.7) * 3.333
            };
            BlinkValue {
                opacity,
                scale_y: 1.0,
            }
        }
        BlinkStyle::Phase => {
            let opacity = if t < 0.15 || t >= 0.85 {
                1.0
            } else {
                1.0 - (PI * (t - 0.15) / 0.7).sin() * 0.8
            };
            BlinkValue {
                opacity,
                scale_y: 1.0,
            }
        }
        BlinkStyle::Expand => {
            let scale_y = if t < 0.2 || t >= 0.8 {
                1.0
            } else {
                1.0 - (PI * (t - 0.2) / 0.6).sin() * 0.5
            };
            BlinkValue {
                opacity: 1.0,
                scale_y,
            }
        }
    }
}
