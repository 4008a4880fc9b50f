//! Glint Animation Engine
//!
//! Per-caret interpolated position state plus the blink waveform evaluator.
//!
//! - **Exponential smoothing**: each tick moves a caret a fixed fraction of
//!   the remaining distance toward its target, so convergence is monotonic
//!   and never oscillates
//! - **Adaptive catch-up**: carets that fall more than one or two character
//!   widths behind switch to elevated speed factors
//! - **Teleport snap**: discontinuous jumps (scrolls, search jumps) bypass
//!   interpolation entirely
//! - **Blink waveforms**: five styles evaluated from normalized cycle time,
//!   frozen to full visibility while the caret is in motion
//!
//! The engine is a pure function of caller-supplied monotonic timestamps
//! and host-fed anchor points; it owns no timers and draws nothing. The
//! overlay adapter decides tick cadence and suspension.

pub mod blink;
pub mod caret;
pub mod engine;

pub use blink::{BlinkState, BlinkValue, RESUME_BLINK_DELAY_MS};
pub use caret::{CaretVisual, POSITION_EPSILON, TELEPORT_THRESHOLD};
pub use engine::{AnimationEngine, MIN_CHAR_WIDTH};
