//! Caret shape geometry
//!
//! Maps an interpolated anchor plus a waveform scale to the rectangle the
//! host should fill. The anchor is the top-left of the caret's line box
//! position, per the host layout contract.

use glint_core::{CaretStyle, OverlaySettings, Point, Rect};

/// Minimum visible thickness of the underscore caret, in pixels
const UNDERSCORE_MIN_HEIGHT: f64 = 1.0;

/// Base thickness of the underscore caret before scaling, in pixels
const UNDERSCORE_HEIGHT: f64 = 2.0;

/// Compute the caret rectangle for one caret at `pos`.
///
/// `scale_y` is the waveform's vertical scale in [0, 1]. Block and line
/// carets shrink around their vertical center; the underscore stays pinned
/// to the bottom of the line box.
pub fn caret_rect(pos: Point, settings: &OverlaySettings, line_height: f64, scale_y: f64) -> Rect {
    let width = settings.caret_width as f64;
    let margin = settings.caret_height_margins as f64;

    match settings.caret_style {
        CaretStyle::Block | CaretStyle::Line => {
            let full_height = (line_height - 2.0 * margin).max(1.0);
            let height = full_height * scale_y;
            // Re-center so scaling shrinks toward the middle of the line.
            let y = pos.y + margin + (full_height - height) / 2.0;
            Rect::new(pos.x, y, width, height)
        }
        CaretStyle::Underscore => {
            let height = (UNDERSCORE_HEIGHT * scale_y).max(UNDERSCORE_MIN_HEIGHT);
            let y = pos.y + line_height - margin - height;
            Rect::new(pos.x, y, width * 2.0, height)
        }
    }
}
