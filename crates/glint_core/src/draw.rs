//! Retained draw commands
//!
//! The paint path is a pure function from overlay state to a short list of
//! commands; only the host-facing adapter boundary turns commands into real
//! surface calls. This keeps the animation code testable without any
//! graphical surface.

use smallvec::SmallVec;

use crate::geometry::Rect;

/// One drawing operation against the host surface.
///
/// The host supplies the caret color; commands carry geometry plus a global
/// paint alpha so a waveform can fade the whole caret in one blend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill `rect` with the configured caret color at `opacity` ∈ [0, 1]
    FillRect { rect: Rect, opacity: f64 },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::FillRect { rect, .. } => *rect,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            DrawCommand::FillRect { opacity, .. } => *opacity,
        }
    }
}

/// Per-frame command list. One entry per caret; multi-caret editing rarely
/// exceeds a handful, so the inline capacity avoids allocation per frame.
pub type DrawList = SmallVec<[DrawCommand; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_inline_capacity() {
        let mut list = DrawList::new();
        for i in 0..4 {
            list.push(DrawCommand::FillRect {
                rect: Rect::new(i as f64, 0.0, 2.0, 18.0),
                opacity: 1.0,
            });
        }
        assert!(!list.spilled());
    }

    #[test]
    fn test_command_accessors() {
        let cmd = DrawCommand::FillRect {
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            opacity: 0.5,
        };
        assert_eq!(cmd.rect(), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(cmd.opacity(), 0.5);
    }
}
