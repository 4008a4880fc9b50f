//! Host collaborator contract
//!
//! The overlay never talks to a concrete editor. An editor integration
//! implements [`HostView`] for its view handle and [`Scheduler`] over its
//! native repeating-timer primitive, and forwards its listener callbacks
//! into the overlay's `on_*` methods.
//!
//! All calls happen on the host UI thread (see the concurrency notes on the
//! overlay crate), so trait methods take `&self`/`&mut self` with interior
//! mutability left to the implementor.

use std::ops::Range;
use std::time::Duration;

use slotmap::new_key_type;

use crate::error::Result;
use crate::geometry::Point;
use crate::id::{CaretId, ViewId};

/// One live editor view as seen by the overlay.
///
/// Disposal is queried, never signalled through errors: every overlay
/// operation checks `is_disposed` before touching host state and degrades
/// to a no-op on a dead view.
pub trait HostView {
    fn view_id(&self) -> ViewId;

    /// The view handle outlived its editor; all host state is gone
    fn is_disposed(&self) -> bool;

    fn is_focused(&self) -> bool;

    /// Main editable views only; previews and diff panes keep their
    /// native caret
    fn is_main_editor(&self) -> bool;

    /// Carets currently live in this view, in host order
    fn caret_ids(&self) -> Vec<CaretId>;

    /// Pixel anchor of a caret per the authoritative layout, `None` once
    /// the caret is gone
    fn caret_anchor(&self, id: CaretId) -> Option<Point>;

    /// Height of one line box in pixels
    fn line_height(&self) -> f64;

    /// Reference character advance width in pixels, used for adaptive
    /// catch-up thresholds
    fn char_width(&self) -> f64;

    /// Current document length in host offsets
    fn document_length(&self) -> usize;

    /// Hide or restore the host's native caret rendering
    fn set_native_caret_suppressed(&self, suppressed: bool) -> Result<()>;

    /// Register the custom paint callback over the given offset span,
    /// replacing any previous registration for this overlay
    fn set_paint_region(&self, span: Range<usize>) -> Result<()>;

    /// Remove the paint region registration
    fn clear_paint_region(&self) -> Result<()>;

    /// Ask for a repaint. Must be deferred (posted back to the UI queue),
    /// never re-entrant into the paint path.
    fn request_repaint(&self);

    /// Reported refresh rate of the primary display, if the host knows it
    fn refresh_rate_hz(&self) -> Option<f64>;
}

new_key_type! {
    /// Cancel handle for a repeating timer
    pub struct TimerId;
}

/// Repeating timer callback. Return `false` to self-cancel; the scheduler
/// then drops the timer without a separate `cancel` call.
pub type TickCallback = Box<dyn FnMut() -> bool>;

/// Abstract repeating-timer capability.
///
/// Any host interval primitive satisfies this; callbacks are posted onto
/// the same UI thread that drives the overlay.
pub trait Scheduler {
    fn schedule_repeating(&mut self, period: Duration, callback: TickCallback) -> TimerId;

    /// Cancel a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}
