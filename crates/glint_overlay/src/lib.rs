//! Glint Overlay Adapter
//!
//! Binds one [`glint_engine::AnimationEngine`] to one live editor view:
//! feeds it anchor points and settings each tick, drives it with two
//! repeating timers while active, and turns its output into retained
//! [`glint_core::DrawCommand`]s for the host to paint.
//!
//! # Concurrency
//!
//! Everything here runs on the host UI thread. Timer callbacks are
//! host-scheduled and posted back onto that same thread, so there is
//! cooperative interleaving but no concurrent mutation and no locking;
//! shared state uses `Rc<RefCell<…>>`. The one deliberately deferred step
//! is [`HostView::request_repaint`], which hosts must post rather than
//! invoke re-entrantly.
//!
//! # Lifecycle
//!
//! `Detached → Attached{Inactive, Active}`. Attach is guarded by the
//! enabled setting and a main-editor filter; activation happens on the
//! first focused paint and tears down on focus loss, disposal, or
//! disabling. Deactivation is level-triggered and idempotent: focus-lost,
//! disposal, and a paint that finds the view unfocused may all request it
//! redundantly.

pub mod overlay;
pub mod registry;
pub mod shape;

#[cfg(test)]
pub(crate) mod testing;

pub use overlay::{CaretOverlay, MIN_VISIBLE_OPACITY};
pub use registry::{
    attach_view, detach_all_views, detach_view, overlay_for_view, registered_view_count,
    sweep_disposed_views,
};
pub use shape::caret_rect;

pub use glint_core::{HostView, Scheduler};
