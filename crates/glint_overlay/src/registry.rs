//! Process-wide overlay registry
//!
//! One overlay per live editor view, keyed by the host's view identity and
//! torn down deterministically on a disposal notification rather than by
//! waiting for the key to be collected. Thread-local because the whole
//! overlay runs on the host UI thread.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use glint_core::{HostView, OverlaySettings, Scheduler, ViewId};

use crate::overlay::CaretOverlay;

thread_local! {
    static OVERLAYS: RefCell<FxHashMap<ViewId, CaretOverlay>> =
        RefCell::new(FxHashMap::default());
}

/// Attach an overlay to a view and register it.
///
/// A second attach for the same view returns the existing overlay instead
/// of stacking a duplicate. Returns `None` when the overlay refuses the
/// view (disabled, non-main, or disposed).
pub fn attach_view(
    view: Rc<dyn HostView>,
    scheduler: Rc<RefCell<dyn Scheduler>>,
    settings: OverlaySettings,
) -> Option<CaretOverlay> {
    let id = view.view_id();
    if let Some(existing) = overlay_for_view(id) {
        if !existing.is_detached() {
            return Some(existing);
        }
    }
    let overlay = CaretOverlay::attach(view, scheduler, settings)?;
    OVERLAYS.with(|overlays| {
        overlays.borrow_mut().insert(id, overlay.clone());
    });
    Some(overlay)
}

/// Detach and unregister the overlay for a view, then opportunistically
/// sweep any other registered view found disposed. The sweep is defensive
/// cleanup against missed detach calls from the host.
pub fn detach_view(id: ViewId) {
    let overlay = OVERLAYS.with(|overlays| overlays.borrow_mut().remove(&id));
    if let Some(overlay) = overlay {
        overlay.detach();
    }
    sweep_disposed_views();
}

/// Detach and unregister every overlay whose view has been disposed.
pub fn sweep_disposed_views() {
    let stale: Vec<(ViewId, CaretOverlay)> = OVERLAYS.with(|overlays| {
        overlays
            .borrow()
            .iter()
            .filter(|(_, overlay)| overlay.view_disposed())
            .map(|(id, overlay)| (*id, overlay.clone()))
            .collect()
    });
    for (id, overlay) in stale {
        debug!(view = id.0, "sweeping overlay for disposed view");
        OVERLAYS.with(|overlays| {
            overlays.borrow_mut().remove(&id);
        });
        overlay.detach();
    }
}

/// Look up the registered overlay for a view
pub fn overlay_for_view(id: ViewId) -> Option<CaretOverlay> {
    OVERLAYS.with(|overlays| overlays.borrow().get(&id).cloned())
}

/// Number of registered overlays
pub fn registered_view_count() -> usize {
    OVERLAYS.with(|overlays| overlays.borrow().len())
}

/// Detach every registered overlay (for testing and host shutdown)
pub fn detach_all_views() {
    let all: Vec<CaretOverlay> = OVERLAYS.with(|overlays| {
        overlays.borrow_mut().drain().map(|(_, o)| o).collect()
    });
    for overlay in all {
        overlay.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualScheduler, MockView};

    fn setup() {
        detach_all_views();
    }

    #[test]
    fn test_attach_registers_one_overlay_per_view() {
        setup();
        let view = MockView::new(1);
        let scheduler = ManualScheduler::new();
        let first = attach_view(
            view.clone(),
            scheduler.clone(),
            OverlaySettings::default(),
        )
        .unwrap();
        assert_eq!(registered_view_count(), 1);

        // Re-attach returns the same overlay, not a duplicate.
        let second = attach_view(view, scheduler, OverlaySettings::default()).unwrap();
        assert_eq!(registered_view_count(), 1);
        assert_eq!(first.view_id(), second.view_id());
    }

    #[test]
    fn test_refused_attach_registers_nothing() {
        setup();
        let view = MockView::new(2);
        view.main_editor.set(false);
        assert!(attach_view(view, ManualScheduler::new(), OverlaySettings::default()).is_none());
        assert_eq!(registered_view_count(), 0);
    }

    #[test]
    fn test_detach_view_restores_host_and_unregisters() {
        setup();
        let view = MockView::new(3);
        let overlay =
            attach_view(view.clone(), ManualScheduler::new(), OverlaySettings::default()).unwrap();
        assert!(view.native_caret_suppressed.get());

        detach_view(view.id);
        assert_eq!(registered_view_count(), 0);
        assert!(overlay.is_detached());
        assert!(!view.native_caret_suppressed.get());

        // Detaching an unknown view is a no-op.
        detach_view(ViewId(999));
    }

    #[test]
    fn test_detach_sweeps_other_disposed_views() {
        setup();
        let scheduler = ManualScheduler::new();
        let alive = MockView::new(4);
        let dying = MockView::new(5);
        attach_view(alive.clone(), scheduler.clone(), OverlaySettings::default()).unwrap();
        let dying_overlay =
            attach_view(dying.clone(), scheduler.clone(), OverlaySettings::default()).unwrap();
        assert_eq!(registered_view_count(), 2);

        // Host forgot to detach view 5 before disposing it.
        dying.disposed.set(true);
        detach_view(ViewId(12345));

        assert_eq!(registered_view_count(), 1);
        assert!(dying_overlay.is_detached());
        assert!(overlay_for_view(alive.id).is_some());
    }

    #[test]
    fn test_sweep_is_idempotent() {
        setup();
        let view = MockView::new(6);
        attach_view(view.clone(), ManualScheduler::new(), OverlaySettings::default()).unwrap();
        view.disposed.set(true);
        sweep_disposed_views();
        assert_eq!(registered_view_count(), 0);
        sweep_disposed_views();
        assert_eq!(registered_view_count(), 0);
    }

    #[test]
    fn test_reattach_after_detach_creates_fresh_overlay() {
        setup();
        let view = MockView::new(7);
        let scheduler = ManualScheduler::new();
        let first = attach_view(
            view.clone(),
            scheduler.clone(),
            OverlaySettings::default(),
        )
        .unwrap();
        detach_view(view.id);
        assert!(first.is_detached());

        let second = attach_view(view.clone(), scheduler, OverlaySettings::default()).unwrap();
        assert!(!second.is_detached());
        assert!(view.native_caret_suppressed.get());
    }
}
