//! Per-view caret overlay
//!
//! One `CaretOverlay` owns the animation engine for one editor view and
//! everything host-facing: native caret suppression, the paint region,
//! the two repeating timers, and the focus/disposal lifecycle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use glint_core::{
    BlinkStyle, DrawCommand, DrawList, HostView, OverlaySettings, Scheduler, TickCallback, TimerId,
    ViewId,
};
use glint_engine::{AnimationEngine, RESUME_BLINK_DELAY_MS};

use crate::shape;

/// Below this paint alpha the caret is invisible and drawing is skipped
pub const MIN_VISIBLE_OPACITY: f64 = 0.01;

/// Position timer never runs faster than this, in milliseconds
const MIN_POSITION_PERIOD_MS: f64 = 8.0;

/// Blink timer never runs faster than this, in milliseconds
const MIN_BLINK_PERIOD_MS: f64 = 16.0;

const MIN_REFRESH_HZ: f64 = 30.0;
const MAX_REFRESH_HZ: f64 = 240.0;
const FALLBACK_REFRESH_HZ: f64 = 60.0;

/// First host-reported refresh rate wins for the process lifetime; display
/// rates rarely change and querying per tick is wasted work. Stored in
/// millihertz so a `OnceLock<u32>` suffices.
static REFRESH_RATE_MILLIHZ: OnceLock<u32> = OnceLock::new();

pub(crate) fn clamp_refresh_rate(hz: Option<f64>) -> f64 {
    match hz {
        Some(hz) if hz.is_finite() => hz.clamp(MIN_REFRESH_HZ, MAX_REFRESH_HZ),
        _ => FALLBACK_REFRESH_HZ,
    }
}

fn cached_refresh_rate(view: &dyn HostView) -> f64 {
    let millihz = REFRESH_RATE_MILLIHZ
        .get_or_init(|| (clamp_refresh_rate(view.refresh_rate_hz()) * 1000.0) as u32);
    *millihz as f64 / 1000.0
}

pub(crate) fn position_period(hz: f64) -> Duration {
    Duration::from_secs_f64((1000.0 / hz).max(MIN_POSITION_PERIOD_MS) / 1000.0)
}

pub(crate) fn blink_period(hz: f64) -> Duration {
    Duration::from_secs_f64((1000.0 / hz).max(MIN_BLINK_PERIOD_MS) / 1000.0)
}

struct OverlayInner {
    view: Rc<dyn HostView>,
    scheduler: Rc<RefCell<dyn Scheduler>>,
    settings: OverlaySettings,
    engine: AnimationEngine,
    /// Anchor for the engine's millisecond time base
    epoch: Instant,
    active: bool,
    detached: bool,
    /// Discard per-caret state on the next paint (set at attach and on
    /// each focus gain, so a view switch never animates across views)
    needs_reset: bool,
    position_timer: Option<TimerId>,
    blink_timer: Option<TimerId>,
}

impl OverlayInner {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Stop ticking. Level-triggered and idempotent: focus-lost, disposal,
    /// and the paint path may all call this redundantly.
    fn deactivate(&mut self) {
        if !self.active && self.position_timer.is_none() && self.blink_timer.is_none() {
            return;
        }
        self.active = false;
        let mut scheduler = self.scheduler.borrow_mut();
        if let Some(id) = self.position_timer.take() {
            scheduler.cancel(id);
        }
        if let Some(id) = self.blink_timer.take() {
            scheduler.cancel(id);
        }
        drop(scheduler);
        debug!(view = self.view.view_id().0, "caret overlay deactivated");
    }

    /// Full teardown: stop timers, hand the caret back to the host,
    /// discard all per-caret state. Host failures here are logged and
    /// swallowed so one failing view never blocks cleanup of others.
    fn teardown(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.deactivate();
        let now = self.now_ms();
        self.engine.reset(now);

        if self.view.is_disposed() {
            return;
        }
        if self.settings.replace_default_caret {
            if let Err(err) = self.view.set_native_caret_suppressed(false) {
                warn!(view = self.view.view_id().0, %err, "failed to restore native caret");
            }
        }
        if let Err(err) = self.view.clear_paint_region() {
            warn!(view = self.view.view_id().0, %err, "failed to clear paint region");
        }
    }
}

/// Handle to one attached overlay. Cheap to clone; all clones share the
/// same per-view state on the host UI thread.
#[derive(Clone)]
pub struct CaretOverlay {
    inner: Rc<RefCell<OverlayInner>>,
}

impl CaretOverlay {
    /// Attach an overlay to a view.
    ///
    /// Returns `None` when the settings disable the overlay, the view is
    /// not a main editable view, or it is already disposed. On success the
    /// native caret is suppressed and the paint region registered; the
    /// overlay starts `Inactive` and activates on its first focused paint.
    pub fn attach(
        view: Rc<dyn HostView>,
        scheduler: Rc<RefCell<dyn Scheduler>>,
        settings: OverlaySettings,
    ) -> Option<CaretOverlay> {
        let settings = settings.sanitized();
        if !settings.enabled || view.is_disposed() || !view.is_main_editor() {
            return None;
        }

        if settings.replace_default_caret {
            if let Err(err) = view.set_native_caret_suppressed(true) {
                warn!(view = view.view_id().0, %err, "failed to suppress native caret");
            }
        }
        let length = view.document_length().max(1);
        if let Err(err) = view.set_paint_region(0..length) {
            warn!(view = view.view_id().0, %err, "failed to register paint region");
        }

        let mut engine = AnimationEngine::new(0.0);
        engine.set_char_width(view.char_width());
        debug!(view = view.view_id().0, "caret overlay attached");

        Some(CaretOverlay {
            inner: Rc::new(RefCell::new(OverlayInner {
                view,
                scheduler,
                settings,
                engine,
                epoch: Instant::now(),
                active: false,
                detached: false,
                needs_reset: true,
                position_timer: None,
                blink_timer: None,
            })),
        })
    }

    pub fn view_id(&self) -> ViewId {
        self.inner.borrow().view.view_id()
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().active
    }

    pub fn is_detached(&self) -> bool {
        self.inner.borrow().detached
    }

    pub fn view_disposed(&self) -> bool {
        self.inner.borrow().view.is_disposed()
    }

    /// Paint using the overlay's own clock. Hosts call this from their
    /// repaint callback.
    pub fn paint(&self) -> DrawList {
        let now = self.inner.borrow().now_ms();
        self.paint_at(now)
    }

    /// Paint at an explicit engine timestamp (monotonic milliseconds).
    ///
    /// Pure with respect to drawing: returns the commands for this frame
    /// and touches no surface. Unfocused or disposed views deactivate and
    /// paint nothing.
    pub fn paint_at(&self, now_ms: f64) -> DrawList {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.detached || !inner.settings.enabled {
                return DrawList::new();
            }
            if inner.view.is_disposed() || !inner.view.is_focused() {
                inner.deactivate();
                return DrawList::new();
            }
            if inner.needs_reset {
                inner.engine.reset(now_ms);
                inner.needs_reset = false;
            }
        }
        self.ensure_active();

        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        inner.engine.set_char_width(inner.view.char_width());
        let live = inner.view.caret_ids();
        inner.engine.prune(&live);
        for id in &live {
            if let Some(anchor) = inner.view.caret_anchor(*id) {
                inner.engine.observe(*id, anchor, now_ms);
            }
        }
        inner.engine.advance(now_ms, &inner.settings);

        let blink = inner.engine.blink_value(now_ms, &inner.settings);
        if blink.opacity <= MIN_VISIBLE_OPACITY {
            return DrawList::new();
        }

        let line_height = inner.view.line_height();
        let mut commands = DrawList::new();
        for (id, pos) in inner.engine.positions() {
            if !pos.is_finite() {
                warn!(caret = id.0, "skipping caret with non-finite position");
                continue;
            }
            let rect = shape::caret_rect(pos, &inner.settings, line_height, blink.scale_y);
            commands.push(DrawCommand::FillRect {
                rect,
                opacity: blink.opacity,
            });
        }
        commands
    }

    /// Host caret-moved listener. Schedules a repaint, never a resync; the
    /// paint path re-reads positions itself. The host's repaint request is
    /// posted, which keeps this safe to call from inside paint-adjacent
    /// callbacks.
    pub fn on_caret_moved(&self) {
        let inner = self.inner.borrow();
        if inner.detached || !inner.settings.enabled || inner.view.is_disposed() {
            return;
        }
        inner.view.request_repaint();
    }

    /// Host document-change listener. Always re-registers the paint region
    /// over the full new document length.
    pub fn on_document_changed(&self) {
        let inner = self.inner.borrow();
        if inner.detached || inner.view.is_disposed() {
            return;
        }
        let length = inner.view.document_length().max(1);
        if let Err(err) = inner.view.set_paint_region(0..length) {
            warn!(view = inner.view.view_id().0, %err, "failed to re-register paint region");
        }
    }

    /// Host focus listener.
    pub fn on_focus_changed(&self, focused: bool) {
        let mut inner = self.inner.borrow_mut();
        if inner.detached {
            return;
        }
        if focused {
            // The repaint pulls the overlay active; its first paint starts
            // from a clean slate rather than animating across views.
            inner.needs_reset = true;
            if !inner.view.is_disposed() {
                inner.view.request_repaint();
            }
        } else {
            inner.deactivate();
        }
    }

    /// Host view-disposed notification: full teardown.
    pub fn on_view_disposed(&self) {
        self.inner.borrow_mut().teardown();
    }

    /// Swap in a new settings snapshot between ticks.
    pub fn update_settings(&self, settings: OverlaySettings) {
        let mut inner = self.inner.borrow_mut();
        if inner.detached {
            return;
        }
        let was_enabled = inner.settings.enabled;
        let was_replacing = inner.settings.replace_default_caret;
        inner.settings = settings.sanitized();

        if was_enabled && !inner.settings.enabled {
            inner.deactivate();
            if !inner.view.is_disposed() && was_replacing {
                if let Err(err) = inner.view.set_native_caret_suppressed(false) {
                    warn!(view = inner.view.view_id().0, %err, "failed to restore native caret");
                }
            }
        } else if !was_enabled && inner.settings.enabled && !inner.view.is_disposed() {
            if inner.settings.replace_default_caret {
                if let Err(err) = inner.view.set_native_caret_suppressed(true) {
                    warn!(view = inner.view.view_id().0, %err, "failed to suppress native caret");
                }
            }
            inner.view.request_repaint();
        }
    }

    /// Detach from the view: stop timers, restore the native caret, drop
    /// all per-caret state. Idempotent.
    pub fn detach(&self) {
        self.inner.borrow_mut().teardown();
    }

    /// Start the two repeating timers if the overlay isn't ticking yet.
    fn ensure_active(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.active || inner.detached {
            return;
        }
        inner.active = true;

        let hz = cached_refresh_rate(inner.view.as_ref());
        let scheduler = Rc::clone(&inner.scheduler);
        let mut scheduler = scheduler.borrow_mut();

        let weak = Rc::downgrade(&self.inner);
        let position_cb: TickCallback = Box::new(move || position_tick(&weak));
        inner.position_timer = Some(scheduler.schedule_repeating(position_period(hz), position_cb));

        let weak = Rc::downgrade(&self.inner);
        let blink_cb: TickCallback = Box::new(move || blink_tick(&weak));
        inner.blink_timer = Some(scheduler.schedule_repeating(blink_period(hz), blink_cb));

        debug!(view = inner.view.view_id().0, hz, "caret overlay activated");
    }

    #[cfg(test)]
    pub(crate) fn rewind_epoch(&self, ms: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.epoch = inner
            .epoch
            .checked_sub(Duration::from_millis(ms))
            .expect("epoch rewind underflow");
    }
}

/// Position timer body: pull fresh anchors, advance interpolation, repaint
/// if anything moved. Self-cancels when the view dies or loses focus.
fn position_tick(weak: &Weak<RefCell<OverlayInner>>) -> bool {
    let Some(rc) = weak.upgrade() else {
        return false;
    };
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    if inner.detached || !inner.active {
        return false;
    }
    if inner.view.is_disposed() || !inner.view.is_focused() {
        inner.deactivate();
        return false;
    }

    let now = inner.now_ms();
    let live = inner.view.caret_ids();
    inner.engine.prune(&live);
    for id in &live {
        if let Some(anchor) = inner.view.caret_anchor(*id) {
            inner.engine.observe(*id, anchor, now);
        }
    }
    if inner.engine.advance(now, &inner.settings) {
        inner.view.request_repaint();
    }
    true
}

/// Blink timer body: once motion has settled past the resume delay,
/// repaint purely to animate the waveform.
fn blink_tick(weak: &Weak<RefCell<OverlayInner>>) -> bool {
    let Some(rc) = weak.upgrade() else {
        return false;
    };
    let mut guard = rc.borrow_mut();
    let inner = &mut *guard;
    if inner.detached || !inner.active {
        return false;
    }
    if inner.view.is_disposed() || !inner.view.is_focused() {
        inner.deactivate();
        return false;
    }
    if inner.settings.blink_style == BlinkStyle::Solid {
        return true;
    }
    let now = inner.now_ms();
    if inner.engine.since_last_motion(now) > RESUME_BLINK_DELAY_MS {
        inner.view.request_repaint();
    }
    true
}
