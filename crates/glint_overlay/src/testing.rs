//! Test doubles: a scriptable host view and a manually fired scheduler.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

use slotmap::SlotMap;

use glint_core::{
    CaretId, HostView, OverlayError, Point, Result, Scheduler, TickCallback, TimerId, ViewId,
};

/// In-memory host view with every knob exposed as a Cell/RefCell
pub struct MockView {
    pub id: ViewId,
    pub disposed: Cell<bool>,
    pub focused: Cell<bool>,
    pub main_editor: Cell<bool>,
    pub carets: RefCell<Vec<(CaretId, Point)>>,
    pub line_height: Cell<f64>,
    pub char_width: Cell<f64>,
    pub document_length: Cell<usize>,
    pub native_caret_suppressed: Cell<bool>,
    pub paint_region: RefCell<Option<Range<usize>>>,
    pub repaint_requests: Cell<usize>,
    pub refresh_rate: Cell<Option<f64>>,
    /// Make native-caret and paint-region calls fail, to exercise the
    /// swallow-at-cleanup paths
    pub fail_host_calls: Cell<bool>,
}

impl MockView {
    pub fn new(id: u64) -> Rc<Self> {
        Rc::new(Self {
            id: ViewId(id),
            disposed: Cell::new(false),
            focused: Cell::new(true),
            main_editor: Cell::new(true),
            carets: RefCell::new(Vec::new()),
            line_height: Cell::new(18.0),
            char_width: Cell::new(8.0),
            document_length: Cell::new(100),
            native_caret_suppressed: Cell::new(false),
            paint_region: RefCell::new(None),
            repaint_requests: Cell::new(0),
            refresh_rate: Cell::new(Some(60.0)),
            fail_host_calls: Cell::new(false),
        })
    }

    /// Insert or move a caret
    pub fn set_caret(&self, id: u64, x: f64, y: f64) {
        let mut carets = self.carets.borrow_mut();
        let point = Point::new(x, y);
        if let Some(entry) = carets.iter_mut().find(|(c, _)| *c == CaretId(id)) {
            entry.1 = point;
        } else {
            carets.push((CaretId(id), point));
        }
    }

    pub fn remove_caret(&self, id: u64) {
        self.carets.borrow_mut().retain(|(c, _)| *c != CaretId(id));
    }
}

impl HostView for MockView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }

    fn is_main_editor(&self) -> bool {
        self.main_editor.get()
    }

    fn caret_ids(&self) -> Vec<CaretId> {
        self.carets.borrow().iter().map(|(id, _)| *id).collect()
    }

    fn caret_anchor(&self, id: CaretId) -> Option<Point> {
        self.carets
            .borrow()
            .iter()
            .find(|(c, _)| *c == id)
            .map(|(_, p)| *p)
    }

    fn line_height(&self) -> f64 {
        self.line_height.get()
    }

    fn char_width(&self) -> f64 {
        self.char_width.get()
    }

    fn document_length(&self) -> usize {
        self.document_length.get()
    }

    fn set_native_caret_suppressed(&self, suppressed: bool) -> Result<()> {
        if self.fail_host_calls.get() {
            return Err(OverlayError::NativeCaret("mock failure".into()));
        }
        self.native_caret_suppressed.set(suppressed);
        Ok(())
    }

    fn set_paint_region(&self, span: Range<usize>) -> Result<()> {
        if self.fail_host_calls.get() {
            return Err(OverlayError::PaintRegion("mock failure".into()));
        }
        *self.paint_region.borrow_mut() = Some(span);
        Ok(())
    }

    fn clear_paint_region(&self) -> Result<()> {
        if self.fail_host_calls.get() {
            return Err(OverlayError::PaintRegion("mock failure".into()));
        }
        *self.paint_region.borrow_mut() = None;
        Ok(())
    }

    fn request_repaint(&self) {
        self.repaint_requests.set(self.repaint_requests.get() + 1);
    }

    fn refresh_rate_hz(&self) -> Option<f64> {
        self.refresh_rate.get()
    }
}

struct TimerSlot {
    period: Duration,
    /// Taken out while the callback runs so firing can't hold the
    /// scheduler borrow
    callback: Option<TickCallback>,
}

/// Scheduler whose timers only fire when the test says so
#[derive(Default)]
pub struct ManualScheduler {
    timers: SlotMap<TimerId, TimerSlot>,
}

impl ManualScheduler {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn timer_ids(&self) -> Vec<TimerId> {
        self.timers.keys().collect()
    }

    pub fn period(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(id).map(|slot| slot.period)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration, callback: TickCallback) -> TimerId {
        self.timers.insert(TimerSlot {
            period,
            callback: Some(callback),
        })
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(id);
    }
}

/// Fire one timer. Returns whether the timer kept itself alive.
pub fn fire(scheduler: &Rc<RefCell<ManualScheduler>>, id: TimerId) -> bool {
    let callback = scheduler
        .borrow_mut()
        .timers
        .get_mut(id)
        .and_then(|slot| slot.callback.take());
    let Some(mut callback) = callback else {
        return false;
    };
    let keep = callback();
    let mut sched = scheduler.borrow_mut();
    if keep {
        // The callback may have cancelled its own timer while running.
        if let Some(slot) = sched.timers.get_mut(id) {
            slot.callback = Some(callback);
        }
    } else {
        sched.timers.remove(id);
    }
    keep
}

/// Fire every registered timer once
pub fn fire_all(scheduler: &Rc<RefCell<ManualScheduler>>) {
    let ids = scheduler.borrow().timer_ids();
    for id in ids {
        fire(scheduler, id);
    }
}
