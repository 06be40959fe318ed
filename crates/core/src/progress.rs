//! Activation progress tracking.

use std::{cell::RefCell, rc::Rc, time::Duration};

use log::debug;

/// Progress milestones of one activation sequence.
pub mod milestone {
    pub const STARTED: u8 = 0;
    pub const READING: u8 = 20;
    pub const READ: u8 = 40;
    pub const PARSED: u8 = 60;
    pub const REGISTERED: u8 = 80;
    pub const APPLIED: u8 = 90;
    pub const DONE: u8 = 100;
}

/// What a progress indicator is told to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Show(u8),
    Update(u8),
    HideAfter(Duration),
}

/// Displays activation progress.
pub trait ProgressSink {
    fn show(&mut self, percent: u8);
    fn update(&mut self, percent: u8);
    /// Hide the indicator once `delay` has elapsed.
    fn hide_after(&mut self, delay: Duration);
}

/// Logs progress at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn show(&mut self, percent: u8) {
        debug!("Progress shown at {percent}%");
    }

    fn update(&mut self, percent: u8) {
        debug!("Progress {percent}%");
    }

    fn hide_after(&mut self, delay: Duration) {
        debug!("Progress hidden in {}ms", delay.as_millis());
    }
}

/// Records progress events in a shared list.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress(Rc<RefCell<Vec<ProgressEvent>>>);

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.0.borrow().clone()
    }

    /// Percentages reported since the last `Show`, including it.
    pub fn percentages(&self) -> Vec<u8> {
        let events = self.0.borrow();
        let start = events.iter().rposition(|e| matches!(e, ProgressEvent::Show(_))).unwrap_or(0);
        events[start..]
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Show(p) | ProgressEvent::Update(p) => Some(*p),
                ProgressEvent::HideAfter(_) => None,
            })
            .collect()
    }
}

impl ProgressSink for MemoryProgress {
    fn show(&mut self, percent: u8) {
        self.0.borrow_mut().push(ProgressEvent::Show(percent));
    }

    fn update(&mut self, percent: u8) {
        self.0.borrow_mut().push(ProgressEvent::Update(percent));
    }

    fn hide_after(&mut self, delay: Duration) {
        self.0.borrow_mut().push(ProgressEvent::HideAfter(delay));
    }
}

/// Progress of the current activation, never moving backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationProgress {
    percent: u8,
    visible: bool,
}

impl ActivationProgress {
    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reset to 0 and show.
    pub fn start(&mut self, sink: &mut dyn ProgressSink) {
        self.percent = milestone::STARTED;
        self.visible = true;
        sink.show(self.percent);
    }

    /// Move to `percent`, ignoring values below the current one.
    pub fn advance(&mut self, percent: u8, sink: &mut dyn ProgressSink) {
        let percent = percent.min(milestone::DONE);
        if percent < self.percent {
            debug!("Ignoring progress regression {} -> {percent}", self.percent);
            return;
        }
        self.percent = percent;
        sink.update(percent);
    }

    pub fn hide_after(&mut self, delay: Duration, sink: &mut dyn ProgressSink) {
        self.visible = false;
        sink.hide_after(delay);
    }
}
