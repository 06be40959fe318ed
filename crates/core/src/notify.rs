//! Transient user notifications.

use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use log::{error, info, warn};

use crate::{
    config::NOTIFICATION_DURATION,
    messages::{Locale, Message},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        })
    }
}

/// A message shown to the user, dismissed after `dismiss_after`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: Message,
    pub severity: Severity,
    pub text: String,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn new(message: Message, locale: Locale) -> Self {
        Self {
            message,
            severity: message.severity(),
            text: message.text(locale).to_string(),
            dismiss_after: NOTIFICATION_DURATION,
        }
    }
}

/// Receives notifications. Overlapping notifications stack; none are merged.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Writes notifications to the log facade, mapped by severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, n: Notification) {
        match n.severity {
            Severity::Info | Severity::Success => info!("{}", n.text),
            Severity::Warning => warn!("{}", n.text),
            Severity::Danger => error!("{}", n.text),
        }
    }
}

/// Keeps every notification in a shared list.
///
/// Clones share the same list, so one handle can be given to a session while
/// another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier(Rc<RefCell<Vec<Notification>>>);

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.0.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.0.borrow().iter().map(|n| n.message).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.0.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}
