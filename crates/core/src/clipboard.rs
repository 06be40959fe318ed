//! Clipboard and color-picker collaborators.

use std::{cell::RefCell, rc::Rc};

use crate::error::ClipboardError;

/// Accepts text to copy.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps the last copied text in a shared slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard(Rc<RefCell<Option<String>>>);

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.0.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Supplies the color picker's current text color.
pub trait ColorSource {
    fn text_color(&self) -> Option<String>;
}

/// A color source with a fixed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedColor(pub Option<String>);

impl FixedColor {
    pub fn new(color: impl Into<String>) -> Self {
        Self(Some(color.into()))
    }
}

impl ColorSource for FixedColor {
    fn text_color(&self) -> Option<String> {
        self.0.clone()
    }
}
