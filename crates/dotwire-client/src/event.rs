//! Key events delivered by the display.

use dotwire_proto::keycodes::{self, ExpandedKey, KeyDescription};

/// A key press reported by the braille display.
///
/// Events arrive in wire order, either through the registered key callback
/// or through [`Client::read_key`](crate::Client::read_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The raw 64-bit key code.
    pub code: u64,
}

impl KeyEvent {
    /// Split the code into type, command, argument, and flag fields.
    pub fn expand(&self) -> ExpandedKey {
        keycodes::expand(self.code)
    }

    /// Resolve the code into a symbolic description.
    pub fn describe(&self) -> KeyDescription {
        keycodes::describe(self.code)
    }
}
