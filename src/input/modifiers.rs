//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently pressed. Used to match keyboard
/// shortcuts and to keep shortcut chords out of the text entry buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Meta/Command key pressed
    pub meta: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ctrl, or Meta on hosts where Command plays that role.
    ///
    /// Shortcuts bound with `Ctrl+` fire for either key.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}
