//! Generic input event types delivered by the host.

/// Generic key representation.
///
/// Hosts map their native key codes to these values before handing them to
/// the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (letters, digits, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Meta/Command/Super modifier
    Meta,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used in keybinding strings, or `None` for modifiers and unknown keys.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Space => Some("Space".to_string()),
            _ => None,
        }
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button (places, draws and drags)
    Left,
    /// Secondary button (ignored)
    Right,
    /// Middle button (ignored)
    Middle,
}
