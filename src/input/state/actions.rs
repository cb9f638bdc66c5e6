use crate::config::Action;
use crate::draw::Annotation;
use crate::input::events::Key;

use super::{InputState, InteractionState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles:
    /// - Modifier key tracking
    /// - Keyboard shortcuts (undo/redo, text confirm/cancel - configurable)
    /// - Text input while a label is pending
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            Key::Meta => {
                self.modifiers.meta = true;
                return;
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if matches!(self.state, InteractionState::TextEntryPending { .. }) {
            // Plain characters are text; only chords and special keys may be shortcuts
            let should_check_actions = match key {
                Key::Escape | Key::Return => true,
                _ => self.modifiers.primary() || self.modifiers.alt,
            };

            if should_check_actions {
                if let Some(action) = self.find_action(&key_str) {
                    self.handle_action(action);
                    return;
                }
            }

            match key {
                Key::Return => {
                    self.confirm_text();
                }
                Key::Escape => {
                    self.cancel_text();
                }
                Key::Char(c) if !self.modifiers.primary() => {
                    self.edit_text_buffer(|buffer| buffer.push(c));
                }
                Key::Space => {
                    self.edit_text_buffer(|buffer| buffer.push(' '));
                }
                Key::Backspace => {
                    self.edit_text_buffer(|buffer| {
                        buffer.pop();
                    });
                }
                _ => {}
            }
            return;
        }

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event.
    ///
    /// Only modifier releases change state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            Key::Meta => self.modifiers.meta = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding or a host button.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::ConfirmText => {
                if matches!(self.state, InteractionState::TextEntryPending { .. }) {
                    self.confirm_text();
                }
            }
            Action::CancelText => match self.state {
                InteractionState::TextEntryPending { .. } => self.cancel_text(),
                InteractionState::ToolSelected(_) => self.clear_tool(),
                _ => {}
            },
        }
    }

    fn edit_text_buffer(&mut self, edit: impl FnOnce(&mut String)) {
        if let InteractionState::TextEntryPending { buffer, .. } = &mut self.state {
            edit(buffer);
            self.needs_redraw = true;
        }
    }

    /// Text currently typed into the pending label, if any.
    pub fn text_entry(&self) -> Option<&str> {
        match &self.state {
            InteractionState::TextEntryPending { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Replaces the pending label text, for hosts with a native text field.
    pub fn set_text_entry(&mut self, value: &str) {
        self.edit_text_buffer(|buffer| {
            buffer.clear();
            buffer.push_str(value);
        });
    }

    /// Commits the pending label if its trimmed text is non-empty.
    ///
    /// Returns to `Idle` either way.
    pub fn confirm_text(&mut self) -> bool {
        if !matches!(self.state, InteractionState::TextEntryPending { .. }) {
            return false;
        }
        let InteractionState::TextEntryPending { at, buffer } =
            std::mem::replace(&mut self.state, InteractionState::Idle)
        else {
            return false;
        };
        self.needs_redraw = true;

        let text = buffer.trim();
        if text.is_empty() {
            log::debug!("Discarding empty label");
            return false;
        }

        self.commit_new(Annotation::Text {
            x: at.x,
            y: at.y,
            text: text.to_string(),
            color: self.current_color.clone(),
            font_size: self.current_font_size,
        });
        true
    }

    /// Discards the pending label.
    pub fn cancel_text(&mut self) {
        if matches!(self.state, InteractionState::TextEntryPending { .. }) {
            self.state = InteractionState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Focus left the entry box without Enter or Escape: same as confirming.
    pub fn blur_text(&mut self) -> bool {
        self.confirm_text()
    }
}
