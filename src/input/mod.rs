//! Input handling and tool state machine.
//!
//! This module translates host pointer and keyboard events into annotation edits.
//! It maintains the active tool, the color and size pickers, and the state
//! machine for the interaction modes (idle, drawing, dragging, text entry).

pub mod events;
pub mod modifiers;
pub mod shortcuts;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use shortcuts::{ShortcutRegistry, ShortcutScope};
pub use state::{CursorHint, InputState, InteractionState};
pub use tool::{FontSize, PaletteMode, Tool};
