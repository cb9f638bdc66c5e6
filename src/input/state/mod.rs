mod actions;
mod core;
mod mouse;
mod render;

pub use self::core::{CursorHint, FONT_SIZE_RANGE, InputState, InteractionState};
