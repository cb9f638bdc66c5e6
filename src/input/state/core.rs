//! Interaction state machine and input state management.

use crate::config::Action;
use crate::draw::{Annotation, History, RenderStyle, TextMeasure, hit_test};
use crate::input::{
    modifiers::Modifiers,
    shortcuts::ShortcutScope,
    tool::{PaletteMode, Tool},
};
use crate::util::Point;

/// Label sizes accepted by [`InputState::set_font_size`].
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 96.0);

/// Current interaction mode.
///
/// Tracks whether the user is idle, has a tool armed, is dragging out a shape,
/// is moving an existing annotation, or is typing a label.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// No tool selected
    Idle,
    /// A tool is armed and waiting for the pointer
    ToolSelected(Tool),
    /// Dragging out an arrow, line or frame (pointer held down)
    Drawing {
        /// Which shape tool is being used
        tool: Tool,
        /// Where the pointer was pressed
        start: Point,
    },
    /// Moving an existing annotation with the move tool
    Dragging {
        /// Index of the annotation being moved
        index: usize,
        /// Pointer position relative to the annotation's anchor
        offset: Point,
        /// Annotation list before the drag began, recorded on release
        snapshot: Vec<Annotation>,
    },
    /// Waiting for label text at a clicked point
    TextEntryPending {
        /// Baseline start of the label
        at: Point,
        /// Text typed so far
        buffer: String,
    },
}

/// Pointer cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Crosshair,
    Grab,
    Grabbing,
}

/// Main input state containing all editing session state.
///
/// This struct holds the annotation history, the style pickers, modifier keys
/// and the interaction mode. It processes pointer and keyboard events to
/// update the annotation list and flags when the composite needs repainting.
pub struct InputState {
    /// Bounded undo/redo history; `present` is the live annotation list
    pub history: History,
    /// Tools offered to the user
    pub palette: PaletteMode,
    /// Color applied to new labels and shapes, as `#rrggbb`
    pub current_color: String,
    /// Font size applied to new labels, in pixels
    pub current_font_size: f64,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current interaction mode
    pub state: InteractionState,
    /// Last known pointer position in image pixels
    pub pointer: Option<Point>,
    /// Whether the composite needs to be repainted
    pub needs_redraw: bool,
    /// Pick distance for lines, arrows and frame borders
    pub hit_tolerance: f64,
    /// Frames at or below this size on both axes are discarded
    pub min_frame_size: f64,
    /// Dimensions used for hit-testing markers
    pub(crate) style: RenderStyle,
    /// Label width measurement for hit-testing
    measure: Box<dyn TextMeasure>,
    /// Keyboard shortcuts, live until this state is dropped
    shortcuts: Option<ShortcutScope>,
}

impl InputState {
    /// Creates a new InputState over an existing annotation list.
    ///
    /// # Arguments
    /// * `annotations` - Annotations already stored on the file record
    /// * `palette` - Which tools are offered
    /// * `color` - Initial color for labels and shapes (`#rrggbb`)
    /// * `font_size` - Initial label size in pixels
    /// * `hit_tolerance` - Pick distance for lines, arrows and frame borders
    /// * `min_frame_size` - Degenerate frame threshold
    /// * `style` - Marker dimensions for hit-testing
    /// * `measure` - Label width measurement for hit-testing
    #[allow(clippy::too_many_arguments)]
    pub fn with_defaults(
        annotations: Vec<Annotation>,
        palette: PaletteMode,
        color: String,
        font_size: f64,
        hit_tolerance: f64,
        min_frame_size: f64,
        style: RenderStyle,
        measure: Box<dyn TextMeasure>,
    ) -> Self {
        Self {
            history: History::new(annotations),
            palette,
            current_color: color,
            current_font_size: font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
            modifiers: Modifiers::new(),
            state: InteractionState::Idle,
            pointer: None,
            needs_redraw: true,
            hit_tolerance,
            min_frame_size,
            style,
            measure,
            shortcuts: None,
        }
    }

    /// Attaches the keyboard shortcut scope registered for this session.
    pub fn attach_shortcuts(&mut self, scope: ShortcutScope) {
        self.shortcuts = Some(scope);
    }

    /// Drops the shortcut scope, deregistering its bindings.
    pub fn release_shortcuts(&mut self) {
        self.shortcuts = None;
    }

    /// Look up an action for the given key with the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.shortcuts
            .as_ref()
            .and_then(|scope| scope.resolve(key_str, &self.modifiers))
    }

    /// The current annotation list.
    pub fn annotations(&self) -> &[Annotation] {
        self.history.present()
    }

    /// The armed tool, if any. Drags report the tool that started them.
    pub fn active_tool(&self) -> Option<Tool> {
        match &self.state {
            InteractionState::ToolSelected(tool) | InteractionState::Drawing { tool, .. } => {
                Some(*tool)
            }
            InteractionState::Dragging { .. } => Some(Tool::Move),
            InteractionState::Idle | InteractionState::TextEntryPending { .. } => None,
        }
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Drawing { .. } | InteractionState::Dragging { .. }
        )
    }

    /// Arms a tool.
    ///
    /// Pending text is blurred first. Ignored while a shape or drag is in
    /// progress, or when the tool is not part of the active palette.
    pub fn select_tool(&mut self, tool: Tool) -> bool {
        if self.is_busy() {
            log::debug!("Ignoring tool change to {:?} during a pointer gesture", tool);
            return false;
        }
        if !self.palette.contains(tool) {
            log::warn!("Tool {:?} is not available in {:?} mode", tool, self.palette);
            return false;
        }
        if matches!(self.state, InteractionState::TextEntryPending { .. }) {
            self.blur_text();
        }

        self.state = InteractionState::ToolSelected(tool);
        self.needs_redraw = true;
        log::debug!("Selected tool {:?}", tool);
        true
    }

    /// Disarms the current tool.
    pub fn clear_tool(&mut self) {
        if let InteractionState::ToolSelected(_) = self.state {
            self.state = InteractionState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Sets the color for new labels and shapes. Invalid hex strings are ignored.
    pub fn set_color(&mut self, hex: &str) -> bool {
        if crate::draw::Color::from_hex(hex).is_none() {
            log::warn!("Ignoring invalid color '{}'", hex);
            return false;
        }
        self.current_color = hex.to_string();
        self.needs_redraw = true;
        true
    }

    /// Sets the label font size, clamped to the supported range.
    pub fn set_font_size(&mut self, size: f64) {
        self.current_font_size = size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        log::debug!("Font size set to {:.1}px", self.current_font_size);
    }

    /// Index of the topmost annotation under `point`.
    pub fn annotation_at(&self, point: Point) -> Option<usize> {
        hit_test(
            self.history.present(),
            point,
            self.hit_tolerance,
            &self.style,
            self.measure.as_ref(),
        )
    }

    /// Records `annotations` as the new present.
    pub(super) fn commit(&mut self, annotations: Vec<Annotation>) {
        if self.history.push(annotations) {
            self.needs_redraw = true;
        }
    }

    /// Appends one annotation and records the result.
    pub(super) fn commit_new(&mut self, annotation: Annotation) {
        let mut next = self.history.present().to_vec();
        next.push(annotation);
        self.commit(next);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Steps back one snapshot. A no-op during pointer gestures or with empty history.
    pub fn undo(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        let changed = self.history.undo();
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    /// Steps forward one snapshot. A no-op during pointer gestures or with empty history.
    pub fn redo(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        let changed = self.history.redo();
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    /// Cursor to show over the canvas.
    pub fn cursor_hint(&self) -> CursorHint {
        match &self.state {
            InteractionState::Dragging { .. } => CursorHint::Grabbing,
            InteractionState::ToolSelected(Tool::Move) => CursorHint::Grab,
            _ => CursorHint::Crosshair,
        }
    }

    /// Drops any drawing or drag in progress.
    ///
    /// A drag restores its pre-drag snapshot; nothing is recorded in history.
    pub fn abandon_gesture(&mut self) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing { tool, .. } => {
                self.state = InteractionState::ToolSelected(tool);
                self.needs_redraw = true;
            }
            InteractionState::Dragging { snapshot, .. } => {
                self.history.set_live(snapshot);
                self.state = InteractionState::ToolSelected(Tool::Move);
                self.needs_redraw = true;
            }
            other => self.state = other,
        }
    }
}
