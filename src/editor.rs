//! Plan annotation editor session.
//!
//! A [`PlanEditor`] wraps one [`FileRecord`] for the lifetime of an editing
//! session. The host forwards pointer and keyboard events (already mapped into
//! image pixels, see [`Viewport`]) and displays [`PlanEditor::surface`] after
//! each call. The session ends with either [`PlanEditor::save`], which hands
//! the composite image and annotation list to the host, or
//! [`PlanEditor::close`], which discards every edit.

use crate::config::{Action, Config};
use crate::draw::{Annotation, Background, CanvasError, PangoTextMeasure, PlanCanvas};
use crate::input::{
    CursorHint, InputState, Key, MouseButton, PaletteMode, ShortcutRegistry, Tool,
};
use crate::record::FileRecord;
use crate::util::{Point, Viewport};
use thiserror::Error;

/// Receives the outcome of an editing session.
pub trait EditorHost {
    /// Called once on save with the composite as a data URI and the final annotation list.
    fn on_save(&mut self, content: String, annotations: Vec<Annotation>);

    /// Called once when the session is closed without saving.
    fn on_close(&mut self);
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("background image of '{0}' could not be decoded; nothing to save")]
    NoBackground(String),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// One editing session over a single plan image.
pub struct PlanEditor {
    file: FileRecord,
    background: Option<Background>,
    canvas: PlanCanvas,
    input: InputState,
    host: Box<dyn EditorHost>,
}

impl PlanEditor {
    /// Opens an editing session.
    ///
    /// The background is decoded once here. If decoding fails the session
    /// still opens, but the surface stays unpopulated and saving is refused.
    pub fn open(
        file: FileRecord,
        mode: PaletteMode,
        config: &Config,
        registry: &ShortcutRegistry,
        host: Box<dyn EditorHost>,
    ) -> Self {
        let background = match Background::decode(&file.content) {
            Ok(background) => {
                log::info!(
                    "Opened '{}' ({}x{}, {} annotations)",
                    file.name,
                    background.width(),
                    background.height(),
                    file.annotations.len()
                );
                Some(background)
            }
            Err(err) => {
                log::warn!("Failed to decode background of '{}': {}", file.name, err);
                None
            }
        };

        let style = config.render_style();
        let mut input = InputState::with_defaults(
            file.annotations.clone(),
            mode,
            config.drawing.default_text_color.to_hex(),
            config.drawing.default_font_size,
            config.interaction.hit_tolerance,
            config.interaction.min_frame_size,
            style.clone(),
            Box::new(PangoTextMeasure::new(config.font_descriptor())),
        );
        input.attach_shortcuts(registry.register(config.action_map()));

        let mut editor = Self {
            file,
            background,
            canvas: PlanCanvas::new(style),
            input,
            host,
        };
        editor.refresh();
        editor
    }

    /// Repaints the composite if the last event changed anything visible.
    fn refresh(&mut self) {
        if !self.input.needs_redraw {
            return;
        }
        self.input.needs_redraw = false;

        let preview = self.input.preview_annotation();
        if let Err(err) = self.canvas.repaint(
            self.background.as_ref(),
            self.input.annotations(),
            preview.as_ref(),
        ) {
            log::warn!("Repaint failed: {}", err);
        }
    }

    /// The record being edited, as it was opened.
    pub fn file(&self) -> &FileRecord {
        &self.file
    }

    /// Native size of the background, once decoded.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.background
            .as_ref()
            .map(|background| (background.width(), background.height()))
    }

    /// Maps a screen pointer position through `viewport` into image pixels.
    pub fn image_point(&self, viewport: &Viewport, screen_x: f64, screen_y: f64) -> Option<Point> {
        let (width, height) = self.image_size()?;
        Some(viewport.to_image(screen_x, screen_y, width, height))
    }

    /// The composite bitmap to display, once a background has been painted.
    pub fn surface(&self) -> Option<&cairo::ImageSurface> {
        self.canvas.surface()
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.input.annotations()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Tools offered by the palette this session was opened with.
    pub fn tools(&self) -> &'static [Tool] {
        self.input.palette.tools()
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.input.active_tool()
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.input.cursor_hint()
    }

    pub fn can_undo(&self) -> bool {
        self.input.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.input.can_redo()
    }

    /// Whether the color and size pickers should be shown.
    pub fn shows_style_pickers(&self) -> (bool, bool) {
        match self.active_tool() {
            Some(tool) => (tool.shows_color_picker(), tool.shows_size_picker()),
            None => (false, false),
        }
    }

    /// Text typed into the pending label, if one is open.
    pub fn text_entry(&self) -> Option<&str> {
        self.input.text_entry()
    }

    pub fn select_tool(&mut self, tool: Tool) -> bool {
        let selected = self.input.select_tool(tool);
        self.refresh();
        selected
    }

    pub fn clear_tool(&mut self) {
        self.input.clear_tool();
        self.refresh();
    }

    pub fn set_color(&mut self, hex: &str) -> bool {
        let changed = self.input.set_color(hex);
        self.refresh();
        changed
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.input.set_font_size(size);
        self.refresh();
    }

    pub fn pointer_down(&mut self, button: MouseButton, point: Point) {
        self.input.on_pointer_down(button, point);
        self.refresh();
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.input.on_pointer_move(point);
        self.refresh();
    }

    pub fn pointer_up(&mut self, button: MouseButton, point: Point) {
        self.input.on_pointer_up(button, point);
        self.refresh();
    }

    pub fn key_press(&mut self, key: Key) {
        self.input.on_key_press(key);
        self.refresh();
    }

    pub fn key_release(&mut self, key: Key) {
        self.input.on_key_release(key);
        self.refresh();
    }

    pub fn set_text_entry(&mut self, value: &str) {
        self.input.set_text_entry(value);
        self.refresh();
    }

    pub fn confirm_text(&mut self) -> bool {
        let committed = self.input.confirm_text();
        self.refresh();
        committed
    }

    pub fn cancel_text(&mut self) {
        self.input.cancel_text();
        self.refresh();
    }

    pub fn blur_text(&mut self) -> bool {
        let committed = self.input.blur_text();
        self.refresh();
        committed
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.input.undo();
        self.refresh();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.input.redo();
        self.refresh();
        changed
    }

    /// Runs an action from a host button (toolbar undo/redo, dialog confirm).
    pub fn handle_action(&mut self, action: Action) {
        self.input.handle_action(action);
        self.refresh();
    }

    /// Ends the session, handing the composite and annotation list to the host.
    ///
    /// Pending text is committed if non-empty; a drawing or drag in progress is
    /// dropped. The host is always called: if the composite cannot be
    /// produced, the original content is handed back with the annotations.
    pub fn save(mut self) {
        self.input.blur_text();
        self.input.abandon_gesture();
        self.input.release_shortcuts();

        let content = match self.composite() {
            Ok(content) => content,
            Err(err) => {
                log::warn!("{}; keeping the original image content", err);
                self.file.content.clone()
            }
        };

        let annotations = self.input.annotations().to_vec();
        log::info!("Saving '{}' with {} annotations", self.file.name, annotations.len());
        self.host.on_save(content, annotations);
    }

    /// Paints the committed annotations without preview and encodes the
    /// result in the file's mime type, as a data URI.
    pub fn composite(&mut self) -> Result<String, EditorError> {
        let Some(background) = self.background.as_ref() else {
            return Err(EditorError::NoBackground(self.file.name.clone()));
        };
        self.canvas
            .repaint(Some(background), self.input.annotations(), None)?;
        Ok(self.canvas.to_data_uri(&self.file.mime_type)?)
    }

    /// Ends the session without saving.
    pub fn close(mut self) {
        self.input.release_shortcuts();
        log::info!("Closed '{}' without saving", self.file.name);
        self.host.on_close();
    }
}
