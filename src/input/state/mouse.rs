use crate::draw::Annotation;
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::{self, Point};

use super::{InputState, InteractionState};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// # Arguments
    /// * `button` - Which button was pressed
    /// * `point` - Pointer position in image pixels
    ///
    /// # Behavior
    /// - During text entry: blurs the entry box (commits non-empty text)
    /// - Move tool: starts dragging the topmost annotation under the pointer
    /// - Arrow, line and frame tools: starts drawing from the pointer
    pub fn on_pointer_down(&mut self, button: MouseButton, point: Point) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer = Some(point);

        match &self.state {
            InteractionState::TextEntryPending { .. } => {
                self.blur_text();
            }
            InteractionState::ToolSelected(Tool::Move) => {
                let Some(index) = self.annotation_at(point) else {
                    return;
                };
                let anchor = self.history.present()[index].anchor();
                log::debug!("Dragging annotation {} from ({:.1}, {:.1})", index, anchor.x, anchor.y);
                self.state = InteractionState::Dragging {
                    index,
                    offset: Point::new(point.x - anchor.x, point.y - anchor.y),
                    snapshot: self.history.present().to_vec(),
                };
                self.needs_redraw = true;
            }
            InteractionState::ToolSelected(tool) if tool.is_shape() => {
                let tool = *tool;
                self.state = InteractionState::Drawing { tool, start: point };
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - While dragging: moves the annotation live without recording history
    /// - While drawing: requests a repaint of the live preview
    pub fn on_pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);

        match &self.state {
            InteractionState::Dragging { index, offset, .. } => {
                let target = Point::new(point.x - offset.x, point.y - offset.y);
                if let Some(annotation) = self.history.live_mut().get_mut(*index) {
                    annotation.move_anchor_to(target);
                    self.needs_redraw = true;
                }
            }
            InteractionState::Drawing { .. } => {
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    /// Processes a pointer button release.
    ///
    /// # Behavior
    /// - Drawing: commits the shape (degenerate frames are dropped), tool stays armed
    /// - Dragging: records the move once, using the pre-drag snapshot
    /// - Marker tool: places a marker at the pointer, tool stays armed
    /// - Text tool: opens text entry at the pointer and disarms the tool
    pub fn on_pointer_up(&mut self, button: MouseButton, point: Point) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer = Some(point);

        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Drawing { tool, start } => {
                self.state = InteractionState::ToolSelected(tool);
                self.needs_redraw = true;

                let Some(annotation) = self.shape_between(tool, start, point) else {
                    return;
                };
                if annotation.is_frame_within(self.min_frame_size) {
                    log::debug!("Discarding degenerate frame");
                    return;
                }
                self.commit_new(annotation);
            }
            InteractionState::Dragging { index, snapshot, .. } => {
                self.state = InteractionState::ToolSelected(Tool::Move);
                if self.history.commit_live(snapshot) {
                    log::debug!("Moved annotation {}", index);
                }
                self.needs_redraw = true;
            }
            InteractionState::ToolSelected(Tool::Text) => {
                self.state = InteractionState::TextEntryPending {
                    at: point,
                    buffer: String::new(),
                };
                self.needs_redraw = true;
            }
            InteractionState::ToolSelected(tool) => {
                self.state = InteractionState::ToolSelected(tool);
                let marker = tool
                    .annotation_kind()
                    .and_then(|kind| Annotation::marker(kind, point));
                if let Some(marker) = marker {
                    self.commit_new(marker);
                }
            }
            other => self.state = other,
        }
    }

    /// Builds the shape a drag from `start` to `end` produces.
    ///
    /// Frames are normalized to a non-negative size; arrows and lines keep
    /// their direction.
    pub(super) fn shape_between(&self, tool: Tool, start: Point, end: Point) -> Option<Annotation> {
        let color = Some(self.current_color.clone());
        match tool {
            Tool::Arrow => Some(Annotation::Arrow {
                x: start.x,
                y: start.y,
                x2: end.x,
                y2: end.y,
                color,
            }),
            Tool::Line => Some(Annotation::Line {
                x: start.x,
                y: start.y,
                x2: end.x,
                y2: end.y,
                color,
            }),
            Tool::Frame => {
                let (x, width) = util::normalize_span(start.x, end.x);
                let (y, height) = util::normalize_span(start.y, end.y);
                Some(Annotation::Frame {
                    x,
                    y,
                    width,
                    height,
                    color,
                })
            }
            _ => None,
        }
    }
}
