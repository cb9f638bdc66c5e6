use crate::draw::Annotation;

use super::{InputState, InteractionState};

impl InputState {
    /// Returns the shape currently being drawn for live preview.
    ///
    /// # Returns
    /// - `Some(Annotation)` while dragging out a shape and the pointer position is known
    /// - `None` otherwise
    ///
    /// Unlike the committed shape, a previewed frame keeps the raw drag extent
    /// (possibly negative); rendering normalizes it.
    pub fn preview_annotation(&self) -> Option<Annotation> {
        let InteractionState::Drawing { tool, start } = &self.state else {
            return None;
        };
        let pointer = self.pointer?;

        match self.shape_between(*tool, *start, pointer)? {
            Annotation::Frame { color, .. } => Some(Annotation::Frame {
                x: start.x,
                y: start.y,
                width: pointer.x - start.x,
                height: pointer.y - start.y,
                color,
            }),
            shape => Some(shape),
        }
    }
}
