//! Annotation model and rendering (Cairo-based).
//!
//! This module defines the core drawing types used for plan annotation:
//! - [`Annotation`]: the closed set of markers, shapes and labels
//! - [`History`]: bounded undo/redo snapshots of the annotation list
//! - [`hit_test`]: topmost annotation under a point
//! - [`PlanCanvas`]: the composite bitmap repainted on every change

pub mod annotation;
pub mod canvas;
pub mod color;
pub mod font;
pub mod history;
pub mod measure;
pub mod render;
pub mod style;

// Re-export commonly used types at module level
pub use annotation::{Annotation, AnnotationKind};
pub use canvas::{Background, CanvasError, PlanCanvas};
pub use color::{BLACK, Color, DEFAULT_TEXT_COLOR, TEXT_PALETTE, WHITE};
pub use font::FontDescriptor;
pub use history::{HISTORY_LIMIT, History};
pub use hit_test::hit_test;
pub use measure::{FixedAdvanceMeasure, PangoTextMeasure, TextMeasure};
pub use render::{render_annotation, render_annotations};
pub use style::RenderStyle;
