//! Library exports for the planmarker editor core.
//!
//! A host UI opens a [`PlanEditor`] over a [`FileRecord`], forwards pointer and
//! keyboard events in image pixels, and displays the composite surface the
//! editor repaints after each event. Configuration, rendering and record types
//! are exposed so the CLI and other tools share the same code.

pub mod config;
pub mod draw;
pub mod editor;
pub mod input;
pub mod record;
pub mod util;

pub use config::Config;
pub use editor::{EditorError, EditorHost, PlanEditor};
pub use record::FileRecord;
