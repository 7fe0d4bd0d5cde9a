//! Core of sensemap: annotate a floor plan with markers and zones.
//!
//! - [`model::ShapeModel`] holds the annotations of one map
//! - [`editor::EditorState`] turns pointer events into model edits
//! - [`handles`] lays out and resolves drag handles
//! - [`color::IntensityCodec`] maps severity to color and back
//! - [`session::MapSession`] ties them together for one open map

pub mod annotation;
pub mod category;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod handles;
pub mod model;
pub mod record;
pub mod session;

pub use annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationKind, AnnotationPatch, Geometry};
pub use category::{Category, CategoryGroup};
pub use color::{IntensityCodec, Rgb};
pub use config::EditorConfig;
pub use editor::{EditorState, Effect, Phase, Transition};
pub use error::{ModelError, RecordError, ValidationError};
pub use event::{InputEvent, Key, Tool, ZoneShape};
pub use model::ShapeModel;
pub use record::{ImageDimensions, MapRecord};
pub use session::{MapSession, RenderView};

pub use sensemap_geometry as geometry;
