//! Error types for the annotation core.
//!
//! Every fallible operation either fully applies or leaves the model
//! untouched, so none of these are fatal.

use thiserror::Error;

use crate::annotation::AnnotationId;

/// Input rejected before it reaches the shape model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("intensity {0} is outside 0..=100")]
    IntensityOutOfRange(f64),
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("{0} must not be negative")]
    NegativeExtent(&'static str),
    #[error("geometry contains a non-finite coordinate")]
    NonFiniteCoordinate,
    #[error("malformed color `{0}`, expected #rrggbb")]
    MalformedColor(String),
    #[error("duplicate annotation id {0}")]
    DuplicateId(AnnotationId),
}

/// Failure of a shape model operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("annotation {0} not found")]
    NotFound(AnnotationId),
}

/// Failure to read or write a serialized map record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed map record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid item at index {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ValidationError,
    },
}
