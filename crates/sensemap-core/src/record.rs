//! Serialized map record exchanged with the storage collaborator.
//!
//! Field names are camelCase. Unknown fields, at the top level, inside
//! `imageDimensions` and on each item, are carried through unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::annotation::Annotation;
use crate::error::{RecordError, ValidationError};

/// Pixel size of the floor-plan image
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            extra: Map::new(),
        }
    }
}

/// One stored map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRecord {
    pub floor_plan_image_ref: String,
    pub image_dimensions: ImageDimensions,
    #[serde(default)]
    pub items: Vec<Annotation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MapRecord {
    pub fn new(floor_plan_image_ref: impl Into<String>, image_dimensions: ImageDimensions) -> Self {
        Self {
            floor_plan_image_ref: floor_plan_image_ref.into(),
            image_dimensions,
            items: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Parse and validate. Any bad item rejects the whole record.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: MapRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every item and id uniqueness
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut seen = HashSet::new();
        for (index, item) in self.items.iter().enumerate() {
            let invalid = |source| RecordError::InvalidItem { index, source };
            item.validate().map_err(invalid)?;
            if !seen.insert(item.id) {
                return Err(invalid(ValidationError::DuplicateId(item.id)));
            }
        }
        Ok(())
    }
}
