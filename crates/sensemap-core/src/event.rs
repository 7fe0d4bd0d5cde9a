//! Input consumed by the state machine and the tool it is armed with.
//!
//! Points arrive already projected into floor-plan coordinates.

use sensemap_geometry::Point;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
}

/// Discrete pointer/keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PressDown(Point),
    Move(Point),
    PressUp(Point),
    Click(Point),
    DoubleClick(Point),
    KeyPress { key: Key },
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::KeyPress { key }
    }
}

/// Zone shape drawn by the zone tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneShape {
    Rectangle,
    Circle,
    Polygon,
}

/// Which tool is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Tool {
    /// Clicks select and deselect
    #[default]
    Select,
    /// Next click places a marker
    Marker { category: Category },
    /// Press/drag (rectangle, circle) or click sequence (polygon) draws a zone
    Zone { shape: ZoneShape, category: Category },
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Marker { .. } => "Marker",
            Tool::Zone { shape: ZoneShape::Rectangle, .. } => "Rectangle",
            Tool::Zone { shape: ZoneShape::Circle, .. } => "Circle",
            Tool::Zone { shape: ZoneShape::Polygon, .. } => "Polygon",
        }
    }
}
