//! The fixed set of recognized annotation categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Broad grouping used by reports and legends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    /// Something that stimulates the senses
    Sensory,
    /// A place to recover from stimulation
    Respite,
    /// Practical facilities
    Amenity,
}

impl CategoryGroup {
    pub fn label(self) -> &'static str {
        match self {
            CategoryGroup::Sensory => "Sensory",
            CategoryGroup::Respite => "Respite",
            CategoryGroup::Amenity => "Amenity",
        }
    }
}

/// What an annotation marks on the floor plan.
///
/// Serialized as its snake_case name. Anything outside this set is rejected
/// with [`ValidationError::UnknownCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    Noise,
    BrightLight,
    FlickeringLight,
    Smell,
    Crowding,
    Temperature,
    Texture,
    QuietZone,
    RespiteRoom,
    Seating,
    Outdoor,
    Toilet,
    Exit,
    WaterFountain,
    FirstAid,
    Information,
    Elevator,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::Noise,
        Category::BrightLight,
        Category::FlickeringLight,
        Category::Smell,
        Category::Crowding,
        Category::Temperature,
        Category::Texture,
        Category::QuietZone,
        Category::RespiteRoom,
        Category::Seating,
        Category::Outdoor,
        Category::Toilet,
        Category::Exit,
        Category::WaterFountain,
        Category::FirstAid,
        Category::Information,
        Category::Elevator,
    ];

    pub fn group(self) -> CategoryGroup {
        match self {
            Category::Noise
            | Category::BrightLight
            | Category::FlickeringLight
            | Category::Smell
            | Category::Crowding
            | Category::Temperature
            | Category::Texture => CategoryGroup::Sensory,
            Category::QuietZone | Category::RespiteRoom | Category::Seating | Category::Outdoor => {
                CategoryGroup::Respite
            }
            Category::Toilet
            | Category::Exit
            | Category::WaterFountain
            | Category::FirstAid
            | Category::Information
            | Category::Elevator => CategoryGroup::Amenity,
        }
    }

    /// Stable serialized name
    pub fn name(self) -> &'static str {
        match self {
            Category::Noise => "noise",
            Category::BrightLight => "bright_light",
            Category::FlickeringLight => "flickering_light",
            Category::Smell => "smell",
            Category::Crowding => "crowding",
            Category::Temperature => "temperature",
            Category::Texture => "texture",
            Category::QuietZone => "quiet_zone",
            Category::RespiteRoom => "respite_room",
            Category::Seating => "seating",
            Category::Outdoor => "outdoor",
            Category::Toilet => "toilet",
            Category::Exit => "exit",
            Category::WaterFountain => "water_fountain",
            Category::FirstAid => "first_aid",
            Category::Information => "information",
            Category::Elevator => "elevator",
        }
    }

    /// Human readable name for reports
    pub fn label(self) -> &'static str {
        match self {
            Category::Noise => "Noise",
            Category::BrightLight => "Bright light",
            Category::FlickeringLight => "Flickering light",
            Category::Smell => "Smell",
            Category::Crowding => "Crowding",
            Category::Temperature => "Temperature",
            Category::Texture => "Texture",
            Category::QuietZone => "Quiet zone",
            Category::RespiteRoom => "Respite room",
            Category::Seating => "Seating",
            Category::Outdoor => "Outdoor space",
            Category::Toilet => "Toilet",
            Category::Exit => "Exit",
            Category::WaterFountain => "Water fountain",
            Category::FirstAid => "First aid",
            Category::Information => "Information desk",
            Category::Elevator => "Elevator",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.name()
    }
}
