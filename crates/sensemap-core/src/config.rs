use serde::{Deserialize, Serialize};

/// Default pick radius around handles and shapes, in floor-plan units
pub const DEFAULT_HIT_TOLERANCE: f64 = 8.0;

/// Zones at or below this extent are discarded instead of committed
pub const DEFAULT_DISCARD_THRESHOLD: f64 = 1.0;

/// Tunables for the draw/edit state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_tolerance: f64,
    pub discard_threshold: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            discard_threshold: DEFAULT_DISCARD_THRESHOLD,
        }
    }
}
