use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sensemap_core::MapRecord;

/// Load and validate a map record from a JSON file
pub fn load_record(path: &Path) -> Result<MapRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    MapRecord::from_json(&json).with_context(|| format!("Invalid map record in {}", path.display()))
}

/// Write a map record as pretty JSON
pub fn save_record(path: &Path, record: &MapRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let json = record.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
