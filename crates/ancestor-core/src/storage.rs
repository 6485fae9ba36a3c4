//! Read/write hierarchy files from disk.

use crate::hierarchy::ClassHierarchy;
use crate::schema;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a hierarchy from a JSON file.
pub fn load(path: &Path) -> Result<ClassHierarchy> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read hierarchy from {}", path.display()))?;
    schema::from_json(&json).with_context(|| format!("invalid hierarchy file {}", path.display()))
}

/// Save a hierarchy to a JSON file, creating parent directories if needed.
pub fn save(path: &Path, hierarchy: &ClassHierarchy) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let json = schema::to_json(hierarchy)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write hierarchy to {}", path.display()))?;

    Ok(())
}
