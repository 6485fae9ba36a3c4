//! Hierarchy file format: a versioned JSON document of class definitions.
//!
//! A file is accepted only if its version matches and its classes form a
//! well-formed single-inheritance forest (see [`ClassHierarchy::validate`]).

use crate::hierarchy::{CURRENT_VERSION, ClassHierarchy};
use anyhow::{Context, Result};

/// Check that a parsed hierarchy can be resolved against.
pub fn check(hierarchy: &ClassHierarchy) -> Result<()> {
    anyhow::ensure!(
        hierarchy.version == CURRENT_VERSION,
        "unsupported hierarchy version {} (this build reads {})",
        hierarchy.version,
        CURRENT_VERSION
    );
    hierarchy
        .validate()
        .with_context(|| format!("malformed hierarchy of {} classes", hierarchy.len()))
}

pub fn to_json(hierarchy: &ClassHierarchy) -> Result<String> {
    serde_json::to_string_pretty(hierarchy).context("failed to serialize hierarchy to JSON")
}

/// Parse a hierarchy document and [`check`] it.
pub fn from_json(json: &str) -> Result<ClassHierarchy> {
    let hierarchy: ClassHierarchy =
        serde_json::from_str(json).context("hierarchy JSON does not match the class schema")?;
    check(&hierarchy)?;
    Ok(hierarchy)
}
