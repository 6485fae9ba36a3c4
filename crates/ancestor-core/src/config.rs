//! Configuration for resolution defaults and hierarchy location.
//!
//! Load order: `.ancestor/config.toml` → environment variables → defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".ancestor";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AncestorConfig {
    pub resolve: ResolveConfig,
    pub hierarchy: HierarchyConfig,
}

/// Resolution defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Only consider classes backed by a storage table when intersecting ancestry.
    pub tables_only: bool,
}

/// Where the hierarchy file lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Hierarchy JSON file. Relative paths resolve against the project root.
    pub path: PathBuf,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            path: Path::new(CONFIG_DIR).join("hierarchy.json"),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    var: &str,
    target: &mut T,
) {
    if let Some(v) = env(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl AncestorConfig {
    /// Load config from `.ancestor/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_with_env(project_root, |var| std::env::var(var).ok())
    }

    /// [`load`](Self::load) with overrides read through `env` instead of the process environment.
    pub fn load_with_env(
        project_root: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override(&env, "ANCESTOR_TABLES_ONLY", &mut config.resolve.tables_only);
        env_override(&env, "ANCESTOR_HIERARCHY", &mut config.hierarchy.path);

        Ok(config)
    }

    /// The hierarchy file path, resolved against `project_root` when relative.
    pub fn hierarchy_path(&self, project_root: &Path) -> PathBuf {
        if self.hierarchy.path.is_absolute() {
            self.hierarchy.path.clone()
        } else {
            project_root.join(&self.hierarchy.path)
        }
    }
}
