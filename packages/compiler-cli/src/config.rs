//! Walker configuration
//!
//! Loaded from an optional `phpx.json` next to the project; every field has
//! a default so the file is only needed to override the conventions.

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhpxConfig {
    /// Extension of the template files to pick up.
    pub extension_in: String,
    /// Extension of the generated PHP files.
    pub extension_out: String,
    /// Print compiler tracing output.
    pub debug: bool,
}

impl Default for PhpxConfig {
    fn default() -> Self {
        PhpxConfig {
            extension_in: "tag".to_string(),
            extension_out: "php".to_string(),
            debug: false,
        }
    }
}

impl PhpxConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PhpxConfig = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Loads the explicit config path when given, otherwise `phpx.json` in
    /// the working directory when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new("phpx.json");

                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
