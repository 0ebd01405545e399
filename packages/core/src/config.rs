//! Configuration for backlink synchronization and note atomizing
//!
//! Both configs are plain serde structs with defaults, so a host can embed them in its own
//! settings file. [`AtomizerConfig::from_json_file`] loads the combined form used by the dev
//! tools.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest accepted connections section name
const MAX_SECTION_NAME_LENGTH: usize = 200;

/// Settings for [`EdgeSynchronizer`](crate::sync::EdgeSynchronizer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Name of the `## ` section that holds backlink bullets
    pub section_name: String,

    /// Text inserted between `- ` and the link in the `fromNode` document
    pub outbound_marker: String,

    /// Text inserted between `- ` and the link in the `toNode` document
    pub inbound_marker: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            section_name: "Connections".to_string(),
            outbound_marker: String::new(),
            inbound_marker: String::new(),
        }
    }
}

impl SyncConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let name = self.section_name.trim();
        if name.is_empty() {
            return Err("section_name cannot be empty".to_string());
        }

        if name != self.section_name {
            return Err("section_name cannot start or end with whitespace".to_string());
        }

        if self.section_name.contains('\n') {
            return Err("section_name must be a single line".to_string());
        }

        if self.section_name.len() > MAX_SECTION_NAME_LENGTH {
            return Err(format!(
                "section_name cannot exceed {} characters",
                MAX_SECTION_NAME_LENGTH
            ));
        }

        for marker in [&self.outbound_marker, &self.inbound_marker] {
            if marker.contains('\n') || marker.contains("[[") {
                return Err("markers cannot contain newlines or wiki links".to_string());
            }
        }

        Ok(())
    }
}

/// Settings for [`NoteAtomizer`](crate::atomize::NoteAtomizer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtomizeConfig {
    /// Folder for new notes; `None` places them next to the source document
    pub notes_folder: Option<String>,

    /// Create `notes_folder` when it does not exist instead of failing
    pub create_missing_folder: bool,

    /// Width of canvas nodes created for new notes
    pub node_width: i64,

    /// Height of canvas nodes created for new notes
    pub node_height: i64,

    /// Spacing between created canvas nodes
    pub node_gap: i64,
}

impl Default for AtomizeConfig {
    fn default() -> Self {
        Self {
            notes_folder: None,
            create_missing_folder: true,
            node_width: 400,
            node_height: 400,
            node_gap: 50,
        }
    }
}

impl AtomizeConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.node_width <= 0 || self.node_height <= 0 {
            return Err("node_width and node_height must be greater than 0".to_string());
        }

        if self.node_gap < 0 {
            return Err("node_gap cannot be negative".to_string());
        }

        if let Some(folder) = &self.notes_folder {
            if folder.split('/').any(|part| part == "..") {
                return Err("notes_folder cannot leave the vault".to_string());
            }
        }

        Ok(())
    }
}

/// Combined configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtomizerConfig {
    pub sync: SyncConfig,
    pub atomize: AtomizeConfig,
}

impl AtomizerConfig {
    /// Load and validate a JSON config file; missing keys fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config JSON in {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Validate both sections
    pub fn validate(&self) -> Result<(), String> {
        self.sync.validate()?;
        self.atomize.validate()
    }
}
