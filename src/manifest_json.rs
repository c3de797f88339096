//! Icon section of a WebExtension `manifest.json`
//!
//! Rendered icons are usually referenced twice in an extension manifest: once
//! under the top-level `icons` key and once as the toolbar button's
//! `action.default_icon`. This module writes both maps into a fragment that
//! can be merged into the manifest by hand or by a build script.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the fragment written next to the icons.
pub const MANIFEST_FILE_NAME: &str = "manifest-icons.json";

/// Root of the manifest fragment
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestIcons {
    /// Size in pixels to icon path, relative to the extension root
    pub icons: BTreeMap<u32, String>,

    /// Toolbar button icons
    pub action: ActionIcons,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionIcons {
    pub default_icon: BTreeMap<u32, String>,
}

impl ManifestIcons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one rendered icon under both the `icons` and `action` maps.
    pub fn add_icon(&mut self, size: u32, path: String) {
        self.action.default_icon.insert(size, path.clone());
        self.icons.insert(size, path);
    }

    /// Serialize the fragment into `dir` and return the path written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let manifest_json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest icons")?;

        std::fs::write(&manifest_path, manifest_json)
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        Ok(manifest_path)
    }
}
