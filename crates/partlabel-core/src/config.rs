// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print bridge configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::PageGeometry;
use crate::error::{LabelError, Result};

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Method channel the app talks to.
pub const DEFAULT_CHANNEL: &str = "com.example.autoparts/print";

/// Where rendered labels go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceConfig {
    /// The operating system's print dialog.
    Native,
    /// A network label printer reached over IPP.
    Ipp { uri: String },
    /// Write each label as a PDF into a directory.
    PdfDirectory { path: PathBuf },
}

/// Persistent print bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Method channel name the handler registers under.
    pub channel_name: String,
    /// Label stock geometry.
    pub geometry: PageGeometry,
    /// Output surface.
    pub surface: SurfaceConfig,
    /// Job title shown in the print dialog and printer queue.
    pub job_title: String,
    /// Reject template indices outside 0–4 instead of printing a blank label.
    pub strict_template_selector: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL.to_owned(),
            geometry: PageGeometry::default(),
            surface: SurfaceConfig::Native,
            job_title: "Barcode label".to_owned(),
            strict_template_selector: false,
        }
    }
}

impl PrintConfig {
    /// Load `config.json` from `data_dir`, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                }
                Self::default()
            }
        }
    }

    /// Load a config from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| LabelError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| LabelError::Config(format!("{}: {e}", path.display())))
    }

    /// Persist to `config.json` in `data_dir`.
    pub fn persist(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}
