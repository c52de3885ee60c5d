// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where partlabel keeps `config.json` and the default PDF output directory.
//
// Lookup order: `PARTLABEL_DATA_DIR` as-is, then `$XDG_DATA_HOME/partlabel`,
// then `$HOME/.local/share/partlabel`, then the system temp directory.

use std::path::PathBuf;

use partlabel_core::error::Result;
use tracing::debug;

/// Overrides every other location when set.
pub const DATA_DIR_ENV: &str = "PARTLABEL_DATA_DIR";

const APP_DIR: &str = "partlabel";

/// Resolve the data directory from the process environment and create it.
pub fn data_dir() -> Result<PathBuf> {
    let dir = resolve(|key| std::env::var(key).ok());
    std::fs::create_dir_all(&dir)?;
    debug!(path = %dir.display(), "data directory ready");
    Ok(dir)
}

/// Resolve the data directory using `env` for variable lookups. Empty values
/// count as unset.
pub fn resolve(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(dir) = var(DATA_DIR_ENV) {
        return dir;
    }
    let base = var("XDG_DATA_HOME")
        .or_else(|| var("HOME").map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}
