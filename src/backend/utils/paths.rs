//! Path utilities.

use std::path::PathBuf;

use anyhow::Result;

/// Name of the per-user application directory.
const APP_DIR: &str = "SplinxAdmin";

/// File holding the durable session keys.
const STORAGE_FILE: &str = "storage.json";

/// File holding the user-editable configuration.
const CONFIG_FILE: &str = "config.json";

/// Get the base application directory (`SplinxAdmin`).
#[inline]
pub fn get_app_dir() -> Result<PathBuf> {
    let base_dir = match std::env::consts::OS {
        "windows" => std::env::var("APPDATA")
            .ok()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("Could not determine AppData directory"))?,
        "macos" => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
        _ => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
    };
    Ok(base_dir.join(APP_DIR))
}

/// Path of the durable storage file, falling back to the working directory.
pub fn get_storage_path() -> PathBuf {
    get_app_dir()
        .unwrap_or_else(|_| PathBuf::from(APP_DIR))
        .join(STORAGE_FILE)
}

/// Path of the configuration file, falling back to the working directory.
pub fn get_config_path() -> PathBuf {
    get_app_dir()
        .unwrap_or_else(|_| PathBuf::from(APP_DIR))
        .join(CONFIG_FILE)
}
