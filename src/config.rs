//! Storage locations and user settings

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::storage::position_store::DATA_DIR;
use crate::storage::Relativity;

/// Environment variable overriding the storage root
pub const ROOT_ENV: &str = "MOUSE_STORAGE_ROOT";

const APP_DIR: &str = "mouse-storage";
const SETTINGS_FILE: &str = "settings.json";

/// Get the storage root
///
/// Order: explicit path, `$MOUSE_STORAGE_ROOT`, then the platform data directory
/// - macOS: ~/Library/Application Support/mouse-storage/
/// - Linux: ~/.local/share/mouse-storage/
/// - Windows: %APPDATA%/mouse-storage/
pub fn storage_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root);
    }
    if let Some(root) = std::env::var_os(ROOT_ENV) {
        return Ok(PathBuf::from(root));
    }
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join(APP_DIR))
}

/// Directory for the reference point and session state
pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// Settings consumed by the command layer when building contexts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store positions for the active application only
    pub application_specific: bool,

    /// If not empty, stored positions require this text in the window title
    pub title: String,

    /// Mode used when none is set manually
    pub default_mode: String,

    /// Mode required by stored positions (falls back to `default_mode`)
    pub required_mode: String,

    /// Frame new positions are stored in
    pub relativity: Relativity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            application_specific: true,
            title: String::new(),
            default_mode: String::new(),
            required_mode: String::new(),
            relativity: Relativity::Absolute,
        }
    }
}

impl Settings {
    /// Load settings from the root, or defaults if there is no settings file
    pub fn load(root: &Path) -> Result<Self> {
        let path = settings_path(root);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create: {}", root.display()))?;
        let path = settings_path(root);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("Failed to write: {}", path.display()))
    }

    pub fn required_mode(&self) -> &str {
        if self.required_mode.is_empty() {
            &self.default_mode
        } else {
            &self.required_mode
        }
    }

    /// Set one setting from its command line spelling
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "application-specific" => {
                self.application_specific = value
                    .parse::<bool>()
                    .with_context(|| format!("Expected true or false, got {value:?}"))?;
            }
            "title" => self.title = value.to_string(),
            "default-mode" => self.default_mode = value.to_string(),
            "required-mode" => self.required_mode = value.to_string(),
            "relativity" => {
                self.relativity = value
                    .to_ascii_uppercase()
                    .parse::<Relativity>()
                    .context("Relativity must be ABSOLUTE, WINDOW or MOUSE")?;
            }
            other => bail!(
                "Unknown setting {other:?}. Use application-specific, title, default-mode, required-mode or relativity"
            ),
        }
        Ok(())
    }
}
