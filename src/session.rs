//! Per-user session state and context construction
//!
//! The manually set mode lives here instead of in process-wide state. It is
//! kept in `<root>/data/session.json` so consecutive invocations share it.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::host::ActiveWindow;
use crate::storage::Context;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Overrides the default mode for lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_mode: Option<String>,
}

impl Session {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SESSION_FILE)
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create: {}", data_dir.display()))?;
        let path = Self::path(data_dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write: {}", path.display()))
    }

    pub fn set_mode(&mut self, mode: &str) {
        self.manual_mode = Some(mode.to_string()).filter(|m| !m.is_empty());
    }

    pub fn clear_mode(&mut self) {
        self.manual_mode = None;
    }

    /// The mode the user is currently in
    pub fn lookup_mode<'a>(&'a self, settings: &'a Settings) -> &'a str {
        match self.manual_mode.as_deref() {
            Some(mode) if !mode.is_empty() => mode,
            _ => &settings.default_mode,
        }
    }

    /// The context a stored position is looked up with
    pub fn lookup_context(&self, settings: &Settings, window: &ActiveWindow) -> Context {
        Context::new(
            window.app.as_str(),
            window.title.as_str(),
            self.lookup_mode(settings),
        )
    }
}

/// The context a new or updated position is stored under
pub fn storage_context(settings: &Settings, window: &ActiveWindow) -> Context {
    let app = if settings.application_specific {
        window.app.as_str()
    } else {
        ""
    };
    let title_part = if settings.application_specific {
        settings.title.as_str()
    } else {
        ""
    };
    Context::new(app, title_part, settings.required_mode())
}
