//! CLI commands

pub mod host;
pub mod list;
pub mod mode;
pub mod positions;
pub mod reference;
pub mod settings;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{self, Settings};
use crate::host::Host;
use crate::session::Session;
use crate::storage::PositionStore;

/// Everything a command needs, loaded once per invocation
pub struct Env<'a> {
    pub root: PathBuf,
    pub store: PositionStore,
    pub settings: Settings,
    pub session: Session,
    pub host: &'a dyn Host,
}

impl<'a> Env<'a> {
    pub fn load(root: PathBuf, host: &'a dyn Host) -> Result<Self> {
        let settings = Settings::load(&root)?;
        let session = Session::load(&config::data_dir(&root))?;
        Ok(Self {
            store: PositionStore::open(&root),
            root,
            settings,
            session,
            host,
        })
    }
}
