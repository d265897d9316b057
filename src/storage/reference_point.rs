//! The persisted origin of the reference point frame

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::{Result, StoreError};
use super::Position;

/// File name of the reference point inside the data directory
pub const REFERENCE_POINT_FILE: &str = "reference point";

/// A single stored position, created as `(0, 0)` on first access
#[derive(Debug, Clone)]
pub struct ReferencePointStore {
    path: PathBuf,
}

impl ReferencePointStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(REFERENCE_POINT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<Position> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "initializing reference point");
            self.set(Position::ORIGIN)?;
        }

        let text = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::io("read reference point", &self.path, e))?;
        let first_line = text.lines().next().unwrap_or_default();
        Ok(first_line.parse()?)
    }

    pub fn set(&self, position: Position) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::io("create data directory", parent, e))?;
        }
        fs::write(&self.path, position.to_string())
            .map_err(|e| StoreError::io("write reference point", &self.path, e))?;
        info!(%position, "reference point updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazily_initialized_to_origin() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = ReferencePointStore::new(&data_dir);

        assert!(!store.path().exists());
        assert_eq!(store.get().unwrap(), Position::ORIGIN);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "(0, 0)");
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReferencePointStore::new(dir.path());

        store.set(Position::new(640, -12)).unwrap();
        assert_eq!(store.get().unwrap(), Position::new(640, -12));
        assert_eq!(
            ReferencePointStore::new(dir.path()).get().unwrap(),
            Position::new(640, -12)
        );
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReferencePointStore::new(dir.path());
        fs::write(store.path(), "somewhere").unwrap();

        assert!(matches!(store.get(), Err(StoreError::Parse(_))));
    }
}
