//! The position storage engine
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/positions/<name>/<n>.txt    one record per file
//! <root>/data/reference point        origin of the reference point frame
//! ```
//!
//! Within one name directory there is at most one record per distinct
//! context. New records take the lowest unused `<n>.txt` slot.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{Result, StoreError};
use super::reference_point::ReferencePointStore;
use super::relativity::FrameSource;
use super::{Context, Position, Record, Relativity};
use crate::host::{Host, HostError};

/// Directory under the root holding one directory per name
pub const POSITIONS_DIR: &str = "positions";
/// Directory under the root holding the reference point
pub const DATA_DIR: &str = "data";

const RECORD_EXTENSION: &str = ".txt";

/// A record together with the file it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub path: PathBuf,
    pub record: Record,
}

/// Named, context-qualified position storage on disk
#[derive(Debug, Clone)]
pub struct PositionStore {
    positions_dir: PathBuf,
    reference: ReferencePointStore,
}

/// Frame origins backed by the host and the reference point file
struct HostFrames<'a> {
    host: &'a dyn Host,
    reference: &'a ReferencePointStore,
}

impl FrameSource for HostFrames<'_> {
    fn window_origin(&self) -> Result<Position> {
        self.host.active_window()?.top_left.ok_or_else(|| {
            StoreError::Host(HostError("active window origin unknown".to_string()))
        })
    }

    fn reference_point(&self) -> Result<Position> {
        self.reference.get()
    }
}

impl PositionStore {
    pub fn open(root: &Path) -> Self {
        Self {
            positions_dir: root.join(POSITIONS_DIR),
            reference: ReferencePointStore::new(&root.join(DATA_DIR)),
        }
    }

    pub fn positions_dir(&self) -> &Path {
        &self.positions_dir
    }

    pub fn reference_point(&self) -> &ReferencePointStore {
        &self.reference
    }

    /// Directory holding the records of `name`
    ///
    /// A name must be a single plain path component.
    pub fn name_directory(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.positions_dir.join(name)),
            _ => Err(StoreError::InvalidName(name.to_string())),
        }
    }

    /// Store a new record; fails if one with an equal context already exists
    pub fn store(
        &self,
        name: &str,
        context: &Context,
        position: Position,
        relativity: Relativity,
    ) -> Result<PathBuf> {
        let dir = self.name_directory(name)?;
        fs::create_dir_all(&dir).map_err(|e| StoreError::io("create directory", &dir, e))?;

        if self.find_exact(name, context)?.is_some() {
            return Err(StoreError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let path = allocate_slot(&dir)?;
        Record::new(position, context.clone(), relativity).write(&path)?;
        info!(
            name,
            path = %path.display(),
            %context,
            %position,
            %relativity,
            "stored position"
        );
        Ok(path)
    }

    /// Overwrite the record stored under exactly `context`
    pub fn update(
        &self,
        name: &str,
        context: &Context,
        position: Position,
        relativity: Relativity,
    ) -> Result<PathBuf> {
        let found = self
            .find_exact(name, context)?
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;

        Record::new(position, context.clone(), relativity).write(&found.path)?;
        info!(
            name,
            path = %found.path.display(),
            %position,
            %relativity,
            "updated position"
        );
        Ok(found.path)
    }

    /// Delete the best matching record for `context`
    pub fn remove(&self, name: &str, context: &Context) -> Result<PathBuf> {
        let found = self
            .best_match(name, context)?
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;

        self.remove_record_file(&found.path)?;
        info!(name, path = %found.path.display(), "removed position");
        Ok(found.path)
    }

    /// Delete a record file, refusing anything not directly inside a name directory
    pub fn remove_record_file(&self, path: &Path) -> Result<()> {
        let inside = path.parent().and_then(Path::parent) == Some(self.positions_dir.as_path());
        if !inside {
            warn!(
                path = %path.display(),
                "refusing to remove a file outside the position storage"
            );
            return Err(StoreError::InvalidDeleteTarget(path.to_path_buf()));
        }

        fs::remove_file(path).map_err(|e| StoreError::io("remove record", path, e))
    }

    /// The record of `name` whose context equals `context`
    pub fn find_exact(&self, name: &str, context: &Context) -> Result<Option<StoredRecord>> {
        let dir = self.name_directory(name)?;
        Ok(scan(&dir)?
            .into_iter()
            .find(|stored| stored.record.context == *context))
    }

    /// The most specific record of `name` whose context matches `context`
    ///
    /// Files are visited in slot order and the first record with the top
    /// specificity wins. Unreadable records are skipped.
    pub fn best_match(&self, name: &str, context: &Context) -> Result<Option<StoredRecord>> {
        let dir = self.name_directory(name)?;

        let mut best: Option<(u32, StoredRecord)> = None;
        for stored in scan(&dir)? {
            if !stored.record.context.matches(context) {
                continue;
            }
            let specificity = stored.record.context.specificity();
            if best.as_ref().map_or(true, |(top, _)| specificity > *top) {
                best = Some((specificity, stored));
            }
        }

        if let Some((specificity, stored)) = &best {
            debug!(
                name,
                path = %stored.path.display(),
                specificity,
                "best match"
            );
        }
        Ok(best.map(|(_, stored)| stored))
    }

    /// All readable records of `name` in slot order
    pub fn records(&self, name: &str) -> Result<Vec<StoredRecord>> {
        scan(&self.name_directory(name)?)
    }

    /// Every stored name, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        if !self.positions_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.positions_dir)
            .map_err(|e| StoreError::io("read directory", &self.positions_dir, e))?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Convert a record's stored position to absolute coordinates
    ///
    /// Uses the relativity recorded in the record, not the current setting.
    pub fn resolve_for_read(&self, record: &Record, host: &dyn Host) -> Result<Position> {
        let position = record.position.ok_or(StoreError::MissingPosition)?;
        record.relativity.to_absolute(position, &self.frames(host))
    }

    /// Convert an absolute position into the frame it will be stored in
    pub fn resolve_for_write(
        &self,
        absolute: Position,
        relativity: Relativity,
        host: &dyn Host,
    ) -> Result<Position> {
        relativity.from_absolute(absolute, &self.frames(host))
    }

    fn frames<'a>(&'a self, host: &'a dyn Host) -> HostFrames<'a> {
        HostFrames {
            host,
            reference: &self.reference,
        }
    }
}

/// Record files of a name directory in slot order
///
/// Numbered slots come first in numeric order, then any other file names
/// lexically. A missing directory has no records.
fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| StoreError::io("read directory", dir, e))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();

    files.sort_by_cached_key(|path| {
        let slot = slot_number(path);
        (slot.is_none(), slot, path.file_name().map(OsStr::to_os_string))
    });
    Ok(files)
}

fn slot_number(path: &Path) -> Option<u64> {
    path.file_name()?
        .to_str()?
        .strip_suffix(RECORD_EXTENSION)?
        .parse()
        .ok()
}

fn scan(dir: &Path) -> Result<Vec<StoredRecord>> {
    let mut records = Vec::new();
    for path in record_files(dir)? {
        match Record::read(&path) {
            Ok(record) => records.push(StoredRecord { path, record }),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable record"),
        }
    }
    Ok(records)
}

/// Path of the lowest `<n>.txt` not present in `dir`
fn allocate_slot(dir: &Path) -> Result<PathBuf> {
    let taken: HashSet<OsString> = fs::read_dir(dir)
        .map_err(|e| StoreError::io("read directory", dir, e))?
        .flatten()
        .map(|entry| entry.file_name())
        .collect();

    let mut slot = 0u64;
    loop {
        let file_name = format!("{slot}{RECORD_EXTENSION}");
        if !taken.contains(OsStr::new(&file_name)) {
            return Ok(dir.join(file_name));
        }
        slot += 1;
    }
}
