//! Saving a session to, and restoring it from, a storage directory.

use crate::{
    archive::{Archive, ArchiveRef, GridEntry, Manifest},
    error::{SerializationError, StoreError},
    serializer,
    session::Session,
    value::Value,
};
use log::{debug, info, warn};
use raster::{GridMode, EXTENSION};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Default file name of the archive holding plain values.
pub const DEFAULT_ARCHIVE_NAME: &str = "session.json.gz";

/// A storage directory and the policy for writing to it.
///
/// A directory holds one `<name>.grd` file per grid plus a single
/// archive containing every plain value and the list of stored grids.
/// Only one process may save to or load from a directory at a time.
#[derive(Debug, Clone)]
pub struct Store {
    /// Where grid files and the archive live.
    dir: PathBuf,

    /// Grids which are never rewritten once their file exists.
    write_once: BTreeSet<String>,

    archive_name: String,

    /// How restored grids are backed.
    grid_mode: GridMode,
}

/// What [`Store::save`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Grids written to disk.
    pub written: Vec<String>,

    /// Write-once grids left as they were.
    pub skipped: Vec<String>,

    /// Plain values written to the archive.
    pub plain: Vec<String>,
}

/// What [`Store::load`] bound into the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub grids: Vec<String>,
    pub plain: Vec<String>,
}

impl Store {
    /// Returns a store over `dir` with default settings.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_once: BTreeSet::new(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_owned(),
            grid_mode: GridMode::default(),
        }
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn grid_mode(&self) -> GridMode {
        self.grid_mode
    }

    /// Returns this store, restoring grids in `mode`.
    pub fn with_grid_mode(mut self, mode: GridMode) -> Self {
        self.grid_mode = mode;
        self
    }

    pub fn is_write_once(&self, name: &str) -> bool {
        self.write_once.contains(name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(&self.archive_name)
    }

    pub fn grid_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    /// Writes every value in `session` to the storage directory.
    ///
    /// Each grid goes to its own file unless it is write-once and its
    /// file already exists. All plain values, together with the list
    /// of grids, then replace the archive. Every file is replaced
    /// atomically, but there is no transaction across files: a crash
    /// after some grids were written leaves the previous archive in
    /// place.
    pub fn save(&self, session: &Session) -> Result<SaveReport, StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::StorageDirUnavailable(self.dir.clone(), e))?;

        for (name, value) in session {
            if let Value::Grid(_) = value {
                check_name(name)?;
            }
        }

        let mut report = SaveReport::default();
        let mut archive = ArchiveRef::new();

        for (name, value) in session {
            match value {
                Value::Grid(grid) => {
                    let path = self.grid_path(name);
                    if self.is_write_once(name) && path.exists() {
                        debug!("keeping write-once grid {name}, {path:?} exists");
                        // Describe the kept file, not the session value.
                        let kept = serializer::open(&path, GridMode::MemMap)
                            .map_err(|source| StoreError::CorruptGridFile { path, source })?;
                        archive.grids.push(GridEntry::new(name, &kept));
                        report.skipped.push(name.clone());
                    } else {
                        serializer::save(grid, &path)
                            .map_err(|source| StoreError::Serialization { path, source })?;
                        archive.grids.push(GridEntry::new(name, grid));
                        report.written.push(name.clone());
                    }
                }
                Value::Plain(plain) => {
                    archive.plain.insert(name, plain);
                    report.plain.push(name.clone());
                }
            }
        }

        let archive_path = self.archive_path();
        archive
            .write(&archive_path)
            .map_err(|source| StoreError::Serialization {
                path: archive_path,
                source,
            })?;

        info!(
            "saved {} grids ({} kept) and {} plain values to {:?}",
            report.written.len(),
            report.skipped.len(),
            report.plain.len(),
            self.dir
        );
        Ok(report)
    }

    /// Binds every stored value into `session`, replacing values of
    /// the same name.
    ///
    /// Nothing is bound unless the archive and every grid it lists
    /// open successfully.
    pub fn load(&self, session: &mut Session) -> Result<LoadReport, StoreError> {
        let archive = self.read_archive()?;
        let mut report = LoadReport::default();
        let mut staged: BTreeMap<String, Value> = BTreeMap::new();

        for (name, plain) in archive.plain {
            report.plain.push(name.clone());
            staged.insert(name, Value::Plain(plain));
        }

        for entry in &archive.grids {
            check_name(&entry.name)?;
            let path = self.grid_path(&entry.name);
            let grid = serializer::open(&path, self.grid_mode)
                .map_err(|source| StoreError::CorruptGridFile { path, source })?;
            if GridEntry::new(&entry.name, &grid) != *entry {
                warn!(
                    "grid {} does not match the archive, it was likely saved by a later run",
                    entry.name
                );
            }
            report.grids.push(entry.name.clone());
            staged.insert(entry.name.clone(), Value::Grid(grid));
        }

        self.log_untracked(&archive.grids);
        session.extend(staged);

        info!(
            "loaded {} grids and {} plain values from {:?}",
            report.grids.len(),
            report.plain.len(),
            self.dir
        );
        Ok(report)
    }

    /// Returns the names and shapes of everything in the storage
    /// directory without opening grid files.
    pub fn manifest(&self) -> Result<Manifest, StoreError> {
        Ok(self.read_archive()?.manifest())
    }
}

/// Private API.
impl Store {
    fn read_archive(&self) -> Result<Archive, StoreError> {
        let path = self.archive_path();
        match Archive::read(&path) {
            Ok(archive) => Ok(archive),
            Err(SerializationError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::MissingArchive(path))
            }
            Err(source) => Err(StoreError::CorruptArchive { path, source }),
        }
    }

    /// Logs grid files the archive doesn't know about.
    fn log_untracked(&self, grids: &[GridEntry]) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        for path in entries.filter_map(|entry| entry.ok().map(|entry| entry.path())) {
            if Some(EXTENSION) != path.extension().and_then(std::ffi::OsStr::to_str) {
                continue;
            }
            let stem = path.file_stem().and_then(std::ffi::OsStr::to_str);
            if !grids.iter().any(|entry| Some(entry.name.as_str()) == stem) {
                debug!("ignoring untracked grid file {path:?}");
            }
        }
    }
}

/// Checks that `name` can be used as a file stem inside the storage
/// directory.
fn check_name(name: &str) -> Result<(), StoreError> {
    let usable = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if usable {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_owned()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    dir: Option<PathBuf>,
    write_once: BTreeSet<String>,
    archive_name: Option<String>,
    grid_mode: GridMode,
}

impl StoreBuilder {
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Adds names whose grid file is never rewritten once it exists.
    pub fn write_once<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write_once.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = Some(name.into());
        self
    }

    pub fn grid_mode(mut self, mode: GridMode) -> Self {
        self.grid_mode = mode;
        self
    }

    pub fn build(self) -> Result<Store, StoreError> {
        let dir = self.dir.ok_or(StoreError::Builder("dir"))?;
        let archive_name = self
            .archive_name
            .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_owned());
        check_name(&archive_name)?;
        // Must not collide with a grid file or a temporary file.
        let extension = Path::new(&archive_name)
            .extension()
            .and_then(std::ffi::OsStr::to_str);
        if matches!(extension, Some(EXTENSION | "tmp")) {
            return Err(StoreError::InvalidName(archive_name));
        }
        Ok(Store {
            dir,
            write_once: self.write_once,
            archive_name,
            grid_mode: self.grid_mode,
        })
    }
}
