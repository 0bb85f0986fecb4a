//! The session archive: every plain value plus the manifest of stored
//! grids, as gzipped JSON.
//!
//! Maps are sorted and the gzip header carries no timestamp, so an
//! unchanged session always produces the same bytes.

use crate::{atomic, error::SerializationError, value::Plain};
use flate2::{bufread::GzDecoder, write::GzEncoder, Compression};
use raster::Grid;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

pub const ARCHIVE_VERSION: u32 = 1;

/// Describes one grid recorded in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEntry {
    pub name: String,
    pub crs: String,
    pub bands: usize,
    pub cols: usize,
    pub rows: usize,
}

impl GridEntry {
    pub fn new(name: &str, grid: &Grid) -> Self {
        let (cols, rows) = grid.dimensions();
        Self {
            name: name.to_owned(),
            crs: grid.crs().to_owned(),
            bands: grid.band_count(),
            cols,
            rows,
        }
    }
}

/// What a storage directory holds, without opening any grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub grids: Vec<GridEntry>,
    /// Plain value names and their variant.
    pub plain: BTreeMap<String, &'static str>,
}

/// Borrowed form written by `Store::save`.
#[derive(Serialize)]
pub(crate) struct ArchiveRef<'a> {
    pub version: u32,
    pub grids: Vec<GridEntry>,
    pub plain: BTreeMap<&'a str, &'a Plain>,
}

/// Owned form read back by `Store::load`.
#[derive(Deserialize)]
pub(crate) struct Archive {
    pub version: u32,
    pub grids: Vec<GridEntry>,
    pub plain: BTreeMap<String, Plain>,
}

impl<'a> ArchiveRef<'a> {
    pub fn new() -> Self {
        Self {
            version: ARCHIVE_VERSION,
            grids: Vec::new(),
            plain: BTreeMap::new(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), SerializationError> {
        atomic::write(path, |wtr| {
            let mut gz = GzEncoder::new(wtr, Compression::default());
            serde_json::to_writer(&mut gz, self)?;
            gz.finish()?;
            Ok(())
        })
    }
}

impl Archive {
    pub fn read(path: &Path) -> Result<Self, SerializationError> {
        let file = File::open(path)?;
        let rdr = GzDecoder::new(BufReader::new(file));
        let archive: Self = serde_json::from_reader(rdr)?;
        if archive.version != ARCHIVE_VERSION {
            return Err(SerializationError::Version(archive.version));
        }
        Ok(archive)
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            grids: self.grids.clone(),
            plain: self
                .plain
                .iter()
                .map(|(name, value)| (name.clone(), value.type_name()))
                .collect(),
        }
    }
}
