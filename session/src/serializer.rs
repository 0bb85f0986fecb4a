//! Grid file persistence.

use crate::{atomic, error::SerializationError};
use log::debug;
use raster::{Grid, GridMode, RasterError};
use std::path::Path;

/// Atomically writes `grid` to `path`.
///
/// Whatever was at `path` before survives a failed write.
pub fn save(grid: &Grid, path: &Path) -> Result<(), SerializationError> {
    debug!("writing {grid:?} to {path:?}");
    atomic::write(path, |wtr| Ok(grid.write_to(wtr)?))
}

/// Opens the grid file at `path`.
pub fn open(path: &Path, mode: GridMode) -> Result<Grid, RasterError> {
    debug!("opening {path:?} ({mode:?})");
    Grid::open(path, mode)
}
