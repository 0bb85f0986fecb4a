//! Write-then-rename file replacement.

use crate::error::SerializationError;
use log::warn;
use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Returns the temporary sibling of `path` used while writing it.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

/// Replaces the file at `path` with whatever `write_fn` produces.
///
/// Output goes to [`tmp_path`] first and is only renamed over `path`
/// after `write_fn` succeeded and the data reached the disk. A failed
/// write removes the temporary file and leaves `path` as it was.
pub fn write<F>(path: &Path, write_fn: F) -> Result<(), SerializationError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), SerializationError>,
{
    let tmp = tmp_path(path);
    let result = File::create(&tmp)
        .map_err(SerializationError::from)
        .and_then(|file| {
            let mut wtr = BufWriter::new(file);
            write_fn(&mut wtr)?;
            let file = wtr.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            Ok(())
        })
        .and_then(|()| Ok(fs::rename(&tmp, path)?));

    if result.is_err() && tmp.exists() {
        if let Err(e) = fs::remove_file(&tmp) {
            warn!("failed to remove {tmp:?}: {e}");
        }
    }
    result
}
