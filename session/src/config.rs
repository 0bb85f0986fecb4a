//! File based store configuration.

use crate::{
    error::{SerializationError, StoreError},
    store::Store,
};
use raster::GridMode;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// JSON description of a [`Store`].
///
/// ```json
/// {
///   "dir": "state",
///   "write_once": ["silwood_aerial"],
///   "mmap": true
/// }
/// ```
///
/// A relative `dir` is resolved against the directory containing the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub dir: PathBuf,

    #[serde(default)]
    pub write_once: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_name: Option<String>,

    /// Memory map restored grids instead of reading them into memory.
    #[serde(default)]
    pub mmap: bool,
}

impl StoreConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let mk_err = |source: SerializationError| StoreError::Config {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(|e| mk_err(e.into()))?;
        let mut config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| mk_err(e.into()))?;
        if config.dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.dir = parent.join(&config.dir);
            }
        }
        Ok(config)
    }

    pub fn into_store(self) -> Result<Store, StoreError> {
        let mut builder = Store::builder()
            .dir(self.dir)
            .write_once(self.write_once)
            .grid_mode(if self.mmap {
                GridMode::MemMap
            } else {
                GridMode::InMem
            });
        if let Some(archive_name) = self.archive_name {
            builder = builder.archive_name(archive_name);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use crate::StoreError;
    use raster::GridMode;
    use std::fs;

    #[test]
    fn test_from_path_resolves_relative_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stash.json");
        fs::write(
            &path,
            r#"{"dir": "state", "write_once": ["silwood_aerial"], "mmap": true}"#,
        )
        .unwrap();
        let config = StoreConfig::from_path(&path).unwrap();
        assert_eq!(config.dir, dir.path().join("state"));

        let store = config.into_store().unwrap();
        assert_eq!(store.dir(), dir.path().join("state"));
        assert_eq!(store.grid_mode(), GridMode::MemMap);
        assert!(store.is_write_once("silwood_aerial"));
        assert_eq!(
            store.archive_path(),
            dir.path().join("state").join("session.json.gz")
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stash.json");
        fs::write(&path, r#"{"dir": "state", "writeonce": []}"#).unwrap();
        assert!(matches!(
            StoreConfig::from_path(&path),
            Err(StoreError::Config { .. })
        ));
    }
}
