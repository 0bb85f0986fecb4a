//! # Session state
//!
//! `session` snapshots the named values of an analysis run to a
//! storage directory and restores them in a later run, so a long
//! pipeline can be split into stages that each pick up where the
//! previous one stopped.
//!
//! Grids are written one file per value in the `.grd` format of the
//! [`raster`] crate. Every other value goes into a single gzipped JSON
//! archive alongside the list of stored grids.

mod archive;
mod atomic;
mod config;
mod error;
mod serializer;
mod session;
mod store;
mod table;
mod value;

#[cfg(test)]
mod fixtures;

pub use crate::{
    archive::{GridEntry, Manifest},
    config::StoreConfig,
    error::{SerializationError, StoreError, TableError},
    session::Session,
    store::{LoadReport, SaveReport, Store, StoreBuilder, DEFAULT_ARCHIVE_NAME},
    table::{Column, ColumnData, Table},
    value::{classify, Kind, Plain, Real, Value},
};
pub use raster;
