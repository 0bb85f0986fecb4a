use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("not a grid file (bad magic)")]
    Magic,

    #[error("unsupported grid format version {0}")]
    Version(u8),

    #[error("invalid grid header, {0}")]
    Header(&'static str),

    #[error("grid file is {actual} bytes, header describes {expected}")]
    Length { expected: u64, actual: u64 },

    #[error("invalid grid shape, {0}")]
    Shape(&'static str),
}
