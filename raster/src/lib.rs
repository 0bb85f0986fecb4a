//! Multi-band raster grids and the `.grd` file format.
//!
//! A `.grd` file holds exactly one grid and describes itself: shape,
//! extent, spatial reference and band names live in a header ahead of
//! the samples. All integers and floats are little-endian.
//!
//! ```text
//! magic       "SGRD"
//! version     u8
//! cols        u32
//! rows        u32
//! n_bands     u16
//! extent      xmin, ymin, xmax, ymax as f64
//! nodata      u8 flag, f64 value
//! crs         u32 length, UTF-8 bytes
//! band names  n_bands × (u16 length, UTF-8 bytes)
//! samples     n_bands × rows × cols f64, band-major then row-major
//! ```
//!
//! Row 0 is the northernmost row and column 0 the westernmost.

mod error;

pub use crate::error::RasterError;
pub use geo;
use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use geo::geometry::{Coord, Polygon, Rect};
use memmap2::Mmap;
use std::{
    fs::File,
    io::{BufReader, Read, Write},
    mem::size_of,
    path::Path,
};

/// Base floating point type used for coordinates and samples.
pub type C = f64;

/// File extension used for grid files.
pub const EXTENSION: &str = "grd";

const MAGIC: [u8; 4] = *b"SGRD";
const VERSION: u8 = 1;

/// Upper bound on samples preallocated before any are read.
const MAX_PREALLOC: usize = 1 << 20;

/// How to back a grid's samples when opening it from disk.
///
/// Memory mapping avoids reading large, rarely touched base layers
/// into RAM, but the mapping is only valid as long as nobody truncates
/// the file underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    /// Parse samples into memory.
    #[default]
    InMem,

    /// Memory map file contents.
    MemMap,
}

/// A multi-band rectangular array of samples with a spatial reference
/// and extent.
pub struct Grid {
    header: Header,
    samples: SampleStore,
}

enum SampleStore {
    InMem(Box<[C]>),
    MemMap {
        map: Mmap,
        /// Byte offset of the first sample.
        offset: usize,
    },
}

impl SampleStore {
    fn get_unchecked(&self, index: usize) -> C {
        match self {
            Self::InMem(samples) => samples[index],
            Self::MemMap { map, offset } => {
                let start = offset + index * size_of::<C>();
                let mut raw = [0_u8; size_of::<C>()];
                raw.copy_from_slice(&map[start..start + size_of::<C>()]);
                C::from_le_bytes(raw)
            }
        }
    }
}

impl Grid {
    /// Returns a builder for a grid covering `extent` with `(cols,
    /// rows)` cells.
    pub fn builder(extent: Rect<C>, dimensions: (usize, usize)) -> GridBuilder {
        GridBuilder {
            extent,
            dimensions,
            crs: String::new(),
            nodata: None,
            bands: Vec::new(),
        }
    }

    /// Returns a Grid read into memory from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut rdr = BufReader::new(file);
        let header = Header::read(&mut rdr)?;
        header.check_file_len(file_len)?;
        let samples = read_samples(&mut rdr, header.sample_count()?)?;
        Ok(Self {
            header,
            samples: SampleStore::InMem(samples),
        })
    }

    /// Returns a Grid using the memory-mapped file as storage.
    pub fn memmap<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let header = Header::read(&mut BufReader::new(&file))?;
        header.check_file_len(file_len)?;
        let offset = header.encoded_len();
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self {
            header,
            samples: SampleStore::MemMap { map, offset },
        })
    }

    /// Opens the grid at `path` according to `mode`.
    pub fn open<P: AsRef<Path>>(path: P, mode: GridMode) -> Result<Self, RasterError> {
        match mode {
            GridMode::InMem => Self::load(path),
            GridMode::MemMap => Self::memmap(path),
        }
    }

    /// Decodes a grid from an arbitrary reader into memory.
    pub fn read_from<R: Read>(mut rdr: R) -> Result<Self, RasterError> {
        let header = Header::read(&mut rdr)?;
        let samples = read_samples(&mut rdr, header.sample_count()?)?;
        Ok(Self {
            header,
            samples: SampleStore::InMem(samples),
        })
    }

    /// Encodes this grid, header and samples, into `wtr`.
    pub fn write_to<W: Write>(&self, mut wtr: W) -> Result<(), RasterError> {
        self.header.write(&mut wtr)?;
        for index in 0..self.header.sample_count()? {
            wtr.write_f64::<LE>(self.samples.get_unchecked(index))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Returns how this grid's samples are held.
    pub fn mode(&self) -> GridMode {
        match self.samples {
            SampleStore::InMem(_) => GridMode::InMem,
            SampleStore::MemMap { .. } => GridMode::MemMap,
        }
    }

    /// Spatial reference, empty for an unreferenced grid.
    pub fn crs(&self) -> &str {
        &self.header.crs
    }

    pub fn extent(&self) -> Rect<C> {
        self.header.extent
    }

    /// Returns `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.header.cols, self.header.rows)
    }

    pub fn band_count(&self) -> usize {
        self.header.bands.len()
    }

    pub fn band_names(&self) -> &[String] {
        &self.header.bands
    }

    pub fn nodata(&self) -> Option<C> {
        self.header.nodata
    }

    /// Number of cells in a single band.
    pub fn cell_count(&self) -> usize {
        self.header.cols * self.header.rows
    }

    /// Returns `(width, height)` of a single cell in crs units.
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_size(&self) -> (C, C) {
        let extent = self.header.extent;
        (
            extent.width() / self.header.cols as C,
            extent.height() / self.header.rows as C,
        )
    }

    /// Returns the polygon outlining this grid's extent.
    pub fn polygon(&self) -> Polygon<C> {
        self.header.extent.to_polygon()
    }

    /// Returns the sample in `band` at column `x`, row `y`.
    pub fn get(&self, band: usize, (x, y): (usize, usize)) -> Option<C> {
        if band < self.band_count() && x < self.header.cols && y < self.header.rows {
            Some(self.samples.get_unchecked(self.linear_index(band, (x, y))))
        } else {
            None
        }
    }

    /// Returns the sample in `band` for the cell containing `coord`.
    pub fn get_coord(&self, band: usize, coord: Coord<C>) -> Option<C> {
        let (x, y) = self.coord_to_xy(coord)?;
        self.get(band, (x, y))
    }

    /// Returns an iterator over one band's samples in row-major order.
    pub fn band(&self, band: usize) -> Option<impl Iterator<Item = C> + '_> {
        (band < self.band_count()).then(|| {
            let start = band * self.cell_count();
            (start..start + self.cell_count()).map(move |index| self.samples.get_unchecked(index))
        })
    }

    /// Returns the `(min, max)` of `band`, skipping NaN and nodata
    /// samples.
    pub fn band_range(&self, band: usize) -> Option<(C, C)> {
        let nodata = self.header.nodata;
        self.band(band)?
            .filter(|sample| !sample.is_nan() && Some(*sample) != nodata)
            .fold(None, |range, sample| match range {
                None => Some((sample, sample)),
                Some((lo, hi)) => Some((C::min(lo, sample), C::max(hi, sample))),
            })
    }
}

/// Private API.
impl Grid {
    fn linear_index(&self, band: usize, (x, y): (usize, usize)) -> usize {
        band * self.cell_count() + y * self.header.cols + x
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn coord_to_xy(&self, coord: Coord<C>) -> Option<(usize, usize)> {
        let extent = self.header.extent;
        let (cell_w, cell_h) = self.cell_size();
        let x = ((coord.x - extent.min().x) / cell_w).floor();
        let y = ((extent.max().y - coord.y) / cell_h).floor();
        if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
            None
        } else {
            Some((x as usize, y as usize))
        }
    }
}

impl PartialEq for Grid {
    /// Grids are equal when their headers match and every sample
    /// matches, with NaN equal to NaN.
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && (0..self.band_count() * self.cell_count()).all(|index| {
                let (a, b) = (
                    self.samples.get_unchecked(index),
                    other.samples.get_unchecked(index),
                );
                same_sample(a, b)
            })
    }
}

fn same_sample(a: C, b: C) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("crs", &self.header.crs)
            .field("extent", &self.header.extent)
            .field("dimensions", &self.dimensions())
            .field("bands", &self.header.bands)
            .field("nodata", &self.header.nodata)
            .field("mode", &self.mode())
            .finish()
    }
}

pub struct GridBuilder {
    extent: Rect<C>,
    dimensions: (usize, usize),
    crs: String,
    nodata: Option<C>,
    bands: Vec<(String, Vec<C>)>,
}

impl GridBuilder {
    pub fn crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }

    pub fn nodata(mut self, nodata: C) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// Appends a band of `cols * rows` samples in row-major order,
    /// north row first.
    pub fn band(mut self, name: impl Into<String>, samples: Vec<C>) -> Self {
        self.bands.push((name.into(), samples));
        self
    }

    pub fn build(self) -> Result<Grid, RasterError> {
        let (cols, rows) = self.dimensions;
        if cols == 0 || rows == 0 {
            return Err(RasterError::Shape("grid must have at least one cell"));
        }
        if u32::try_from(cols).is_err() || u32::try_from(rows).is_err() {
            return Err(RasterError::Shape("grid dimensions exceed u32"));
        }
        if self.bands.is_empty() {
            return Err(RasterError::Shape("grid must have at least one band"));
        }
        if u16::try_from(self.bands.len()).is_err() {
            return Err(RasterError::Shape("too many bands"));
        }
        if !valid_extent(&self.extent) {
            return Err(RasterError::Shape("extent must have positive finite area"));
        }
        let cell_count = cols * rows;
        if self.bands.iter().any(|(_, samples)| samples.len() != cell_count) {
            return Err(RasterError::Shape("band length does not match dimensions"));
        }

        let mut names = Vec::with_capacity(self.bands.len());
        let mut samples = Vec::with_capacity(self.bands.len() * cell_count);
        for (name, band) in self.bands {
            names.push(name);
            samples.extend(band);
        }

        Ok(Grid {
            header: Header {
                cols,
                rows,
                extent: self.extent,
                nodata: self.nodata,
                crs: self.crs,
                bands: names,
            },
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }
}

#[derive(Debug, Clone)]
struct Header {
    cols: usize,
    rows: usize,
    extent: Rect<C>,
    nodata: Option<C>,
    crs: String,
    bands: Vec<String>,
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        let same_nodata = match (self.nodata, other.nodata) {
            (Some(a), Some(b)) => same_sample(a, b),
            (a, b) => a.is_none() && b.is_none(),
        };
        self.cols == other.cols
            && self.rows == other.rows
            && self.extent == other.extent
            && same_nodata
            && self.crs == other.crs
            && self.bands == other.bands
    }
}

impl Header {
    fn read<R: Read>(rdr: &mut R) -> Result<Self, RasterError> {
        let mut magic = [0_u8; 4];
        rdr.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(RasterError::Magic);
        }
        let version = rdr.read_u8()?;
        if version != VERSION {
            return Err(RasterError::Version(version));
        }

        let cols = rdr.read_u32::<LE>()? as usize;
        let rows = rdr.read_u32::<LE>()? as usize;
        let n_bands = rdr.read_u16::<LE>()?;
        if cols == 0 || rows == 0 || n_bands == 0 {
            return Err(RasterError::Header("empty grid"));
        }

        let extent = {
            let xmin = rdr.read_f64::<LE>()?;
            let ymin = rdr.read_f64::<LE>()?;
            let xmax = rdr.read_f64::<LE>()?;
            let ymax = rdr.read_f64::<LE>()?;
            if !(xmin < xmax && ymin < ymax) {
                return Err(RasterError::Header("degenerate extent"));
            }
            Rect::new(Coord { x: xmin, y: ymin }, Coord { x: xmax, y: ymax })
        };
        if !valid_extent(&extent) {
            return Err(RasterError::Header("degenerate extent"));
        }

        let nodata = {
            let flag = rdr.read_u8()?;
            let value = rdr.read_f64::<LE>()?;
            match flag {
                0 => None,
                1 => Some(value),
                _ => return Err(RasterError::Header("invalid nodata flag")),
            }
        };

        let crs_len = rdr.read_u32::<LE>()? as usize;
        let crs = read_string(rdr, crs_len)?;

        let mut bands = Vec::with_capacity(usize::from(n_bands));
        for _ in 0..n_bands {
            let len = usize::from(rdr.read_u16::<LE>()?);
            bands.push(read_string(rdr, len)?);
        }

        Ok(Self {
            cols,
            rows,
            extent,
            nodata,
            crs,
            bands,
        })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), RasterError> {
        wtr.write_all(&MAGIC)?;
        wtr.write_u8(VERSION)?;
        wtr.write_u32::<LE>(self.cols as u32)?;
        wtr.write_u32::<LE>(self.rows as u32)?;
        wtr.write_u16::<LE>(self.bands.len() as u16)?;
        wtr.write_f64::<LE>(self.extent.min().x)?;
        wtr.write_f64::<LE>(self.extent.min().y)?;
        wtr.write_f64::<LE>(self.extent.max().x)?;
        wtr.write_f64::<LE>(self.extent.max().y)?;
        wtr.write_u8(u8::from(self.nodata.is_some()))?;
        wtr.write_f64::<LE>(self.nodata.unwrap_or(0.0))?;
        let crs_len =
            u32::try_from(self.crs.len()).map_err(|_| RasterError::Shape("crs too long"))?;
        wtr.write_u32::<LE>(crs_len)?;
        wtr.write_all(self.crs.as_bytes())?;
        for name in &self.bands {
            let len =
                u16::try_from(name.len()).map_err(|_| RasterError::Shape("band name too long"))?;
            wtr.write_u16::<LE>(len)?;
            wtr.write_all(name.as_bytes())?;
        }
        Ok(())
    }

    /// Number of bytes `write` produces.
    fn encoded_len(&self) -> usize {
        const FIXED: usize = size_of::<[u8; 4]>()
            + size_of::<u8>()
            + 2 * size_of::<u32>()
            + size_of::<u16>()
            + 4 * size_of::<f64>()
            + size_of::<u8>()
            + size_of::<f64>()
            + size_of::<u32>();
        FIXED
            + self.crs.len()
            + self
                .bands
                .iter()
                .map(|name| size_of::<u16>() + name.len())
                .sum::<usize>()
    }

    /// Total samples across all bands.
    fn sample_count(&self) -> Result<usize, RasterError> {
        self.cols
            .checked_mul(self.rows)
            .and_then(|cells| cells.checked_mul(self.bands.len()))
            .ok_or(RasterError::Header("grid too large"))
    }

    fn check_file_len(&self, actual: u64) -> Result<(), RasterError> {
        let expected = self
            .sample_count()?
            .checked_mul(size_of::<C>())
            .and_then(|bytes| bytes.checked_add(self.encoded_len()))
            .ok_or(RasterError::Header("grid too large"))? as u64;
        if expected == actual {
            Ok(())
        } else {
            Err(RasterError::Length { expected, actual })
        }
    }
}

fn valid_extent(extent: &Rect<C>) -> bool {
    let (min, max) = (extent.min(), extent.max());
    [min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite())
        && extent.width() > 0.0
        && extent.height() > 0.0
}

fn read_string<R: Read>(rdr: &mut R, len: usize) -> Result<String, RasterError> {
    let mut buf = Vec::new();
    rdr.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(RasterError::Header("string runs past end of file"));
    }
    String::from_utf8(buf).map_err(|_| RasterError::Header("string is not UTF-8"))
}

fn read_samples<R: Read>(rdr: &mut R, n_samples: usize) -> Result<Box<[C]>, RasterError> {
    let mut samples = Vec::with_capacity(n_samples.min(MAX_PREALLOC));
    for _ in 0..n_samples {
        samples.push(rdr.read_f64::<LE>()?);
    }
    Ok(samples.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::{Coord, Grid, GridMode, RasterError, Rect, C};
    use geo::Area;
    use approx::assert_relative_eq;
    use std::{fs, io::Write};

    /// A 3 band, 4 × 2 grid over a patch of Silwood Park in British
    /// National Grid coordinates.
    fn aerial() -> Grid {
        let extent = Rect::new(
            Coord {
                x: 493_400.0,
                y: 169_400.0,
            },
            Coord {
                x: 493_440.0,
                y: 169_420.0,
            },
        );
        let red: Vec<C> = (0..8).map(C::from).collect();
        let green: Vec<C> = (0..8).map(|v| C::from(v) * 10.0).collect();
        let mut blue: Vec<C> = (0..8).map(|v| C::from(v) * 100.0).collect();
        blue[3] = C::NAN;
        Grid::builder(extent, (4, 2))
            .crs("EPSG:27700")
            .nodata(-9999.0)
            .band("red", red)
            .band("green", green)
            .band("blue", blue)
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_decode_in_memory() {
        let grid = aerial();
        let mut buf = Vec::new();
        grid.write_to(&mut buf).unwrap();
        let decoded = Grid::read_from(&buf[..]).unwrap();
        assert_eq!(grid, decoded);
        assert_eq!(decoded.band_names(), ["red", "green", "blue"]);
        assert_eq!(decoded.crs(), "EPSG:27700");
        assert_eq!(decoded.nodata(), Some(-9999.0));
    }

    #[test]
    fn test_nan_nodata_grids_are_equal() {
        let extent = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let ndvi = || {
            Grid::builder(extent, (1, 1))
                .nodata(C::NAN)
                .band("ndvi", vec![C::NAN])
                .build()
                .unwrap()
        };
        let grid = ndvi();
        assert_eq!(grid, grid);
        assert_eq!(grid, ndvi());

        let mut buf = Vec::new();
        grid.write_to(&mut buf).unwrap();
        let decoded = Grid::read_from(&buf[..]).unwrap();
        assert!(decoded.nodata().unwrap().is_nan());
        assert_eq!(decoded, grid);

        let other = Grid::builder(extent, (1, 1))
            .nodata(-9999.0)
            .band("ndvi", vec![C::NAN])
            .build()
            .unwrap();
        assert_ne!(grid, other);
    }

    #[test]
    fn test_oversized_header_is_an_error() {
        let extent = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let grid = Grid::builder(extent, (1, 1))
            .band("dem", vec![42.0])
            .build()
            .unwrap();
        let mut buf = Vec::new();
        grid.write_to(&mut buf).unwrap();
        // cols and rows follow the magic and version byte.
        buf[5..9].copy_from_slice(&u32::MAX.to_le_bytes());
        buf[9..13].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(Grid::read_from(&buf[..]), Err(RasterError::Io(_))));
    }

    #[test]
    fn test_polygon_outlines_extent() {
        let grid = aerial();
        let polygon = grid.polygon();
        assert_relative_eq!(polygon.unsigned_area(), 800.0);
        assert_eq!(polygon.exterior().0.len(), 5);
    }

    #[test]
    fn test_load_and_memmap_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerial.grd");
        aerial().write_to(fs::File::create(&path).unwrap()).unwrap();

        let loaded = Grid::open(&path, GridMode::InMem).unwrap();
        let mapped = Grid::open(&path, GridMode::MemMap).unwrap();
        assert_eq!(loaded.mode(), GridMode::InMem);
        assert_eq!(mapped.mode(), GridMode::MemMap);
        assert_eq!(loaded, mapped);
        assert_eq!(mapped.get(1, (3, 1)), Some(70.0));
        assert!(mapped.get(2, (3, 0)).unwrap().is_nan());
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerial.grd");
        let mut buf = Vec::new();
        aerial().write_to(&mut buf).unwrap();
        fs::write(&path, &buf[..buf.len() - 3]).unwrap();

        let expected = buf.len() as u64;
        let actual = expected - 3;
        for mode in [GridMode::InMem, GridMode::MemMap] {
            match Grid::open(&path, mode) {
                Err(RasterError::Length {
                    expected: e,
                    actual: a,
                }) => assert_eq!((e, a), (expected, actual)),
                other => panic!("expected length error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_grid.grd");
        fs::File::create(&path)
            .unwrap()
            .write_all(b"II*\0 a tiff, perhaps")
            .unwrap();
        assert!(matches!(Grid::load(&path), Err(RasterError::Magic)));
    }

    #[test]
    fn test_get_coord() {
        let grid = aerial();
        let (w, h) = grid.cell_size();
        assert_relative_eq!(w, 10.0);
        assert_relative_eq!(h, 10.0);
        // North-west cell.
        assert_eq!(
            grid.get_coord(
                0,
                Coord {
                    x: 493_401.0,
                    y: 169_419.0
                }
            ),
            Some(0.0)
        );
        // South-east cell.
        assert_eq!(
            grid.get_coord(
                0,
                Coord {
                    x: 493_439.0,
                    y: 169_401.0
                }
            ),
            Some(7.0)
        );
        // A smidge west of the grid.
        assert_eq!(
            grid.get_coord(
                0,
                Coord {
                    x: 493_399.0,
                    y: 169_410.0
                }
            ),
            None
        );
        // A smidge south of the grid.
        assert_eq!(
            grid.get_coord(
                0,
                Coord {
                    x: 493_410.0,
                    y: 169_399.0
                }
            ),
            None
        );
    }

    #[test]
    fn test_band_range_skips_missing() {
        let grid = aerial();
        assert_eq!(grid.band_range(2), Some((0.0, 700.0)));
        assert_eq!(grid.band_range(3), None);

        let extent = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 });
        let grid = Grid::builder(extent, (2, 1))
            .nodata(-1.0)
            .band("ndvi", vec![-1.0, 0.25])
            .build()
            .unwrap();
        assert_eq!(grid.band_range(0), Some((0.25, 0.25)));
    }

    #[test]
    fn test_builder_rejects_bad_shapes() {
        let extent = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 });
        assert!(matches!(
            Grid::builder(extent, (2, 2)).build(),
            Err(RasterError::Shape(_))
        ));
        assert!(matches!(
            Grid::builder(extent, (2, 2)).band("b", vec![0.0; 3]).build(),
            Err(RasterError::Shape(_))
        ));
        assert!(matches!(
            Grid::builder(extent, (0, 2)).band("b", vec![]).build(),
            Err(RasterError::Shape(_))
        ));
        let flat = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 0.0 });
        assert!(matches!(
            Grid::builder(flat, (1, 1)).band("b", vec![0.0]).build(),
            Err(RasterError::Shape(_))
        ));
    }
}
