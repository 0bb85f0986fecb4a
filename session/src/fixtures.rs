//! Small stand-ins for the Silwood Park lesson data.

use crate::{
    table::{ColumnData, Table},
    value::Real,
};
use geo::geometry::{Coord, Geometry, Point, Rect};
use raster::Grid;

const SW: Coord = Coord {
    x: 493_400.0,
    y: 169_400.0,
};

#[allow(clippy::cast_precision_loss)]
fn silwood_extent(cols: usize, rows: usize, cell: f64) -> Rect {
    Rect::new(
        SW,
        Coord {
            x: SW.x + cols as f64 * cell,
            y: SW.y + rows as f64 * cell,
        },
    )
}

/// 222 nest boxes as a point layer.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn nest_boxes() -> Table {
    const N: usize = 222;
    let points = (0..N)
        .map(|i| {
            let point = Point::new(SW.x + (i % 20) as f64 * 7.5, SW.y + (i / 20) as f64 * 7.5);
            Some(Geometry::Point(point))
        })
        .collect();
    let species = (0..N)
        .map(|i| match i % 3 {
            0 => Some("blue tit".to_owned()),
            1 => Some("great tit".to_owned()),
            _ => None,
        })
        .collect();
    let eggs = (0..N)
        .map(|i| (i % 5 != 0).then_some((i % 11) as i64))
        .collect();
    let canopy = (0..N)
        .map(|i| match i % 7 {
            0 => None,
            6 => Some(Real(f64::NAN)),
            _ => Some(Real(i as f64 / 222.0)),
        })
        .collect();
    Table::new()
        .with_crs("EPSG:27700")
        .with_column("geometry", ColumnData::Geometry(points))
        .and_then(|t| t.with_column("species", ColumnData::Text(species)))
        .and_then(|t| t.with_column("eggs", ColumnData::Int(eggs)))
        .and_then(|t| t.with_column("canopy", ColumnData::Float(canopy)))
        .and_then(|t| {
            t.with_column(
                "occupied",
                ColumnData::Bool((0..N).map(|i| Some(i % 2 == 0)).collect()),
            )
        })
        .unwrap()
}

/// A 3 band aerial image.
#[allow(clippy::cast_precision_loss)]
pub fn silwood_aerial() -> Grid {
    let (cols, rows) = (24, 16);
    let band = |scale: f64| -> Vec<f64> {
        (0..cols * rows)
            .map(|i| ((i * 37) % 256) as f64 * scale)
            .collect()
    };
    Grid::builder(silwood_extent(cols, rows, 0.25), (cols, rows))
        .crs("EPSG:27700")
        .band("red", band(1.0))
        .band("green", band(0.5))
        .band("blue", band(0.25))
        .build()
        .unwrap()
}

/// Single band NDVI with a few missing cells.
#[allow(clippy::cast_precision_loss)]
pub fn ndvi_silwood() -> Grid {
    let (cols, rows) = (12, 8);
    let ndvi = (0..cols * rows)
        .map(|i| {
            if i % 13 == 0 {
                f64::NAN
            } else {
                (i as f64 / (cols * rows) as f64) * 2.0 - 1.0
            }
        })
        .collect();
    Grid::builder(silwood_extent(cols, rows, 0.5), (cols, rows))
        .crs("EPSG:27700")
        .nodata(f64::NAN)
        .band("ndvi", ndvi)
        .build()
        .unwrap()
}
