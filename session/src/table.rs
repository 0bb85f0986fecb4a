//! Column-oriented tables, including vector layers with a geometry
//! column.

use crate::{error::TableError, value::Real};
use geo::{geometry::Geometry, CoordsIter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A set of equally long, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr", into = "TableRepr")]
pub struct Table {
    /// Spatial reference of any geometry column.
    crs: Option<String>,
    columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Column values; `None` marks a missing entry.
///
/// Geometry coordinates must be finite. Use `None` for an empty
/// geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Float(Vec<Option<Real>>),
    Int(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
    Geometry(Vec<Option<Geometry<f64>>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Text(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Geometry(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    /// Appends a column, failing if its length differs from the
    /// existing columns or its name is taken.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: ColumnData,
    ) -> Result<Self, TableError> {
        self.columns.push(Column {
            name: name.into(),
            data,
        });
        validate(&self.columns)?;
        Ok(self)
    }

    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| &column.data)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |column| column.data.len())
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }
}

fn validate(columns: &[Column]) -> Result<(), TableError> {
    let expected = columns.first().map_or(0, |column| column.data.len());
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.name.as_str()) {
            return Err(TableError::Duplicate(column.name.clone()));
        }
        let len = column.data.len();
        if len != expected {
            return Err(TableError::Ragged {
                name: column.name.clone(),
                len,
                expected,
            });
        }
        if let ColumnData::Geometry(geometries) = &column.data {
            let non_finite = geometries.iter().position(|geometry| {
                geometry.as_ref().is_some_and(|geometry| {
                    geometry
                        .coords_iter()
                        .any(|coord| !(coord.x.is_finite() && coord.y.is_finite()))
                })
            });
            if let Some(row) = non_finite {
                return Err(TableError::NonFiniteCoordinate {
                    name: column.name.clone(),
                    row,
                });
            }
        }
    }
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct TableRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crs: Option<String>,
    columns: Vec<Column>,
}

impl TryFrom<TableRepr> for Table {
    type Error = TableError;

    fn try_from(TableRepr { crs, columns }: TableRepr) -> Result<Self, TableError> {
        validate(&columns)?;
        Ok(Self { crs, columns })
    }
}

impl From<Table> for TableRepr {
    fn from(Table { crs, columns }: Table) -> Self {
        Self { crs, columns }
    }
}
