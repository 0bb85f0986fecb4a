//! Tagged session values.

use crate::table::Table;
use raster::Grid;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Which on-disk encoding a value needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Gridded raster, written to its own grid file.
    Grid,

    /// Everything else, bundled into the session archive.
    Plain,
}

/// A value bound to a name in a [`Session`](crate::Session).
///
/// The kind of a value is fixed when it is constructed, so saving a
/// session never needs to inspect what a value looks like.
#[derive(Debug, PartialEq)]
pub enum Value {
    Grid(Grid),
    Plain(Plain),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Grid(_) => Kind::Grid,
            Self::Plain(_) => Kind::Plain,
        }
    }

    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Self::Grid(grid) => Some(grid),
            Self::Plain(_) => None,
        }
    }

    pub fn as_plain(&self) -> Option<&Plain> {
        match self {
            Self::Grid(_) => None,
            Self::Plain(plain) => Some(plain),
        }
    }
}

/// Returns whether `value` is stored as a grid file or inside the
/// archive.
pub fn classify(value: &Value) -> Kind {
    value.kind()
}

impl From<Grid> for Value {
    fn from(grid: Grid) -> Self {
        Self::Grid(grid)
    }
}

impl From<Plain> for Value {
    fn from(plain: Plain) -> Self {
        Self::Plain(plain)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Self::Plain(Plain::Table(table))
    }
}

/// Any non-grid value: scalars, vectors, lists, records and tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Plain {
    Null,
    Bool(bool),
    Int(i64),
    Float(Real),
    Text(String),
    Vector(Vec<Real>),
    List(Vec<Plain>),
    Record(BTreeMap<String, Plain>),
    Table(Table),
}

impl Plain {
    /// Short, human readable name of this value's variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Vector(_) => "vector",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Table(_) => "table",
        }
    }
}

impl From<bool> for Plain {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Plain {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Plain {
    fn from(v: f64) -> Self {
        Self::Float(Real(v))
    }
}

impl From<&str> for Plain {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Plain {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<f64>> for Plain {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v.into_iter().map(Real).collect())
    }
}

impl From<Table> for Plain {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

/// An `f64` that survives a trip through JSON.
///
/// Finite values are plain numbers; NaN and the infinities are written
/// as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`. NaN compares
/// equal to NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Real(pub f64);

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0.is_nan() && other.0.is_nan())
    }
}

impl From<f64> for Real {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl From<Real> for f64 {
    fn from(v: Real) -> Self {
        v.0
    }
}

impl Serialize for Real {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Self(v) = *self;
        if v.is_finite() {
            serializer.serialize_f64(v)
        } else if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v.is_sign_positive() {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }
}

impl<'de> Deserialize<'de> for Real {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Self(v)),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(Self(f64::NAN)),
                "Infinity" => Ok(Self(f64::INFINITY)),
                "-Infinity" => Ok(Self(f64::NEG_INFINITY)),
                other => Err(D::Error::custom(format!("invalid float {other:?}"))),
            },
        }
    }
}
