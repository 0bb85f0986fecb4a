use crate::value::{Plain, Value};
use raster::Grid;
use std::collections::{btree_map, BTreeMap};

/// The named values of one analysis run.
///
/// Names enumerate in sorted order.
#[derive(Debug, Default, PartialEq)]
pub struct Session {
    values: BTreeMap<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `name`, returning whatever was bound before.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the grid bound to `name`, if `name` is bound to a grid.
    pub fn grid(&self, name: &str) -> Option<&Grid> {
        self.get(name).and_then(Value::as_grid)
    }

    /// Returns the plain value bound to `name`, if `name` is bound to
    /// a plain value.
    pub fn plain(&self, name: &str) -> Option<&Plain> {
        self.get(name).and_then(Value::as_plain)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a Session {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Extend<(String, Value)> for Session {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}
