//! The values bound by the holes of a template.
use std::collections::{btree_map, BTreeMap};

use quasi_template::Value;
use quasi_trees as trees;

/// The value matched by each hole of a template, keyed by hole index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    holes: BTreeMap<usize, Value>,
}

impl Match {
    /// Create an empty match.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A match binding a single hole.
    pub fn single(index: usize, value: impl Into<Value>) -> Self {
        Self { holes: BTreeMap::from([(index, value.into())]) }
    }

    /// Combine the holes of two disjoint parts of a template.
    ///
    /// Panics if a hole index occurs in both, a template may only use each
    /// hole once.
    pub fn union(mut self, other: Match) -> Self {
        for (index, value) in other.holes {
            let previous = self.holes.insert(index, value);
            assert!(previous.is_none(), "hole #{index} occurs more than once in the template");
        }

        self
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.holes.get(&index)
    }

    pub fn expr(&self, index: usize) -> Option<&trees::Expr> {
        self.get(index).and_then(Value::as_expr)
    }

    pub fn ty(&self, index: usize) -> Option<&trees::Type> {
        self.get(index).and_then(Value::as_type)
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// The bound values in hole index order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.holes.values()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.holes.into_values().collect()
    }
}

impl IntoIterator for Match {
    type Item = (usize, Value);
    type IntoIter = btree_map::IntoIter<usize, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.holes.into_iter()
    }
}
