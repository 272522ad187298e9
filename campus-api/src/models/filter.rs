//! Exact-match filters for list queries
//!
//! A filter is a conjunction of `field = value` pairs. No partial matching,
//! ranges, or OR.

use std::collections::BTreeMap;

use uuid::Uuid;

/// Value compared with `=` against a column
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Uuid(Uuid),
    Text(String),
    Int(i64),
    Bool(bool),
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Field-name-to-value conjunction.
///
/// Ordered by field name so the generated SQL is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(BTreeMap<String, FilterValue>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an exact-match condition.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
