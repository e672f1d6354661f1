//! Flat key/value arguments → name map → positional parameters.

use crate::error::{DbError, DbResult};
use crate::value::Value;
use std::collections::HashMap;

/// Named argument values for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentMap {
    values: HashMap<String, Value>,
}

impl ArgumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Pair up a flat `key, value, key, value, ...` list.
///
/// - odd length: [`DbError::OddArgumentCount`]
/// - pairs whose key is not [`Value::Text`] are skipped
/// - a repeated key keeps its last value
pub fn bind(args: Vec<Value>) -> DbResult<ArgumentMap> {
    if args.len() % 2 != 0 {
        return Err(DbError::OddArgumentCount(args.len()));
    }

    let mut map = ArgumentMap {
        values: HashMap::with_capacity(args.len() / 2),
    };
    let mut iter = args.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        if let Value::Text(key) = key {
            map.values.insert(key, value);
        }
    }
    Ok(map)
}

/// Order bound values by placeholder name. Unbound names become [`Value::Null`].
///
/// The result always has `names.len()` entries.
pub fn project(names: &[String], bound: &ArgumentMap) -> Vec<Value> {
    names
        .iter()
        .map(|name| bound.get(name).cloned().unwrap_or(Value::Null))
        .collect()
}
