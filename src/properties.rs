// Copyright 2025 Cowboy AI, LLC.

//! Ordered property maps used as own-property sets and `extend` arguments

use indexmap::map::{IndexMap, Iter, Keys};

use crate::errors::PrototypeResult;
use crate::method::Method;
use crate::object::Object;
use crate::value::Value;

/// Insertion-ordered mapping from property name to value
///
/// # Example
///
/// ```
/// use cim_prototype::{PropertyBag, Value};
///
/// let bag = PropertyBag::new()
///     .with("name", "parent")
///     .method("hello", |this, _args| {
///         Ok(Value::from(format!("hello {}", this.get_str("name")?)))
///     });
///
/// assert_eq!(bag.len(), 2);
/// assert_eq!(bag.get("name"), Some(&Value::from("parent")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: IndexMap<String, Value>,
}

impl PropertyBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Builder form of [`PropertyBag::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form that wraps a closure into a [`Method`] named after its key
    pub fn method<F>(mut self, key: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut dyn Object, &[Value]) -> PrototypeResult<Value> + Send + Sync + 'static,
    {
        let key = key.into();
        let method = Method::new(key.clone(), body);
        self.entries.insert(key, Value::Method(method));
        self
    }

    /// Insert or overwrite a property, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a property
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove a property, keeping the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Check if a property is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Copy every entry of `other` into this bag; `other` wins on conflicts
    pub fn merge(&mut self, other: PropertyBag) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Iterate over property names in insertion order
    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
