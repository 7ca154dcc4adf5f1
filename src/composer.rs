// Copyright 2025 Cowboy AI, LLC.

//! Composition of prototypes from a base, mixins and own properties
//!
//! A prototype has exactly one delegation parent. Multiple inheritance is
//! realized by copying each mixin's resolved properties into the child and
//! recording the mixin's ancestry, so feature queries still see it.

use tracing::debug;

use crate::identifiers::PrototypeId;
use crate::object::Object;
use crate::properties::PropertyBag;
use crate::prototype::Prototype;
use crate::value::Value;

/// Builder that composes one new frozen prototype
///
/// # Example
///
/// ```
/// use cim_prototype::{base, Composer, Object, PropertyBag};
///
/// let named = base().extend_with(PropertyBag::new().with("name", "anonymous"));
/// let aged = base().extend_with(PropertyBag::new().with("age", 0));
///
/// let person = Composer::new(base())
///     .mixin(&named)
///     .mixin(&aged)
///     .property("name", "person")
///     .label("Person")
///     .build();
///
/// assert!(person.has_feature(&named));
/// assert!(person.has_feature(&aged));
/// assert_eq!(person.get_str("name").unwrap(), "person");
/// ```
#[derive(Debug)]
pub struct Composer<'a> {
    base: &'a Prototype,
    mixins: Vec<&'a Prototype>,
    own: PropertyBag,
    label: Option<String>,
}

impl<'a> Composer<'a> {
    /// Start composing a child of `base`
    pub fn new(base: &'a Prototype) -> Self {
        Self {
            base,
            mixins: Vec::new(),
            own: PropertyBag::new(),
            label: None,
        }
    }

    /// Add one mixin source; later mixins override earlier ones
    pub fn mixin(mut self, source: &'a Prototype) -> Self {
        self.mixins.push(source);
        self
    }

    /// Add several mixin sources in order
    pub fn mixins(mut self, sources: &[&'a Prototype]) -> Self {
        self.mixins.extend_from_slice(sources);
        self
    }

    /// Merge a bag into the own properties; own properties override all mixins
    pub fn own(mut self, bag: PropertyBag) -> Self {
        self.own.merge(bag);
        self
    }

    /// Set a single own property
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.own.insert(key, value);
        self
    }

    /// Name the resulting prototype for display and tracing
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the frozen prototype
    pub fn build(self) -> Prototype {
        let id = PrototypeId::new();

        let mut ancestry = self.base.ancestry().clone();
        ancestry.insert(id);

        let mut properties = PropertyBag::new();
        for source in &self.mixins {
            properties.merge(source.resolved_properties());
            ancestry.union_with(source.ancestry());
        }
        properties.merge(self.own);

        debug!(
            prototype = %id,
            label = self.label.as_deref().unwrap_or_default(),
            parent = %self.base.id(),
            mixins = self.mixins.len(),
            properties = properties.len(),
            ancestry = ancestry.len(),
            "Composed prototype"
        );

        Prototype::from_parts(id, self.label, Some(self.base.clone()), properties, ancestry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::base;

    fn proto_with(key: &str, value: i64) -> Prototype {
        base().extend_with(PropertyBag::new().with(key, value))
    }

    /// Test that a plain extend produces an independent empty child
    #[test]
    fn test_empty_composition() {
        let child = Composer::new(base()).build();
        assert!(child.own_properties().is_empty());
        assert_eq!(child.parent(), Some(base()));
        assert_eq!(child.ancestry().len(), 2);
        assert!(child.has_feature(&child));
        assert!(child.has_feature(base()));
    }

    /// Test the override order: base < mixins in order < own
    ///
    /// ```mermaid
    /// graph LR
    ///     B[base x=0] --> M1[mixin1 x=1]
    ///     M1 --> M2[mixin2 x=2]
    ///     M2 --> O[own x=3]
    /// ```
    #[test]
    fn test_last_writer_wins() {
        let parent = proto_with("x", 0);
        let m1 = proto_with("x", 1);
        let m2 = proto_with("x", 2);

        let from_base = parent.compose().build();
        assert_eq!(from_base.get_int("x").unwrap(), 0);

        let one = parent.compose().mixin(&m1).build();
        assert_eq!(one.get_int("x").unwrap(), 1);

        let two = parent.extend(&[&m1, &m2], PropertyBag::new());
        assert_eq!(two.get_int("x").unwrap(), 2);

        let reversed = parent.extend(&[&m2, &m1], PropertyBag::new());
        assert_eq!(reversed.get_int("x").unwrap(), 1);

        let own = parent.extend(&[&m1, &m2], PropertyBag::new().with("x", 3));
        assert_eq!(own.get_int("x").unwrap(), 3);
    }

    /// Test that a mixin contributes inherited properties too
    #[test]
    fn test_mixin_contributes_resolved_view() {
        let grand = proto_with("deep", 1);
        let mixin = grand.extend_with(PropertyBag::new().with("shallow", 2));
        let composed = base().compose().mixin(&mixin).build();

        assert_eq!(composed.get_int("deep").unwrap(), 1);
        assert_eq!(composed.get_int("shallow").unwrap(), 2);
        assert!(composed.has_feature(&grand));
        assert!(composed.has_feature(&mixin));
        assert!(!grand.is_prototype_of(&composed));
    }

    #[test]
    fn test_sources_are_unmodified() {
        let parent = proto_with("a", 1);
        let mixin = proto_with("b", 2);
        let _child = parent.extend(&[&mixin], PropertyBag::new().with("c", 3));

        assert_eq!(parent.own_keys(), vec!["a".to_string()]);
        assert_eq!(mixin.own_keys(), vec!["b".to_string()]);
        assert!(!parent.has("c"));
    }

    #[test]
    fn test_own_calls_accumulate() {
        let child = base()
            .compose()
            .own(PropertyBag::new().with("a", 1).with("b", 1))
            .own(PropertyBag::new().with("b", 2))
            .property("c", 3)
            .build();
        assert_eq!(child.get_int("a").unwrap(), 1);
        assert_eq!(child.get_int("b").unwrap(), 2);
        assert_eq!(child.get_int("c").unwrap(), 3);
    }
}
