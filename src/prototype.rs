// Copyright 2025 Cowboy AI, LLC.

//! Frozen prototypes, their ancestry sets and the root prototype

use serde::{Deserialize, Serialize};
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::composer::Composer;
use crate::config::{FactoryConfig, DEFAULT_INITIALIZER};
use crate::errors::{MutationKind, PrototypeError, PrototypeResult};
use crate::identifiers::{ObjectId, PrototypeId};
use crate::instance::Instance;
use crate::object::Object;
use crate::properties::PropertyBag;
use crate::value::Value;

/// Set of prototypes that contributed to an object's composition
///
/// A prototype's ancestry always contains the prototype itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestry(BTreeSet<PrototypeId>);

impl Ancestry {
    /// Create an empty set
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Ancestry of the root prototype
    pub fn root() -> Self {
        let mut ancestry = Self::new();
        ancestry.insert(PrototypeId::ROOT);
        ancestry
    }

    /// Add one prototype, returning whether it was new
    pub fn insert(&mut self, id: PrototypeId) -> bool {
        self.0.insert(id)
    }

    /// Add every member of `other`
    pub fn union_with(&mut self, other: &Ancestry) {
        self.0.extend(other.0.iter().copied());
    }

    /// Membership test
    pub fn contains(&self, id: &PrototypeId) -> bool {
        self.0.contains(id)
    }

    /// Whether every member of `other` is also a member of this set
    pub fn is_superset(&self, other: &Ancestry) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Iterate over members in ID order
    pub fn iter(&self) -> btree_set::Iter<'_, PrototypeId> {
        self.0.iter()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct PrototypeInner {
    id: PrototypeId,
    label: Option<String>,
    parent: Option<Prototype>,
    properties: PropertyBag,
    ancestry: Ancestry,
}

/// A frozen template object
///
/// Prototypes are cheap shared handles. Nothing can change a prototype once
/// it is built: [`Object::set`] and [`Object::delete`] always fail with
/// [`PrototypeError::FrozenMutation`].
///
/// # Example
///
/// ```
/// use cim_prototype::{base, Object, PropertyBag};
///
/// let point = base().extend_with(PropertyBag::new().with("x", 0).with("y", 0));
/// let p = point.new(&[]).unwrap();
///
/// assert!(point.is_prototype_of(&p));
/// assert!(p.has_feature(&point));
/// assert!(p.has_feature(base()));
/// ```
#[derive(Clone)]
pub struct Prototype {
    inner: Arc<PrototypeInner>,
}

static BASE: OnceLock<Prototype> = OnceLock::new();

/// The root prototype every other prototype descends from
pub fn base() -> &'static Prototype {
    BASE.get_or_init(Prototype::root)
}

impl Prototype {
    fn root() -> Self {
        debug!(prototype = %PrototypeId::ROOT, "Initializing root prototype");
        Self::from_parts(
            PrototypeId::ROOT,
            Some("Base".to_string()),
            None,
            PropertyBag::new(),
            Ancestry::root(),
        )
    }

    pub(crate) fn from_parts(
        id: PrototypeId,
        label: Option<String>,
        parent: Option<Prototype>,
        properties: PropertyBag,
        ancestry: Ancestry,
    ) -> Self {
        Self {
            inner: Arc::new(PrototypeInner {
                id,
                label,
                parent,
                properties,
                ancestry,
            }),
        }
    }

    /// Identity token of this prototype
    pub fn id(&self) -> PrototypeId {
        self.inner.id
    }

    /// Optional name given through [`Composer::label`]
    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    /// The prototype this one was extended from
    pub fn parent(&self) -> Option<&Prototype> {
        self.inner.parent.as_ref()
    }

    /// Properties contributed by this prototype's mixins and own bag
    pub fn own_properties(&self) -> &PropertyBag {
        &self.inner.properties
    }

    /// Whether this is the root prototype
    pub fn is_root(&self) -> bool {
        self.inner.id.is_root()
    }

    /// Resolve a property by walking the delegation chain
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut current = Some(self);
        while let Some(proto) = current {
            if let Some(value) = proto.inner.properties.get(key) {
                return Some(value);
            }
            current = proto.parent();
        }
        None
    }

    /// Every visible property, inherited and own, nearest definition winning
    pub fn resolved_properties(&self) -> PropertyBag {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(proto) = current {
            chain.push(proto);
            current = proto.parent();
        }

        let mut resolved = PropertyBag::new();
        for proto in chain.into_iter().rev() {
            resolved.merge(proto.inner.properties.clone());
        }
        resolved
    }

    /// Compose a new frozen child of this prototype
    ///
    /// Properties of `mixins` override this prototype's in argument order and
    /// `own` overrides all of them. The child's ancestry is itself, this
    /// prototype's ancestry and the ancestry of every mixin.
    pub fn extend(&self, mixins: &[&Prototype], own: PropertyBag) -> Prototype {
        Composer::new(self).mixins(mixins).own(own).build()
    }

    /// Compose a child with only an own property bag
    pub fn extend_with(&self, own: PropertyBag) -> Prototype {
        Composer::new(self).own(own).build()
    }

    /// Start a [`Composer`] rooted at this prototype
    pub fn compose(&self) -> Composer<'_> {
        Composer::new(self)
    }

    /// Create a mutable instance, running the `initialize` method if one resolves
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the initializer
    #[allow(clippy::new_ret_no_self)]
    pub fn new(&self, args: &[Value]) -> PrototypeResult<Instance> {
        Instance::instantiate(self, DEFAULT_INITIALIZER, args)
    }

    /// Create a mutable instance using the initializer named by `config`
    ///
    /// # Errors
    ///
    /// Propagates any error returned by the initializer
    pub fn new_with(&self, config: &FactoryConfig, args: &[Value]) -> PrototypeResult<Instance> {
        Instance::instantiate(self, config.initializer(), args)
    }

    /// Call a method with this prototype as the receiver
    ///
    /// Any write the method attempts on its receiver fails, since the
    /// receiver is frozen.
    pub fn invoke(&self, key: &str, args: &[Value]) -> PrototypeResult<Value> {
        let mut receiver = self.clone();
        Object::invoke(&mut receiver, key, args)
    }

    fn reject(&self, key: &str, kind: MutationKind) -> PrototypeError {
        debug!(
            prototype = %self,
            key,
            kind = %kind,
            "Rejected write to frozen prototype"
        );
        PrototypeError::FrozenMutation {
            prototype: self.id(),
            key: key.to_string(),
            kind,
        }
    }
}

impl Object for Prototype {
    fn object_id(&self) -> ObjectId {
        ObjectId::Prototype(self.id())
    }

    fn prototype(&self) -> Option<&Prototype> {
        self.parent()
    }

    fn ancestry(&self) -> &Ancestry {
        &self.inner.ancestry
    }

    fn get_own(&self, key: &str) -> Option<&Value> {
        self.inner.properties.get(key)
    }

    fn own_keys(&self) -> Vec<String> {
        self.inner.properties.keys().cloned().collect()
    }

    fn set(&mut self, key: &str, _value: Value) -> PrototypeResult<()> {
        let kind = if self.has(key) {
            MutationKind::Assign
        } else {
            MutationKind::Add
        };
        Err(self.reject(key, kind))
    }

    fn delete(&mut self, key: &str) -> PrototypeResult<bool> {
        Err(self.reject(key, MutationKind::Delete))
    }

    fn as_object_mut(&mut self) -> &mut dyn Object {
        self
    }

    fn is_prototype_of(&self, other: &dyn Object) -> bool {
        let mut current = other.prototype();
        while let Some(proto) = current {
            if proto.id() == self.id() {
                return true;
            }
            current = proto.parent();
        }
        false
    }
}

impl PartialEq for Prototype {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Prototype {}

impl Hash for Prototype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{label}"),
            None => write!(f, "{}", self.id()),
        }
    }
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("id", &self.id())
            .field("label", &self.label())
            .field("parent", &self.parent().map(Prototype::id))
            .field("properties", &self.own_keys())
            .field("ancestry", &self.inner.ancestry.len())
            .finish()
    }
}
