// Copyright 2025 Cowboy AI, LLC.

//! Mutable instances created from frozen prototypes

use tracing::trace;

use crate::errors::PrototypeResult;
use crate::identifiers::{InstanceId, ObjectId};
use crate::object::Object;
use crate::properties::PropertyBag;
use crate::prototype::{Ancestry, Prototype};
use crate::value::Value;

/// A mutable object delegating to a prototype
///
/// Own properties start empty and may be added, overwritten or deleted
/// freely. Writes never reach the prototype; an own property simply shadows
/// the inherited one.
#[derive(Debug)]
pub struct Instance {
    id: InstanceId,
    prototype: Prototype,
    properties: PropertyBag,
}

impl Instance {
    pub(crate) fn instantiate(
        prototype: &Prototype,
        initializer: &str,
        args: &[Value],
    ) -> PrototypeResult<Self> {
        let mut instance = Self {
            id: InstanceId::new(),
            prototype: prototype.clone(),
            properties: PropertyBag::new(),
        };

        trace!(
            instance = %instance.id,
            prototype = %prototype,
            "Created instance"
        );

        if let Some(Value::Method(init)) = prototype.lookup(initializer).cloned() {
            trace!(instance = %instance.id, initializer, "Running initializer");
            init.call(&mut instance, args)?;
        }

        Ok(instance)
    }

    /// Identity of this instance
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Own properties set on this instance
    pub fn own_properties(&self) -> &PropertyBag {
        &self.properties
    }
}

impl Object for Instance {
    fn object_id(&self) -> ObjectId {
        ObjectId::Instance(self.id)
    }

    fn prototype(&self) -> Option<&Prototype> {
        Some(&self.prototype)
    }

    fn ancestry(&self) -> &Ancestry {
        self.prototype.ancestry()
    }

    fn get_own(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    fn own_keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn set(&mut self, key: &str, value: Value) -> PrototypeResult<()> {
        self.properties.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> PrototypeResult<bool> {
        Ok(self.properties.remove(key).is_some())
    }

    fn as_object_mut(&mut self) -> &mut dyn Object {
        self
    }
}
