// Copyright 2025 Cowboy AI, LLC.

//! Uniform object protocol shared by prototypes and instances
//!
//! Methods receive their `this` as `&mut dyn Object`, so the same method body
//! runs against a frozen prototype (where every write is rejected) or a
//! mutable instance (where writes land in the instance's own properties).

use std::fmt;

use crate::errors::{PrototypeError, PrototypeResult};
use crate::identifiers::ObjectId;
use crate::method::Method;
use crate::prototype::{Ancestry, Prototype};
use crate::value::Value;

/// Property access, mutation and ancestry queries for any object
pub trait Object: fmt::Debug {
    /// Identity of this object
    fn object_id(&self) -> ObjectId;

    /// Delegation parent; `None` only for the root prototype
    fn prototype(&self) -> Option<&Prototype>;

    /// Ancestry set used for feature queries
    fn ancestry(&self) -> &Ancestry;

    /// Look up an own property without consulting the delegation chain
    fn get_own(&self, key: &str) -> Option<&Value>;

    /// Names of own properties in definition order
    fn own_keys(&self) -> Vec<String>;

    /// Write an own property
    ///
    /// # Errors
    ///
    /// Returns [`PrototypeError::FrozenMutation`] when the object is a prototype
    fn set(&mut self, key: &str, value: Value) -> PrototypeResult<()>;

    /// Delete an own property, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns [`PrototypeError::FrozenMutation`] when the object is a prototype
    fn delete(&mut self, key: &str) -> PrototypeResult<bool>;

    /// View this object as a method receiver
    fn as_object_mut(&mut self) -> &mut dyn Object;

    /// Whether `key` is an own property
    fn has_own(&self, key: &str) -> bool {
        self.get_own(key).is_some()
    }

    /// Resolve a property through the delegation chain
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.get_own(key) {
            return Some(value.clone());
        }
        self.prototype()
            .and_then(|parent| parent.lookup(key))
            .cloned()
    }

    /// Whether `key` resolves anywhere on the delegation chain
    fn has(&self, key: &str) -> bool {
        self.has_own(key)
            || self
                .prototype()
                .map_or(false, |parent| parent.lookup(key).is_some())
    }

    /// Resolve a property, failing when it is absent
    fn require(&self, key: &str) -> PrototypeResult<Value> {
        self.get(key).ok_or_else(|| PrototypeError::PropertyNotFound {
            key: key.to_string(),
        })
    }

    /// Whether `candidate` contributed to this object's composition
    fn has_feature(&self, candidate: &Prototype) -> bool {
        self.ancestry().contains(&candidate.id())
    }

    /// Whether this object sits strictly above `other` on its delegation
    /// chain; always false for instances
    fn is_prototype_of(&self, _other: &dyn Object) -> bool {
        false
    }

    /// Resolve a property that must hold a method
    fn method(&self, key: &str) -> PrototypeResult<Method> {
        match self.require(key)? {
            Value::Method(method) => Ok(method),
            other => Err(PrototypeError::NotCallable {
                key: key.to_string(),
                found: other.type_name(),
            }),
        }
    }

    /// Resolve a method and call it with this object as the receiver
    fn invoke(&mut self, key: &str, args: &[Value]) -> PrototypeResult<Value> {
        let method = self.method(key)?;
        method.call(self.as_object_mut(), args)
    }

    /// Resolve a string property
    fn get_str(&self, key: &str) -> PrototypeResult<String> {
        match self.require(key)? {
            Value::Str(s) => Ok(s),
            other => Err(mismatch(key, "string", &other)),
        }
    }

    /// Resolve an integer property
    fn get_int(&self, key: &str) -> PrototypeResult<i64> {
        match self.require(key)? {
            Value::Int(n) => Ok(n),
            other => Err(mismatch(key, "integer", &other)),
        }
    }

    /// Resolve a numeric property as a float
    fn get_float(&self, key: &str) -> PrototypeResult<f64> {
        let value = self.require(key)?;
        value
            .as_float()
            .ok_or_else(|| mismatch(key, "float", &value))
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> PrototypeError {
    PrototypeError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::base;
    use crate::PropertyBag;

    fn sample() -> Prototype {
        base().extend_with(
            PropertyBag::new()
                .with("name", "sample")
                .with("count", 3)
                .with("ratio", 0.5)
                .method("shout", |this, _args| {
                    Ok(Value::from(this.get_str("name")?.to_uppercase()))
                }),
        )
    }

    #[test]
    fn test_typed_accessors() {
        let proto = sample();
        assert_eq!(proto.get_str("name").unwrap(), "sample");
        assert_eq!(proto.get_int("count").unwrap(), 3);
        assert_eq!(proto.get_float("ratio").unwrap(), 0.5);
        assert_eq!(proto.get_float("count").unwrap(), 3.0);
    }

    /// Test lookup errors for host-side accessors
    ///
    /// ```mermaid
    /// graph TD
    ///     A[require] -->|absent| B[PropertyNotFound]
    ///     C[method] -->|not a method| D[NotCallable]
    ///     E[get_int] -->|wrong type| F[TypeMismatch]
    /// ```
    #[test]
    fn test_lookup_errors() {
        let proto = sample();

        let err = proto.require("missing").unwrap_err();
        assert_eq!(
            err,
            PrototypeError::PropertyNotFound {
                key: "missing".to_string()
            }
        );

        let err = proto.method("name").unwrap_err();
        assert_eq!(
            err,
            PrototypeError::NotCallable {
                key: "name".to_string(),
                found: "string"
            }
        );

        let err = proto.get_int("name").unwrap_err();
        assert!(matches!(err, PrototypeError::TypeMismatch { expected: "integer", .. }));
        assert!(err.is_lookup_error());
    }

    #[test]
    fn test_invoke_through_dyn_receiver() {
        let proto = sample();
        let mut instance = proto.new(&[]).unwrap();
        let receiver: &mut dyn Object = &mut instance;
        assert_eq!(receiver.invoke("shout", &[]).unwrap(), Value::from("SAMPLE"));
    }

    #[test]
    fn test_has_and_has_own() {
        let proto = sample();
        let instance = proto.new(&[]).unwrap();
        assert!(proto.has_own("name"));
        assert!(!instance.has_own("name"));
        assert!(instance.has("name"));
        assert!(!instance.has("nope"));
    }
}
