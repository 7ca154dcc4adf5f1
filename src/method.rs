// Copyright 2025 Cowboy AI, LLC.

//! Shared methods with a late-bound receiver

use std::fmt;
use std::sync::Arc;

use crate::errors::PrototypeResult;
use crate::object::Object;
use crate::value::Value;

type MethodBody = dyn Fn(&mut dyn Object, &[Value]) -> PrototypeResult<Value> + Send + Sync;

/// A named function stored as a property value
///
/// The receiver is passed explicitly on every call, so a method defined on
/// one prototype reads whatever object it is invoked through. Cloning a
/// method shares the body; two methods are equal only when they share it.
///
/// # Example
///
/// ```
/// use cim_prototype::{base, Method, Object, PropertyBag, Value};
///
/// let greet = Method::new("greet", |this, _args| {
///     Ok(Value::from(format!("hello {}", this.get_str("name")?)))
/// });
/// let parent = base().extend_with(
///     PropertyBag::new().with("name", "parent").with("greet", greet.clone()),
/// );
/// let child = parent.extend_with(PropertyBag::new().with("name", "child"));
///
/// assert_eq!(child.method("greet").unwrap(), greet);
/// assert_eq!(child.invoke("greet", &[]).unwrap(), Value::from("hello child"));
/// ```
#[derive(Clone)]
pub struct Method {
    name: Arc<str>,
    body: Arc<MethodBody>,
}

impl Method {
    /// Create a new method from a closure taking the receiver and arguments
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut dyn Object, &[Value]) -> PrototypeResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            body: Arc::new(body),
        }
    }

    /// Name given when the method was defined
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the method with an explicit receiver
    ///
    /// This is also how an overriding method reaches the version it
    /// replaced: look the method up on the ancestor and call it with the
    /// current receiver.
    pub fn call(&self, this: &mut dyn Object, args: &[Value]) -> PrototypeResult<Value> {
        (self.body)(this, args)
    }

    /// Whether both handles share the same body
    pub fn ptr_eq(&self, other: &Method) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.body) as *const (),
            Arc::as_ptr(&other.body) as *const (),
        )
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Method").field(&self.name()).finish()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[method {}]", self.name)
    }
}
