// Copyright 2025 Cowboy AI, LLC.

//! # CIM Prototype
//!
//! Prototypal object composition for the Composable Information Machine.
//!
//! This crate provides a small object algebra:
//! - **Prototype**: a frozen template composed from a base, mixins and own properties
//! - **Composer**: merges sources into a new prototype (`extend`)
//! - **Instance**: a mutable object delegating to a prototype (`new`)
//! - **Features**: ancestry queries answering which prototypes an object was built from
//! - **Base**: the root prototype every composition starts from
//!
//! ## Design Principles
//!
//! 1. **Structural Immutability**: prototypes have no mutation path; writes fail
//! 2. **Single Delegation**: one parent per object, mixins are flattened
//! 3. **Explicit Ancestry**: feature membership is a set of identity tokens
//! 4. **Late Binding**: methods receive their receiver at call time
//!
//! ## Example
//!
//! ```
//! use cim_prototype::{base, Object, PropertyBag, Value};
//!
//! let hex = base().extend_with(PropertyBag::new().method("hex", |this, _args| {
//!     Ok(Value::from(format!("#{}", this.get_str("color")?)))
//! }));
//! let color = base().extend(
//!     &[&hex],
//!     PropertyBag::new().method("initialize", |this, args| {
//!         this.set("color", args[0].clone())?;
//!         Ok(Value::Undefined)
//!     }),
//! );
//!
//! let mut red = color.new(&[Value::from("FF0000")]).unwrap();
//! assert_eq!(red.invoke("hex", &[]).unwrap(), Value::from("#FF0000"));
//! assert!(red.has_feature(&hex));
//! assert!(color.is_prototype_of(&red));
//! ```

#![warn(missing_docs)]

mod composer;
mod config;
mod errors;
mod identifiers;
mod instance;
mod method;
mod object;
mod properties;
mod prototype;
mod value;

pub use composer::Composer;
pub use config::{FactoryConfig, DEFAULT_INITIALIZER};
pub use errors::{MutationKind, PrototypeError, PrototypeResult};
pub use identifiers::{InstanceId, ObjectId, PrototypeId};
pub use instance::Instance;
pub use method::Method;
pub use object::Object;
pub use properties::PropertyBag;
pub use prototype::{base, Ancestry, Prototype};
pub use value::Value;
