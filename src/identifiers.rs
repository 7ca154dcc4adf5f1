// Copyright 2025 Cowboy AI, LLC.

//! Identity tokens for prototypes and instances

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prototype ID - the identity of one frozen prototype
///
/// Ancestry sets are sets of these tokens, so two prototypes with identical
/// properties are still different features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrototypeId(Uuid);

impl PrototypeId {
    /// Reserved token of the root prototype
    pub const ROOT: PrototypeId = PrototypeId(Uuid::nil());

    /// Create a new random prototype ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Whether this is the root prototype's token
    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

impl Default for PrototypeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PrototypeId> for Uuid {
    fn from(id: PrototypeId) -> Self {
        id.0
    }
}

impl From<&PrototypeId> for Uuid {
    fn from(id: &PrototypeId) -> Self {
        id.0
    }
}

/// Instance ID - the identity of one mutable instance
///
/// Instances are never features, so this token never appears in an
/// ancestry set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a new random instance ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<InstanceId> for Uuid {
    fn from(id: InstanceId) -> Self {
        id.0
    }
}

/// Identity of any object, prototype or instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectId {
    /// A frozen prototype
    Prototype(PrototypeId),
    /// A mutable instance
    Instance(InstanceId),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Prototype(id) => write!(f, "prototype:{id}"),
            ObjectId::Instance(id) => write!(f, "instance:{id}"),
        }
    }
}
