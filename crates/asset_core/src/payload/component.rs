//! Component definition domain type

use serde::{Deserialize, Serialize};

/// Type of one field in a component definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Boolean flag.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTF-8 string.
    String,
    /// Two-component float vector.
    Vec2,
    /// Three-component float vector.
    Vec3,
    /// Four-component float vector.
    Vec4,
}

/// One typed field of a component definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub field_type: FieldType,
}

/// A component definition: the schema entities instantiate.
///
/// A definition file may textually contain several definitions; only the
/// first is honored and the rest are flagged with warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Component name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<ComponentField>,
}
