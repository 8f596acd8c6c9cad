//! Material domain type

use serde::{Deserialize, Serialize};

use crate::id::AssetId;

/// Value of one material uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    /// Scalar float.
    Float(f32),
    /// Two-component float vector.
    Vec2([f32; 2]),
    /// Three-component float vector.
    Vec3([f32; 3]),
    /// Four-component float vector.
    Vec4([f32; 4]),
    /// Scalar integer.
    Int(i32),
    /// Reference to a texture asset.
    Texture(AssetId),
}

/// One named uniform binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uniform {
    /// Uniform name as declared in the program.
    pub name: String,
    /// Bound value.
    pub value: UniformValue,
}

/// A material: a shader program plus the uniform values to bind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// The shader-program asset this material instantiates.
    pub program: AssetId,
    /// Uniform bindings in declaration order.
    pub uniforms: Vec<Uniform>,
}
