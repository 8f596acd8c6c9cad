//! Shader domain type

use crate::kind::ShaderStage;

/// A shader: one pipeline stage plus its GLSL source text.
///
/// The stage comes from the file extension, not the source, so it is part
/// of the payload rather than re-derived downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    /// Pipeline stage this source targets.
    pub stage: ShaderStage,
    /// UTF-8 source text.
    pub source: String,
}
