//! Shader program domain type

use serde::{Deserialize, Serialize};

use crate::id::AssetId;

/// A shader program: references to the stage shaders it links together.
///
/// Vertex and fragment stages are mandatory; the three optional stages
/// may be absent. The references are asset identities, so a program file
/// survives its shaders being moved or renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderProgram {
    /// Display name of the program.
    pub name: String,
    /// Vertex shader asset.
    pub vertex_shader: AssetId,
    /// Tessellation control shader asset, if any.
    pub tess_control_shader: Option<AssetId>,
    /// Tessellation evaluation shader asset, if any.
    pub tess_eval_shader: Option<AssetId>,
    /// Geometry shader asset, if any.
    pub geometry_shader: Option<AssetId>,
    /// Fragment shader asset.
    pub fragment_shader: AssetId,
}

impl ShaderProgram {
    /// The stage references present on this program, in pipeline order.
    pub fn linked_shaders(&self) -> impl Iterator<Item = AssetId> + '_ {
        [
            Some(self.vertex_shader),
            self.tess_control_shader,
            self.tess_eval_shader,
            self.geometry_shader,
            Some(self.fragment_shader),
        ]
        .into_iter()
        .flatten()
    }
}
