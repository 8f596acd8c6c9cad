//! File-kind classification by extension
//!
//! The extension table drives [`AssetDatabase::import`]: a file whose
//! extension is not in the table is simply not an asset. Project files
//! and identity markers are recognized (so callers can filter them) but
//! are never imported as assets.
//!
//! [`AssetDatabase::import`]: crate::database::AssetDatabase::import

use std::fmt;

/// The pipeline stage of a shader source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader (`.vert`).
    Vertex,
    /// Tessellation control shader (`.tesc`).
    TessControl,
    /// Tessellation evaluation shader (`.tese`).
    TessEval,
    /// Geometry shader (`.geom`).
    Geometry,
    /// Fragment shader (`.frag`).
    Fragment,
    /// Compute shader (`.comp`).
    Compute,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vertex => "vertex",
            Self::TessControl => "tessellation control",
            Self::TessEval => "tessellation evaluation",
            Self::Geometry => "geometry",
            Self::Fragment => "fragment",
            Self::Compute => "compute",
        };
        write!(f, "{name}")
    }
}

/// Recognized kind of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Project file (`.doa`). Recognized, never imported.
    Project,
    /// Scene (`.scn`).
    Scene,
    /// Script source (`.scrpt`, `.as`). Imported, compiled elsewhere.
    Script,
    /// Texture image (`.png`, `.jpg`, `.jpeg`).
    Texture,
    /// Model (`.mdl`, `.obj`, `.fbx`, `.3ds`). Imported, no codec here.
    Model,
    /// Material (`.mat`).
    Material,
    /// Shader source of one pipeline stage.
    Shader(ShaderStage),
    /// Shader program (`.prog`), linking stage shaders together.
    ShaderProgram,
    /// Component definition (`.ncd`).
    ComponentDefinition,
    /// Sampler description (`.smplr`).
    Sampler,
    /// Frame buffer description (`.fbo`).
    FrameBuffer,
    /// Identity marker sidecar (`.id`). Recognized, never imported.
    IdentityMarker,
}

impl AssetKind {
    /// Classify a file extension (leading dot required, case-insensitive).
    ///
    /// Returns `None` for extensions outside the recognized table.
    pub fn classify(extension: &str) -> Option<Self> {
        let lowered = extension.to_ascii_lowercase();
        let kind = match lowered.as_str() {
            ".doa" => Self::Project,
            ".scn" => Self::Scene,
            ".scrpt" | ".as" => Self::Script,
            ".png" | ".jpg" | ".jpeg" => Self::Texture,
            ".mdl" | ".obj" | ".fbx" | ".3ds" => Self::Model,
            ".mat" => Self::Material,
            ".vert" => Self::Shader(ShaderStage::Vertex),
            ".tesc" => Self::Shader(ShaderStage::TessControl),
            ".tese" => Self::Shader(ShaderStage::TessEval),
            ".geom" => Self::Shader(ShaderStage::Geometry),
            ".frag" => Self::Shader(ShaderStage::Fragment),
            ".comp" => Self::Shader(ShaderStage::Compute),
            ".prog" => Self::ShaderProgram,
            ".ncd" => Self::ComponentDefinition,
            ".smplr" => Self::Sampler,
            ".fbo" => Self::FrameBuffer,
            ".id" => Self::IdentityMarker,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether files of this kind become asset records on import.
    pub fn is_importable(self) -> bool {
        !matches!(self, Self::Project | Self::IdentityMarker)
    }

    /// Whether this kind is a shader source of any stage.
    pub fn is_shader(self) -> bool {
        matches!(self, Self::Shader(_))
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Scene => write!(f, "scene"),
            Self::Script => write!(f, "script"),
            Self::Texture => write!(f, "texture"),
            Self::Model => write!(f, "model"),
            Self::Material => write!(f, "material"),
            Self::Shader(stage) => write!(f, "{stage} shader"),
            Self::ShaderProgram => write!(f, "shader program"),
            Self::ComponentDefinition => write!(f, "component definition"),
            Self::Sampler => write!(f, "sampler"),
            Self::FrameBuffer => write!(f, "frame buffer"),
            Self::IdentityMarker => write!(f, "identity marker"),
        }
    }
}
