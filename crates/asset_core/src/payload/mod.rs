//! In-memory domain representations of asset bytes
//!
//! Each asset kind deserializes into one of the domain types below; the
//! [`AssetData`] sum is the payload slot of an asset record. Consumption
//! always goes through the checked accessors (or [`AssetPayload`]) — there
//! is deliberately no unchecked cast.

mod component;
mod frame_buffer;
mod material;
mod sampler;
mod scene;
mod shader;
mod shader_program;
mod texture;

pub use component::{ComponentDefinition, ComponentField, FieldType};
pub use frame_buffer::{AttachmentFormat, FrameBuffer};
pub use material::{Material, Uniform, UniformValue};
pub use sampler::{FilterMode, Sampler, WrapMode};
pub use scene::{Scene, SceneEntity};
pub use shader::Shader;
pub use shader_program::ShaderProgram;
pub use texture::Texture;

/// The deserialized payload of one asset record.
///
/// `Empty` is the state before the first deserialization attempt, after a
/// failed attempt, and after the deserialized data has been deleted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetData {
    /// No deserialized data.
    #[default]
    Empty,
    /// A scene.
    Scene(Scene),
    /// A component definition.
    ComponentDefinition(ComponentDefinition),
    /// A sampler description.
    Sampler(Sampler),
    /// A decoded texture.
    Texture(Texture),
    /// A shader source of one pipeline stage.
    Shader(Shader),
    /// A shader program linking stage shaders.
    ShaderProgram(ShaderProgram),
    /// A material.
    Material(Material),
    /// A frame buffer description.
    FrameBuffer(FrameBuffer),
}

impl AssetData {
    /// Whether no deserialized data is present.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Human-readable name of the active variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Scene(_) => Scene::NAME,
            Self::ComponentDefinition(_) => ComponentDefinition::NAME,
            Self::Sampler(_) => Sampler::NAME,
            Self::Texture(_) => Texture::NAME,
            Self::Shader(_) => Shader::NAME,
            Self::ShaderProgram(_) => ShaderProgram::NAME,
            Self::Material(_) => Material::NAME,
            Self::FrameBuffer(_) => FrameBuffer::NAME,
        }
    }

    /// Checked access to the scene variant.
    pub fn as_scene(&self) -> Option<&Scene> {
        Scene::from_data(self)
    }

    /// Checked access to the component-definition variant.
    pub fn as_component_definition(&self) -> Option<&ComponentDefinition> {
        ComponentDefinition::from_data(self)
    }

    /// Checked access to the sampler variant.
    pub fn as_sampler(&self) -> Option<&Sampler> {
        Sampler::from_data(self)
    }

    /// Checked access to the texture variant.
    pub fn as_texture(&self) -> Option<&Texture> {
        Texture::from_data(self)
    }

    /// Checked access to the shader variant.
    pub fn as_shader(&self) -> Option<&Shader> {
        Shader::from_data(self)
    }

    /// Checked access to the shader-program variant.
    pub fn as_shader_program(&self) -> Option<&ShaderProgram> {
        ShaderProgram::from_data(self)
    }

    /// Checked access to the material variant.
    pub fn as_material(&self) -> Option<&Material> {
        Material::from_data(self)
    }

    /// Checked access to the frame-buffer variant.
    pub fn as_frame_buffer(&self) -> Option<&FrameBuffer> {
        FrameBuffer::from_data(self)
    }
}

/// Implemented by every domain type that can live in [`AssetData`].
///
/// This is the seam the derived-resource machinery builds on: a resource
/// builder names its input domain through this trait, and the cache uses
/// [`from_data`](Self::from_data) as the checked extraction.
pub trait AssetPayload: Clone + PartialEq + Send + Sync + 'static {
    /// Human-readable kind name for diagnostics.
    const NAME: &'static str;

    /// Checked extraction from a payload slot.
    fn from_data(data: &AssetData) -> Option<&Self>;

    /// Wrap this value into a payload slot.
    fn into_data(self) -> AssetData;
}

macro_rules! impl_payload {
    ($ty:ident, $variant:ident, $name:literal) => {
        impl AssetPayload for $ty {
            const NAME: &'static str = $name;

            fn from_data(data: &AssetData) -> Option<&Self> {
                match data {
                    AssetData::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn into_data(self) -> AssetData {
                AssetData::$variant(self)
            }
        }
    };
}

impl_payload!(Scene, Scene, "scene");
impl_payload!(ComponentDefinition, ComponentDefinition, "component definition");
impl_payload!(Sampler, Sampler, "sampler");
impl_payload!(Texture, Texture, "texture");
impl_payload!(Shader, Shader, "shader");
impl_payload!(ShaderProgram, ShaderProgram, "shader program");
impl_payload!(Material, Material, "material");
impl_payload!(FrameBuffer, FrameBuffer, "frame buffer");
