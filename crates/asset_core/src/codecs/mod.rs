//! Per-kind content codecs
//!
//! One submodule per asset kind turns raw file bytes into a domain object
//! and back. Deserialization failures are never errors in the `Result`
//! sense: a failed attempt reports `value: None` plus a [`MessageLog`]
//! explaining why, and the caller decides what to surface. `Result` is
//! reserved for serialization, where the input is a live domain object
//! and failure means a bug or an unencodable payload.
//!
//! Text kinds use RON; textures decode through the `image` crate.

mod component;
mod frame_buffer;
mod material;
mod sampler;
mod scene;
mod shader;
mod shader_program;
mod texture;

pub use component::{deserialize_component_definition, serialize_component_definition};
pub use frame_buffer::{deserialize_frame_buffer, serialize_frame_buffer};
pub use material::{deserialize_material, serialize_material};
pub use sampler::{deserialize_sampler, serialize_sampler};
pub use scene::{deserialize_scene, serialize_scene};
pub use shader::{deserialize_shader, serialize_shader};
pub use shader_program::{deserialize_shader_program, serialize_shader_program};
pub use texture::{deserialize_texture, serialize_texture};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::kind::AssetKind;
use crate::message::MessageLog;
use crate::payload::{AssetData, AssetPayload};

/// Serialization failures.
#[derive(Error, Debug)]
pub enum CodecError {
    /// RON emission failed.
    #[error("RON serialization failed: {0}")]
    Ron(#[from] ron::Error),

    /// Image encoding failed.
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Outcome of one deserialization attempt.
///
/// `value` is `Some` exactly when the attempt succeeded; the log may then
/// still carry infos and warnings, but never errors.
#[derive(Debug)]
pub struct Deserialized<T> {
    /// The deserialized domain object, if the attempt succeeded.
    pub value: Option<T>,
    /// Diagnostics of the attempt.
    pub log: MessageLog,
}

impl<T> Deserialized<T> {
    /// A successful outcome.
    pub fn success(value: T, log: MessageLog) -> Self {
        debug_assert!(!log.has_errors());
        Self {
            value: Some(value),
            log,
        }
    }

    /// A failed outcome. The log must explain the failure.
    pub fn failure(log: MessageLog) -> Self {
        debug_assert!(log.has_errors());
        Self { value: None, log }
    }

    /// Whether the attempt produced a value.
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }
}

/// Decode UTF-8 or report a single error message.
fn decode_utf8<'a>(bytes: &'a [u8], log: &mut MessageLog) -> Option<&'a str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(err) => {
            log.error(format!("content is not valid UTF-8: {err}"));
            None
        }
    }
}

/// Parse a RON document or report an error message with its position.
fn parse_ron<T: DeserializeOwned>(bytes: &[u8], log: &mut MessageLog) -> Option<T> {
    let text = decode_utf8(bytes, log)?;
    match ron::from_str::<T>(text) {
        Ok(value) => Some(value),
        Err(err) => {
            log.error(format!(
                "{}:{}: {}",
                err.position.line, err.position.col, err.code
            ));
            None
        }
    }
}

/// Emit a pretty-printed RON document.
fn emit_ron<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    Ok(text.into_bytes())
}

/// Whether a kind has a codec at all.
///
/// Scripts and models are compiled by external subsystems; projects and
/// identity markers are never assets.
pub(crate) fn kind_has_codec(kind: AssetKind) -> bool {
    !matches!(
        kind,
        AssetKind::Project | AssetKind::Script | AssetKind::Model | AssetKind::IdentityMarker
    )
}

/// Deserialize raw bytes for the given recognized kind.
///
/// Returns `None` for kinds without a codec (scripts and models are
/// compiled by external subsystems; projects and identity markers are
/// never assets). Otherwise the returned payload is `Empty` exactly when
/// the attempt failed.
pub(crate) fn deserialize_kind(kind: AssetKind, bytes: &[u8]) -> Option<(AssetData, MessageLog)> {
    fn wrap<T: AssetPayload>(outcome: Deserialized<T>) -> (AssetData, MessageLog) {
        match outcome.value {
            Some(value) => (value.into_data(), outcome.log),
            None => (AssetData::Empty, outcome.log),
        }
    }

    let result = match kind {
        AssetKind::Scene => wrap(deserialize_scene(bytes)),
        AssetKind::ComponentDefinition => wrap(deserialize_component_definition(bytes)),
        AssetKind::Sampler => wrap(deserialize_sampler(bytes)),
        AssetKind::Texture => wrap(deserialize_texture(bytes)),
        AssetKind::Shader(stage) => wrap(deserialize_shader(stage, bytes)),
        AssetKind::ShaderProgram => wrap(deserialize_shader_program(bytes)),
        AssetKind::Material => wrap(deserialize_material(bytes)),
        AssetKind::FrameBuffer => wrap(deserialize_frame_buffer(bytes)),
        AssetKind::Project | AssetKind::Script | AssetKind::Model | AssetKind::IdentityMarker => {
            return None
        }
    };
    Some(result)
}

/// Serialize a payload back to file bytes.
///
/// Returns `None` for the `Empty` payload.
pub(crate) fn serialize_data(data: &AssetData) -> Option<Result<Vec<u8>, CodecError>> {
    let result = match data {
        AssetData::Empty => return None,
        AssetData::Scene(scene) => serialize_scene(scene),
        AssetData::ComponentDefinition(definition) => serialize_component_definition(definition),
        AssetData::Sampler(sampler) => serialize_sampler(sampler),
        AssetData::Texture(texture) => serialize_texture(texture),
        AssetData::Shader(shader) => Ok(serialize_shader(shader)),
        AssetData::ShaderProgram(program) => serialize_shader_program(program),
        AssetData::Material(material) => serialize_material(material),
        AssetData::FrameBuffer(frame_buffer) => serialize_frame_buffer(frame_buffer),
    };
    Some(result)
}
