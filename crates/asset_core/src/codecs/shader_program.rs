//! Shader program codec (RON)

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::ShaderProgram;

/// Deserialize a `.prog` file.
///
/// Vertex and fragment references are mandatory; a program without them
/// cannot link and the attempt fails.
pub fn deserialize_shader_program(bytes: &[u8]) -> Deserialized<ShaderProgram> {
    let mut log = MessageLog::new();
    let Some(program) = parse_ron::<ShaderProgram>(bytes, &mut log) else {
        return Deserialized::failure(log);
    };

    if program.vertex_shader.is_empty() {
        log.error("program does not reference a vertex shader");
    }
    if program.fragment_shader.is_empty() {
        log.error("program does not reference a fragment shader");
    }
    if program.tess_control_shader.is_some() != program.tess_eval_shader.is_some() {
        log.warning("only one of the two tessellation stages is referenced");
    }

    if log.has_errors() {
        return Deserialized::failure(log);
    }
    Deserialized::success(program, log)
}

/// Serialize a shader program to `.prog` bytes.
pub fn serialize_shader_program(program: &ShaderProgram) -> Result<Vec<u8>, CodecError> {
    emit_ron(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::AssetId;

    fn program() -> ShaderProgram {
        ShaderProgram {
            name: "lit".to_string(),
            vertex_shader: AssetId::from_raw(1),
            tess_control_shader: None,
            tess_eval_shader: None,
            geometry_shader: None,
            fragment_shader: AssetId::from_raw(2),
        }
    }

    #[test]
    fn test_round_trip() {
        let bytes = serialize_shader_program(&program()).expect("serialize");
        let out = deserialize_shader_program(&bytes);
        assert_eq!(out.value, Some(program()));
    }

    #[test]
    fn test_missing_mandatory_stage_is_an_error() {
        let mut broken = program();
        broken.fragment_shader = AssetId::EMPTY;
        let bytes = serialize_shader_program(&broken).expect("serialize");
        let out = deserialize_shader_program(&bytes);
        assert!(!out.is_success());
        assert!(out.log.has_errors());
    }

    #[test]
    fn test_lone_tessellation_stage_warns() {
        let mut lopsided = program();
        lopsided.tess_control_shader = Some(AssetId::from_raw(3));
        let bytes = serialize_shader_program(&lopsided).expect("serialize");
        let out = deserialize_shader_program(&bytes);
        assert!(out.is_success());
        assert!(out.log.has_warnings());
    }
}
