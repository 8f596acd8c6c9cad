//! Shader source codec
//!
//! Shaders are stored as raw GLSL text. Real compilation happens in the
//! backend's resource builder; this codec only runs the cheap structural
//! checks that catch truncated or obviously broken sources before any
//! GPU work is attempted.

use super::{decode_utf8, Deserialized};
use crate::kind::ShaderStage;
use crate::message::MessageLog;
use crate::payload::Shader;

/// Deserialize a shader source file for the given pipeline stage.
pub fn deserialize_shader(stage: ShaderStage, bytes: &[u8]) -> Deserialized<Shader> {
    let mut log = MessageLog::new();
    let Some(source) = decode_utf8(bytes, &mut log) else {
        return Deserialized::failure(log);
    };

    if source.trim().is_empty() {
        log.error(format!("{stage} shader source is empty"));
        return Deserialized::failure(log);
    }

    check_braces(source, &mut log);
    if !source.contains("void main") {
        log.error(format!("{stage} shader has no `void main` entry point"));
    }
    if !source.lines().any(|line| line.trim_start().starts_with("#version")) {
        log.warning("no #version directive, the backend default is assumed");
    }

    if log.has_errors() {
        return Deserialized::failure(log);
    }
    Deserialized::success(
        Shader {
            stage,
            source: source.to_string(),
        },
        log,
    )
}

/// Check brace balance, reporting the line of the first mismatch.
fn check_braces(source: &str, log: &mut MessageLog) {
    let mut depth: i64 = 0;
    let mut last_open_line = 0usize;
    for (index, line) in source.lines().enumerate() {
        for character in line.chars() {
            match character {
                '{' => {
                    depth += 1;
                    last_open_line = index + 1;
                }
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        log.error(format!("{}: unmatched closing brace", index + 1));
                        return;
                    }
                }
                _ => {}
            }
        }
    }
    if depth > 0 {
        log.error(format!(
            "{last_open_line}: unclosed brace opened here ({depth} unclosed)"
        ));
    }
}

/// Serialize a shader back to its raw source bytes.
pub fn serialize_shader(shader: &Shader) -> Vec<u8> {
    shader.source.clone().into_bytes()
}
