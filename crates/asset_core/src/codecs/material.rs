//! Material codec (RON)

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::Material;

/// Deserialize a `.mat` file.
pub fn deserialize_material(bytes: &[u8]) -> Deserialized<Material> {
    let mut log = MessageLog::new();
    let Some(material) = parse_ron::<Material>(bytes, &mut log) else {
        return Deserialized::failure(log);
    };

    if material.program.is_empty() {
        log.error("material does not reference a shader program");
        return Deserialized::failure(log);
    }
    let mut seen = std::collections::HashSet::new();
    for uniform in &material.uniforms {
        if !seen.insert(uniform.name.as_str()) {
            log.warning(format!(
                "uniform {:?} is bound more than once, the last binding wins",
                uniform.name
            ));
        }
    }
    Deserialized::success(material, log)
}

/// Serialize a material to `.mat` bytes.
pub fn serialize_material(material: &Material) -> Result<Vec<u8>, CodecError> {
    emit_ron(material)
}
