//! Scene codec (RON)

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::Scene;

/// Deserialize a `.scn` file.
pub fn deserialize_scene(bytes: &[u8]) -> Deserialized<Scene> {
    let mut log = MessageLog::new();
    let Some(scene) = parse_ron::<Scene>(bytes, &mut log) else {
        return Deserialized::failure(log);
    };
    if scene.name.is_empty() {
        log.warning("scene has no name");
    }
    log.info(format!("scene with {} entities", scene.entities.len()));
    Deserialized::success(scene, log)
}

/// Serialize a scene to `.scn` bytes.
pub fn serialize_scene(scene: &Scene) -> Result<Vec<u8>, CodecError> {
    emit_ron(scene)
}
