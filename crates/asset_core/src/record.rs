//! One imported asset

use crate::file_tree::FileKey;
use crate::id::AssetId;
use crate::kind::AssetKind;
use crate::message::MessageLog;
use crate::payload::AssetData;

/// One imported asset: stable identity, back-reference to its file,
/// deserialized payload, version counter, and the diagnostics of the
/// latest deserialization attempt.
///
/// Records are owned by the [`AssetDatabase`]; all mutating lifecycle
/// operations (serialize, deserialize, delete, ...) live there because
/// they touch the file tree and the derived-resource caches as well.
/// Everything on the record itself is a pure query.
///
/// [`AssetDatabase`]: crate::database::AssetDatabase
#[derive(Debug)]
pub struct AssetRecord {
    pub(crate) id: AssetId,
    pub(crate) file: FileKey,
    pub(crate) kind: AssetKind,
    pub(crate) data: AssetData,
    pub(crate) version: u64,
    pub(crate) info_log: MessageLog,
    pub(crate) warning_log: MessageLog,
    pub(crate) error_log: MessageLog,
}

impl AssetRecord {
    pub(crate) fn new(id: AssetId, file: FileKey, kind: AssetKind) -> Self {
        Self {
            id,
            file,
            kind,
            data: AssetData::Empty,
            version: 0,
            info_log: MessageLog::new(),
            warning_log: MessageLog::new(),
            error_log: MessageLog::new(),
        }
    }

    /// Stable identity of this asset.
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Non-owning reference to the asset's file node.
    pub fn file(&self) -> FileKey {
        self.file
    }

    /// Recognized kind, classified from the file extension at import.
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// The current payload.
    pub fn data(&self) -> &AssetData {
        &self.data
    }

    /// Monotonic version counter, bumped on every successful
    /// deserialization and on payload updates.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the record holds usable deserialized data.
    ///
    /// A payload shadowed by error messages does not count: it may be
    /// inspected through [`data`](Self::data) but must not be treated as
    /// deserialized.
    pub fn has_deserialized_data(&self) -> bool {
        !self.data.is_empty() && self.error_log.is_empty()
    }

    /// Whether the latest attempt produced info messages.
    pub fn has_info_messages(&self) -> bool {
        !self.info_log.is_empty()
    }

    /// Whether the latest attempt produced warnings.
    pub fn has_warning_messages(&self) -> bool {
        !self.warning_log.is_empty()
    }

    /// Whether the latest attempt produced errors.
    pub fn has_error_messages(&self) -> bool {
        !self.error_log.is_empty()
    }

    /// Info messages of the latest attempt.
    pub fn info_messages(&self) -> &MessageLog {
        &self.info_log
    }

    /// Warnings of the latest attempt.
    pub fn warning_messages(&self) -> &MessageLog {
        &self.warning_log
    }

    /// Errors of the latest attempt.
    pub fn error_messages(&self) -> &MessageLog {
        &self.error_log
    }

    /// Whether the payload is a scene.
    pub fn is_scene(&self) -> bool {
        self.data.as_scene().is_some()
    }

    /// Whether the payload is a component definition.
    pub fn is_component_definition(&self) -> bool {
        self.data.as_component_definition().is_some()
    }

    /// Whether the payload is a sampler.
    pub fn is_sampler(&self) -> bool {
        self.data.as_sampler().is_some()
    }

    /// Whether the payload is a texture.
    pub fn is_texture(&self) -> bool {
        self.data.as_texture().is_some()
    }

    /// Whether the payload is a shader.
    pub fn is_shader(&self) -> bool {
        self.data.as_shader().is_some()
    }

    /// Whether the payload is a shader program.
    pub fn is_shader_program(&self) -> bool {
        self.data.as_shader_program().is_some()
    }

    /// Whether the payload is a material.
    pub fn is_material(&self) -> bool {
        self.data.as_material().is_some()
    }

    /// Whether the payload is a frame buffer.
    pub fn is_frame_buffer(&self) -> bool {
        self.data.as_frame_buffer().is_some()
    }

    /// Store a deserialization outcome: payload plus partitioned logs.
    pub(crate) fn apply_outcome(&mut self, data: AssetData, log: MessageLog) {
        let succeeded = !data.is_empty();
        let (infos, warnings, errors) = log.partition();
        self.info_log = infos;
        self.warning_log = warnings;
        self.error_log = errors;
        self.data = data;
        if succeeded {
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ShaderStage;
    use crate::payload::{AssetPayload, Scene};
    use crate::message::Severity;

    fn record() -> AssetRecord {
        AssetRecord::new(
            AssetId::from_raw(1),
            FileKey::default(),
            AssetKind::Scene,
        )
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = record();
        assert!(record.data().is_empty());
        assert!(!record.has_deserialized_data());
        assert_eq!(record.version(), 0);
        assert!(!record.is_scene());
    }

    #[test]
    fn test_successful_outcome_bumps_version_and_sets_logs() {
        let mut record = record();
        let mut log = MessageLog::new();
        log.info("scene with 0 entities");
        record.apply_outcome(Scene::named("main").into_data(), log);

        assert!(record.has_deserialized_data());
        assert!(record.is_scene());
        assert!(record.has_info_messages());
        assert!(!record.has_error_messages());
        assert_eq!(record.version(), 1);
    }

    #[test]
    fn test_failed_outcome_keeps_version_and_payload_empty() {
        let mut record = record();
        let mut log = MessageLog::new();
        log.error("1:1: unexpected token");
        record.apply_outcome(AssetData::Empty, log);

        assert!(!record.has_deserialized_data());
        assert!(record.has_error_messages());
        assert_eq!(record.version(), 0);
        assert_eq!(
            record.error_messages().messages()[0].severity,
            Severity::Error
        );
    }

    #[test]
    fn test_error_messages_shadow_stale_payload() {
        let mut record = record();
        record.apply_outcome(Scene::named("main").into_data(), MessageLog::new());
        assert!(record.has_deserialized_data());

        // A later failed attempt leaves diagnostics; even if a payload
        // were still present it must not count as deserialized.
        let mut log = MessageLog::new();
        log.error("disk went away");
        let (infos, warnings, errors) = log.partition();
        record.info_log = infos;
        record.warning_log = warnings;
        record.error_log = errors;
        assert!(!record.has_deserialized_data());
        assert!(record.data().as_scene().is_some());
    }

    #[test]
    fn test_kind_predicates_follow_payload_tag() {
        let mut record = AssetRecord::new(
            AssetId::from_raw(2),
            FileKey::default(),
            AssetKind::Shader(ShaderStage::Fragment),
        );
        assert!(!record.is_shader());
        record.apply_outcome(
            crate::payload::Shader {
                stage: ShaderStage::Fragment,
                source: "void main() {}".to_string(),
            }
            .into_data(),
            MessageLog::new(),
        );
        assert!(record.is_shader());
        assert!(!record.is_texture());
    }
}
