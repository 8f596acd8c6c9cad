//! Sampler codec (RON)

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::Sampler;

/// Deserialize a `.smplr` file.
pub fn deserialize_sampler(bytes: &[u8]) -> Deserialized<Sampler> {
    let mut log = MessageLog::new();
    match parse_ron::<Sampler>(bytes, &mut log) {
        Some(sampler) => Deserialized::success(sampler, log),
        None => Deserialized::failure(log),
    }
}

/// Serialize a sampler to `.smplr` bytes.
pub fn serialize_sampler(sampler: &Sampler) -> Result<Vec<u8>, CodecError> {
    emit_ron(sampler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{FilterMode, WrapMode};

    #[test]
    fn test_round_trip() {
        let sampler = Sampler {
            min_filter: FilterMode::Nearest,
            mag_filter: FilterMode::Linear,
            wrap_u: WrapMode::ClampToEdge,
            wrap_v: WrapMode::MirroredRepeat,
            wrap_w: WrapMode::Repeat,
        };
        let bytes = serialize_sampler(&sampler).expect("serialize");
        let out = deserialize_sampler(&bytes);
        assert_eq!(out.value, Some(sampler));
        assert!(out.log.is_empty());
    }

    #[test]
    fn test_malformed_input_fails() {
        let out = deserialize_sampler(b"(min_filter: Sideways)");
        assert!(!out.is_success());
        assert!(out.log.has_errors());
    }
}
