//! Frame buffer codec (RON)

use super::{emit_ron, parse_ron, CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::FrameBuffer;

/// Deserialize a `.fbo` file.
pub fn deserialize_frame_buffer(bytes: &[u8]) -> Deserialized<FrameBuffer> {
    let mut log = MessageLog::new();
    let Some(frame_buffer) = parse_ron::<FrameBuffer>(bytes, &mut log) else {
        return Deserialized::failure(log);
    };

    if frame_buffer.width == 0 || frame_buffer.height == 0 {
        log.error(format!(
            "invalid resolution {}x{}",
            frame_buffer.width, frame_buffer.height
        ));
    }
    if frame_buffer.color_attachments.is_empty() && frame_buffer.depth_attachment.is_none() {
        log.error("frame buffer has no attachments");
    }
    for format in &frame_buffer.color_attachments {
        if format.is_depth() {
            log.error(format!("depth format {format:?} in a color attachment slot"));
        }
    }
    if let Some(depth) = frame_buffer.depth_attachment {
        if !depth.is_depth() {
            log.error(format!("color format {depth:?} in the depth attachment slot"));
        }
    }

    if log.has_errors() {
        return Deserialized::failure(log);
    }
    Deserialized::success(frame_buffer, log)
}

/// Serialize a frame buffer to `.fbo` bytes.
pub fn serialize_frame_buffer(frame_buffer: &FrameBuffer) -> Result<Vec<u8>, CodecError> {
    emit_ron(frame_buffer)
}
