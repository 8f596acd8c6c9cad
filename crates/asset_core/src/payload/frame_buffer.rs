//! Frame buffer domain type

use serde::{Deserialize, Serialize};

/// Pixel format of one frame-buffer attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentFormat {
    /// 8-bit RGBA color.
    Rgba8,
    /// 16-bit float RGBA color.
    Rgba16F,
    /// 32-bit float RGBA color.
    Rgba32F,
    /// 24-bit depth.
    Depth24,
    /// 24-bit depth with 8-bit stencil.
    Depth24Stencil8,
    /// 32-bit float depth.
    Depth32F,
}

impl AttachmentFormat {
    /// Whether this format is a depth (or depth-stencil) format.
    pub fn is_depth(self) -> bool {
        matches!(self, Self::Depth24 | Self::Depth24Stencil8 | Self::Depth32F)
    }
}

/// A frame-buffer description: resolution plus attachment formats.
///
/// A frame buffer needs at least one attachment of either flavor to be
/// renderable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Color attachment formats in binding order.
    pub color_attachments: Vec<AttachmentFormat>,
    /// Optional depth (or depth-stencil) attachment.
    pub depth_attachment: Option<AttachmentFormat>,
}
