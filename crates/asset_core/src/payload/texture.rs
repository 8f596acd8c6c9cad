//! Texture domain type

/// A decoded texture: tightly packed RGBA8 pixels.
///
/// Source files are PNG or JPEG; decoding always normalizes to RGBA8 for
/// GPU upload, so pixel equality is the texture's equality.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes of RGBA8 data.
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Create a solid-color texture. Useful for placeholders.
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Size of the pixel data in bytes.
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Pixel dumps drown out everything else in debug output.
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
