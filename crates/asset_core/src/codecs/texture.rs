//! Texture codec (PNG/JPEG via the `image` crate)

use std::io::Cursor;

use super::{CodecError, Deserialized};
use crate::message::MessageLog;
use crate::payload::Texture;

/// Deserialize an image file into RGBA8 pixel data.
pub fn deserialize_texture(bytes: &[u8]) -> Deserialized<Texture> {
    let mut log = MessageLog::new();
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            log.error(format!("image decode failed: {err}"));
            return Deserialized::failure(log);
        }
    };

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log.info(format!("decoded {width}x{height} RGBA8"));
    if !width.is_power_of_two() || !height.is_power_of_two() {
        log.warning(format!(
            "dimensions {width}x{height} are not powers of two, mipmapping may be unavailable"
        ));
    }

    Deserialized::success(
        Texture {
            width,
            height,
            pixels: rgba.into_raw(),
        },
        log,
    )
}

/// Serialize a texture to PNG bytes.
///
/// PNG regardless of the source container: the payload only keeps decoded
/// pixels, so the original encoding is gone by the time we serialize.
pub fn serialize_texture(texture: &Texture) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    let image = image::RgbaImage::from_raw(texture.width, texture.height, texture.pixels.clone())
        .ok_or_else(|| {
            image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))
        })?;
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
