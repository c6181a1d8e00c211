//! Bridge between [`PixelBuffer`] and the `image` crate.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::buffer::{PixelBuffer, PixelFormat};
use crate::foundation::error::{TagError, TagResult};

/// Copy a buffer into an `image::DynamicImage`.
///
/// `Binary` buffers become 8-bit luma; every other format maps to the
/// matching 8-bit layout.
pub fn to_dynamic_image(buffer: &PixelBuffer) -> TagResult<image::DynamicImage> {
    let (w, h) = (buffer.width(), buffer.height());
    let samples = buffer.samples().to_vec();
    let img = match buffer.format() {
        PixelFormat::Binary | PixelFormat::Gray => {
            image::GrayImage::from_raw(w, h, samples).map(image::DynamicImage::ImageLuma8)
        }
        PixelFormat::GrayAlpha => {
            image::GrayAlphaImage::from_raw(w, h, samples).map(image::DynamicImage::ImageLumaA8)
        }
        PixelFormat::Color => {
            image::RgbImage::from_raw(w, h, samples).map(image::DynamicImage::ImageRgb8)
        }
        PixelFormat::ColorAlpha => {
            image::RgbaImage::from_raw(w, h, samples).map(image::DynamicImage::ImageRgba8)
        }
    };
    img.ok_or_else(|| TagError::size_mismatch(format!("to_dynamic_image: {w}x{h} buffer")))
}

/// Copy an `image::DynamicImage` into a buffer.
///
/// 8-bit layouts keep their channels; anything else (16-bit, float) is
/// reduced to `ColorAlpha`.
pub fn from_dynamic_image(img: image::DynamicImage) -> TagResult<PixelBuffer> {
    let (w, h) = (img.width(), img.height());
    let (format, samples) = match img {
        image::DynamicImage::ImageLuma8(b) => (PixelFormat::Gray, b.into_raw()),
        image::DynamicImage::ImageLumaA8(b) => (PixelFormat::GrayAlpha, b.into_raw()),
        image::DynamicImage::ImageRgb8(b) => (PixelFormat::Color, b.into_raw()),
        image::DynamicImage::ImageRgba8(b) => (PixelFormat::ColorAlpha, b.into_raw()),
        other => (PixelFormat::ColorAlpha, other.into_rgba8().into_raw()),
    };
    PixelBuffer::from_raw(format, w, h, samples)
}

/// Write a buffer as PNG, creating the parent directory if needed.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> TagResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    to_dynamic_image(buffer)?
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), size = %buffer.size(), "png written");
    Ok(())
}

/// Read any image file the `image` crate decodes.
pub fn read_image(path: &Path) -> TagResult<PixelBuffer> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    from_dynamic_image(img)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
