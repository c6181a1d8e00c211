use crate::draw::shapes::fill_pieslice;
use crate::foundation::buffer::{PixelBuffer, PixelFormat};
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{TagError, TagResult};

/// Downsampling filter used to anti-alias the supersampled corner.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Linear (tent) filter.
    Triangle,
    /// Catmull-Rom cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with a window of 3.
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Triangle => image::imageops::FilterType::Triangle,
            ResampleFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResampleFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Rasterize one `radius` x `radius` corner tile for the upper-left corner.
///
/// The tile is drawn at `supersample` times the target resolution as a 1-bit
/// canvas: fully set, with the quarter disc centered on the canvas' lower-right
/// corner cleared. It is then downsampled with `filter`, so the outer tip reads
/// 255, the disc side 0, and the arc itself comes out as smooth gray.
pub fn rasterize_corner(
    radius: u32,
    supersample: u32,
    filter: ResampleFilter,
) -> TagResult<PixelBuffer> {
    if supersample == 0 {
        return Err(TagError::validation(
            "rasterize_corner: supersample must be >= 1",
        ));
    }
    if radius == 0 {
        return Ok(PixelBuffer::filled_gray(Size::new(0, 0), 255));
    }

    let side = radius.checked_mul(supersample).ok_or_else(|| {
        TagError::validation(format!(
            "rasterize_corner: radius {radius} x supersample {supersample} overflows"
        ))
    })?;
    let mut canvas = PixelBuffer::new(PixelFormat::Binary, side, side, &[255])?;
    let s = f64::from(side);
    fill_pieslice(
        &mut canvas,
        Rect::new(0.0, 0.0, 2.0 * s, 2.0 * s),
        180.0,
        270.0,
        0,
    )?;

    let hi = canvas.convert(PixelFormat::Gray);
    if supersample == 1 {
        return Ok(hi);
    }

    let img = image::GrayImage::from_raw(side, side, hi.into_samples()).ok_or_else(|| {
        TagError::size_mismatch("rasterize_corner: canvas samples do not fit its size")
    })?;
    let small = image::imageops::resize(&img, radius, radius, filter.to_image_filter());
    PixelBuffer::from_raw(PixelFormat::Gray, radius, radius, small.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/mask/corner.rs"]
mod tests;
