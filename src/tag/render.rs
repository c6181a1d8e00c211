use crate::compose::alpha::with_alpha;
use crate::compose::paste::{PasteMask, composite, paste};
use crate::draw::shapes::fill_ellipse;
use crate::foundation::buffer::{PixelBuffer, PixelFormat};
use crate::foundation::core::{Region, Size};
use crate::foundation::error::{TagError, TagResult};
use crate::tag::style::TagStyle;
use crate::text::TextRasterizer;

/// Render `text` as a rounded tag.
///
/// Returns a `ColorAlpha` buffer: the tag at the origin, its alpha taken from
/// the rounded mask (and the hole, when the style has one), everything else
/// transparent.
#[tracing::instrument(skip(style, rasterizer))]
pub fn render_tag(
    text: &str,
    style: &TagStyle,
    rasterizer: &mut dyn TextRasterizer,
) -> TagResult<PixelBuffer> {
    style.validate()?;

    let text_size = rasterizer.measure(text)?;
    let size = tag_size(text_size, style)?;
    tracing::debug!(%text_size, %size, "tag laid out");

    let mut bitmap = PixelBuffer::filled_gray(size, style.background);
    rasterizer.draw(
        &mut bitmap,
        to_i32(style.padding.left)?,
        to_i32(style.padding.top)?,
        text,
        style.text_fill,
    )?;

    let mut mask = style.mask.build(size)?;
    if let Some(hole) = style.hole {
        let bounds = hole.bounds(size);
        fill_ellipse(&mut bitmap, bounds, 0)?;
        fill_ellipse(&mut mask, bounds, 0)?;
    }

    let outside = PixelBuffer::filled_gray(size, style.outside);
    let clipped = composite(&bitmap, &outside, &mask)?;
    let tag = with_alpha(&clipped, &mask)?;

    let canvas_size = style.canvas.map_or(size, |c| c.max(size));
    let mut canvas = PixelBuffer::transparent(PixelFormat::ColorAlpha, canvas_size)?;
    paste(&mut canvas, &tag, Region::ORIGIN, PasteMask::None, true)?;
    Ok(canvas)
}

fn tag_size(text: Size, style: &TagStyle) -> TagResult<Size> {
    let p = style.padding;
    let width = text
        .width
        .checked_add(p.left)
        .and_then(|v| v.checked_add(p.right));
    let height = text
        .height
        .checked_add(p.top)
        .and_then(|v| v.checked_add(p.bottom));
    match (width, height) {
        (Some(w), Some(h)) => Ok(Size::new(w, h)),
        _ => Err(TagError::validation("render_tag: tag size overflows")),
    }
}

fn to_i32(v: u32) -> TagResult<i32> {
    i32::try_from(v).map_err(|_| TagError::validation(format!("render_tag: {v} exceeds i32")))
}

#[cfg(test)]
#[path = "../../tests/unit/tag/render.rs"]
mod tests;
