//! Alpha-aware paste.
//!
//! `paste` writes a source buffer into a destination in place. The source is
//! converted to the destination's format first, so every write touches all of
//! the destination's channels. Three mask modes exist:
//!
//! - [`PasteMask::SelfAlpha`]: the source's own alpha drives the blend. Color is
//!   composited in two passes (over the destination's opaque pixels, then into
//!   its transparent ones) and the destination's alpha is restored after the
//!   second pass.
//! - [`PasteMask::External`]: a separate single-channel (or alpha-bearing) mask.
//! - [`PasteMask::None`]: overwrite; with `force`, the source alpha becomes the
//!   destination alpha over the pasted rectangle.
//!
//! Preconditions are checked before the first write. The self-alpha path is not
//! atomic past that point: a failure while restoring alpha leaves the color
//! passes applied. Callers that need atomicity paste into a copy.

use std::borrow::Cow;

use crate::compose::alpha::{extract_alpha, has_alpha, inject_alpha, strip_alpha};
use crate::foundation::buffer::PixelBuffer;
use crate::foundation::core::{PixelRect, Region, Size};
use crate::foundation::error::{TagError, TagResult};

/// Which weights a [`paste`] blends with.
#[derive(Clone, Copy, Debug)]
pub enum PasteMask<'a> {
    /// Use the source's own alpha channel. A source without alpha is overwritten.
    SelfAlpha,
    /// Use a separate mask the size of the source.
    External(&'a PixelBuffer),
    /// Overwrite.
    None,
}

/// Paste `source` into `destination` at `region`.
///
/// `force` has two meanings, following the mode:
/// with [`PasteMask::SelfAlpha`] it enables the transparent-revealing second
/// pass even when the two buffers differ in size; with [`PasteMask::None`] it
/// makes the source alpha authoritative over the pasted rectangle.
pub fn paste(
    destination: &mut PixelBuffer,
    source: &PixelBuffer,
    region: impl Into<Region>,
    mask: PasteMask<'_>,
    force: bool,
) -> TagResult<()> {
    let rect = region.into().resolve(source.size(), "paste")?;
    match mask {
        PasteMask::SelfAlpha if has_alpha(source) => {
            tracing::trace!(?rect, force, "paste: self alpha, two pass");
            paste_self_alpha(destination, source, rect, force)
        }
        PasteMask::SelfAlpha => {
            tracing::trace!(?rect, "paste: self alpha, source is opaque");
            copy_into(destination, source, rect);
            Ok(())
        }
        PasteMask::External(mask) => {
            tracing::trace!(?rect, "paste: external mask");
            let plane = mask_plane("paste", mask, source.size())?;
            blend_into(destination, source, rect, &plane);
            Ok(())
        }
        PasteMask::None => {
            tracing::trace!(?rect, force, "paste: overwrite");
            paste_overwrite(destination, source, rect, force)
        }
    }
}

/// Three-image select: `background` where `mask` is 0, `image` where it is 255,
/// interpolated in between.
pub fn composite(
    image: &PixelBuffer,
    background: &PixelBuffer,
    mask: &PixelBuffer,
) -> TagResult<PixelBuffer> {
    if image.format() != background.format() {
        return Err(TagError::format(format!(
            "composite: image is {:?} but background is {:?}",
            image.format(),
            background.format()
        )));
    }
    if image.size() != background.size() {
        return Err(TagError::size_mismatch(format!(
            "composite: image is {} but background is {}",
            image.size(),
            background.size()
        )));
    }
    let plane = mask_plane("composite", mask, image.size())?;
    let mut out = background.clone();
    let rect = Region::ORIGIN.resolve(image.size(), "composite")?;
    blend_into(&mut out, image, rect, &plane);
    Ok(out)
}

fn paste_self_alpha(
    destination: &mut PixelBuffer,
    source: &PixelBuffer,
    rect: PixelRect,
    force: bool,
) -> TagResult<()> {
    let invert_alpha = if has_alpha(destination) && (destination.size() == source.size() || force)
    {
        let inverted = extract_alpha(destination)?.inverted();
        if inverted.size() == source.size() && rect.left == 0 && rect.top == 0 {
            Some(inverted)
        } else {
            let (right, bottom) = edges(rect)?;
            Some(inverted.crop(rect.left, rect.top, right, bottom)?)
        }
    } else {
        None
    };

    let source_alpha = extract_alpha(source)?;
    let source_rgb = strip_alpha(source);

    // Pass 1: over the pixels the destination already covers.
    blend_into(destination, &source_rgb, rect, &source_alpha);

    if let Some(invert_alpha) = invert_alpha {
        let saved = extract_alpha(destination)?;
        // Pass 2: fill the destination's transparent pixels with source color.
        blend_into(destination, &source_rgb, rect, &invert_alpha);
        inject_alpha(destination, &saved)?;
    }
    Ok(())
}

fn paste_overwrite(
    destination: &mut PixelBuffer,
    source: &PixelBuffer,
    rect: PixelRect,
    force: bool,
) -> TagResult<()> {
    let force_alpha = force && has_alpha(source);
    if force_alpha && !has_alpha(destination) {
        return Err(TagError::format(format!(
            "paste: forced alpha overwrite needs an alpha channel, destination is {:?}",
            destination.format()
        )));
    }

    copy_into(destination, source, rect);

    if force_alpha {
        let mut destination_alpha = extract_alpha(destination)?;
        copy_into(&mut destination_alpha, &extract_alpha(source)?, rect);
        inject_alpha(destination, &destination_alpha)?;
    }
    Ok(())
}

/// Resolve a mask buffer to one weight per source pixel.
fn mask_plane<'m>(
    op: &str,
    mask: &'m PixelBuffer,
    size: Size,
) -> TagResult<Cow<'m, PixelBuffer>> {
    if mask.size() != size {
        return Err(TagError::size_mismatch(format!(
            "{op}: mask is {} but the source is {size}",
            mask.size()
        )));
    }
    if has_alpha(mask) {
        return Ok(Cow::Owned(extract_alpha(mask)?));
    }
    if mask.format().is_single_channel() {
        return Ok(Cow::Borrowed(mask));
    }
    Err(TagError::format(format!(
        "{op}: {:?} cannot be used as a mask",
        mask.format()
    )))
}

fn edges(rect: PixelRect) -> TagResult<(i32, i32)> {
    let right = i32::try_from(rect.right())
        .map_err(|_| TagError::validation("paste: region right edge exceeds i32"))?;
    let bottom = i32::try_from(rect.bottom())
        .map_err(|_| TagError::validation("paste: region bottom edge exceeds i32"))?;
    Ok((right, bottom))
}

/// Part of `rect` that lands inside a destination of size `dst`.
#[derive(Clone, Copy, Debug)]
struct Overlap {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    width: usize,
    height: usize,
}

fn overlap(dst: Size, rect: PixelRect) -> Option<Overlap> {
    let x0 = i64::from(rect.left).max(0);
    let y0 = i64::from(rect.top).max(0);
    let x1 = rect.right().min(i64::from(dst.width));
    let y1 = rect.bottom().min(i64::from(dst.height));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Overlap {
        src_x: (x0 - i64::from(rect.left)) as usize,
        src_y: (y0 - i64::from(rect.top)) as usize,
        dst_x: x0 as usize,
        dst_y: y0 as usize,
        width: (x1 - x0) as usize,
        height: (y1 - y0) as usize,
    })
}

fn in_format<'s>(source: &'s PixelBuffer, like: &PixelBuffer) -> Cow<'s, PixelBuffer> {
    if source.format() == like.format() {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(source.convert(like.format()))
    }
}

fn copy_into(destination: &mut PixelBuffer, source: &PixelBuffer, rect: PixelRect) {
    let Some(o) = overlap(destination.size(), rect) else {
        return;
    };
    let source = in_format(source, destination);
    let n = destination.format().channels();
    let dst_w = destination.width() as usize;
    let src_w = source.width() as usize;
    let span = o.width * n;
    let src_samples = source.samples();
    let dst_samples = destination.samples_mut();
    for row in 0..o.height {
        let s = ((o.src_y + row) * src_w + o.src_x) * n;
        let d = ((o.dst_y + row) * dst_w + o.dst_x) * n;
        dst_samples[d..d + span].copy_from_slice(&src_samples[s..s + span]);
    }
}

/// Masked blend. `plane` is single-channel and the size of `source`.
fn blend_into(
    destination: &mut PixelBuffer,
    source: &PixelBuffer,
    rect: PixelRect,
    plane: &PixelBuffer,
) {
    let Some(o) = overlap(destination.size(), rect) else {
        return;
    };
    let source = in_format(source, destination);
    let n = destination.format().channels();
    let dst_w = destination.width() as usize;
    let src_w = source.width() as usize;
    let weights = plane.samples();
    let src_samples = source.samples();
    let dst_samples = destination.samples_mut();
    for row in 0..o.height {
        for col in 0..o.width {
            let si = (o.src_y + row) * src_w + o.src_x + col;
            let m = weights[si];
            if m == 0 {
                continue;
            }
            let di = ((o.dst_y + row) * dst_w + o.dst_x + col) * n;
            let s = &src_samples[si * n..si * n + n];
            let d = &mut dst_samples[di..di + n];
            if m == 255 {
                d.copy_from_slice(s);
                continue;
            }
            for c in 0..n {
                d[c] = mix(d[c], s[c], m);
            }
        }
    }
}

pub(crate) fn mix(dst: u8, src: u8, m: u8) -> u8 {
    let m = u32::from(m);
    ((u32::from(src) * m + u32::from(dst) * (255 - m) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/paste.rs"]
mod tests;
