//! Alpha plane extraction, injection and removal.
//!
//! An alpha plane is a plain `Gray` [`PixelBuffer`] holding a copy of another
//! buffer's alpha samples. Planes never alias their source.

use crate::foundation::buffer::{PixelBuffer, PixelFormat};
use crate::foundation::error::{TagError, TagResult};

/// True iff the buffer's format is `GrayAlpha` or `ColorAlpha`.
pub fn has_alpha(buffer: &PixelBuffer) -> bool {
    buffer.format().has_alpha()
}

/// Copy the alpha channel out as a `Gray` buffer.
pub fn extract_alpha(buffer: &PixelBuffer) -> TagResult<PixelBuffer> {
    let Some(ai) = buffer.format().alpha_index() else {
        return Err(TagError::format(format!(
            "extract_alpha: {:?} has no alpha channel",
            buffer.format()
        )));
    };
    let n = buffer.format().channels();
    let plane = buffer.samples().chunks_exact(n).map(|px| px[ai]).collect();
    PixelBuffer::from_raw(PixelFormat::Gray, buffer.width(), buffer.height(), plane)
}

/// Overwrite the alpha channel of `buffer` with `plane` in place.
///
/// `plane` must be a single-channel buffer of the same size.
pub fn inject_alpha(buffer: &mut PixelBuffer, plane: &PixelBuffer) -> TagResult<()> {
    let Some(ai) = buffer.format().alpha_index() else {
        return Err(TagError::format(format!(
            "inject_alpha: {:?} has no alpha channel",
            buffer.format()
        )));
    };
    check_plane("inject_alpha", buffer, plane)?;

    let n = buffer.format().channels();
    for (px, &a) in buffer
        .samples_mut()
        .chunks_exact_mut(n)
        .zip(plane.samples())
    {
        px[ai] = a;
    }
    Ok(())
}

/// Copy of `buffer` in the equivalent format without alpha.
pub fn strip_alpha(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.convert(buffer.format().without_alpha())
}

/// Copy of `buffer` in the equivalent alpha-bearing format, using `plane` as alpha.
pub fn with_alpha(buffer: &PixelBuffer, plane: &PixelBuffer) -> TagResult<PixelBuffer> {
    check_plane("with_alpha", buffer, plane)?;
    let mut out = buffer.convert(buffer.format().with_alpha());
    inject_alpha(&mut out, plane)?;
    Ok(out)
}

fn check_plane(op: &str, buffer: &PixelBuffer, plane: &PixelBuffer) -> TagResult<()> {
    if !plane.format().is_single_channel() {
        return Err(TagError::format(format!(
            "{op}: alpha plane must be Gray or Binary, got {:?}",
            plane.format()
        )));
    }
    if plane.size() != buffer.size() {
        return Err(TagError::size_mismatch(format!(
            "{op}: alpha plane is {} but the buffer is {}",
            plane.size(),
            buffer.size()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/alpha.rs"]
mod tests;
