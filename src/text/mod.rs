//! Text rasterization collaborator.
//!
//! The tag renderer only needs to know how big a string is and to get its
//! coverage blended into a `Gray` buffer. Anything that can do that implements
//! [`TextRasterizer`]; [`FontRasterizer`] is the font-file backed one.

use crate::foundation::buffer::PixelBuffer;
use crate::foundation::core::Size;
use crate::foundation::error::TagResult;

pub(crate) mod font;

pub use font::FontRasterizer;

/// Measures strings and draws them into single-channel buffers.
pub trait TextRasterizer {
    /// Pixel size the string occupies when drawn.
    fn measure(&mut self, text: &str) -> TagResult<Size>;

    /// Draw `text` with its layout origin at `(x, y)`, blending `fill` into
    /// `target` by glyph coverage.
    fn draw(&mut self, target: &mut PixelBuffer, x: i32, y: i32, text: &str, fill: u8)
    -> TagResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
