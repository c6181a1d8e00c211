//! Tagmint renders short strings as rounded-corner tags.
//!
//! A tag is a gray text bitmap clipped by an anti-aliased rounded-rectangle
//! mask, optionally with a hanging hole, returned as an RGBA buffer whose alpha
//! is the mask.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: a [`TextRasterizer`] reports the text size; padding gives the tag size.
//! 2. **Draw**: background, text and hole go into a `Gray` [`PixelBuffer`].
//! 3. **Mask**: [`RoundedMask::build`] makes the corner mask from a supersampled,
//!    downsampled quarter disc.
//! 4. **Clip**: [`composite`] selects between the bitmap and the outside value,
//!    [`with_alpha`] attaches the mask as alpha, and [`paste`] places the tag on
//!    its canvas.
//!
//! All pixel work is on straight (non-premultiplied) 8-bit samples.
//!
//! # Getting started
//!
//! ```no_run
//! use tagmint::{FontRasterizer, TagStyle, render_tag, write_png};
//!
//! # fn main() -> tagmint::TagResult<()> {
//! let style = TagStyle::keychain();
//! let mut text = FontRasterizer::from_file("DejaVuSans.ttf".as_ref(), style.font_size_px)?;
//! let tag = render_tag("hello", &style, &mut text)?;
//! write_png(&tag, "/tmp/hello.png".as_ref())?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod codec;
mod compose;
mod draw;
mod foundation;
mod mask;
mod tag;
mod text;

pub use codec::{from_dynamic_image, read_image, to_dynamic_image, write_png};
pub use compose::alpha::{extract_alpha, has_alpha, inject_alpha, strip_alpha, with_alpha};
pub use compose::paste::{PasteMask, composite, paste};
pub use draw::shapes::{fill_ellipse, fill_pieslice, fill_rect};
pub use foundation::buffer::{PixelBuffer, PixelFormat};
pub use foundation::core::{Flip, PixelRect, Point, Rect, Region, Size, Vec2};
pub use foundation::error::{TagError, TagResult};
pub use mask::corner::{ResampleFilter, rasterize_corner};
pub use mask::rounded::{RoundedMask, build_rounded_mask};
pub use tag::render::render_tag;
pub use tag::style::{Hole, Padding, TagStyle};
pub use text::{FontRasterizer, TextRasterizer};
