use std::path::Path;

use anyhow::Context as _;

use crate::compose::paste::mix;
use crate::foundation::buffer::PixelBuffer;
use crate::foundation::core::Size;
use crate::foundation::error::{TagError, TagResult};
use crate::text::TextRasterizer;

/// [`TextRasterizer`] backed by one font: Parley shapes, vello_cpu rasterizes.
///
/// The font is registered once at construction and only read afterwards.
pub struct FontRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font: vello_cpu::peniko::FontData,
    family_name: String,
    size_px: f32,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer")
            .field("family_name", &self.family_name)
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

impl FontRasterizer {
    /// Register font bytes (TTF/OTF) and rasterize at `size_px`.
    pub fn from_bytes(font_bytes: Vec<u8>, size_px: f32) -> TagResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TagError::validation(
                "font size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TagError::text("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TagError::text("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, size_px, "font registered");

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font,
            family_name,
            size_px,
        })
    }

    /// Read a font file and register it.
    pub fn from_file(path: &Path, size_px: f32) -> TagResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes, size_px)
    }

    /// Family name detected in the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    fn layout(&mut self, text: &str) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextRasterizer for FontRasterizer {
    fn measure(&mut self, text: &str) -> TagResult<Size> {
        let layout = self.layout(text);
        Ok(Size::new(
            layout.width().ceil().max(0.0) as u32,
            layout.height().ceil().max(0.0) as u32,
        ))
    }

    fn draw(
        &mut self,
        target: &mut PixelBuffer,
        x: i32,
        y: i32,
        text: &str,
        fill: u8,
    ) -> TagResult<()> {
        if !target.format().is_single_channel() {
            return Err(TagError::format(format!(
                "draw_text: expects a Gray target, got {:?}",
                target.format()
            )));
        }
        if target.size().is_empty() || text.is_empty() {
            return Ok(());
        }
        let width: u16 = target
            .width()
            .try_into()
            .map_err(|_| TagError::text("draw_text: target width exceeds u16"))?;
        let height: u16 = target
            .height()
            .try_into()
            .map_err(|_| TagError::text("draw_text: target height exceeds u16"))?;

        let layout = self.layout(text);
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        // White paint: premultiplied alpha is the glyph coverage.
        let coverage = pixmap.data_as_u8_slice();
        for (px, rgba) in target
            .samples_mut()
            .iter_mut()
            .zip(coverage.chunks_exact(4))
        {
            *px = mix(*px, fill, rgba[3]);
        }
        Ok(())
    }
}
