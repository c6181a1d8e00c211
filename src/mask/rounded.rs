use crate::compose::paste::{PasteMask, paste};
use crate::draw::shapes::fill_rect;
use crate::foundation::buffer::PixelBuffer;
use crate::foundation::core::{Flip, Rect, Size};
use crate::foundation::error::{TagError, TagResult};
use crate::mask::corner::{ResampleFilter, rasterize_corner};

/// Rounded-rectangle mask settings.
///
/// The built mask is `Gray`: 255 inside the rounded rectangle, 0 outside the
/// corner arcs. `opacity` lowers the cross region to `255 - opacity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoundedMask {
    /// Corner radius in pixels.
    pub radius: u32,
    /// How much of the cross region is hidden (0 = fully visible).
    pub opacity: u8,
    /// Corner supersampling factor.
    pub supersample: u32,
    /// Corner downsampling filter.
    pub filter: ResampleFilter,
}

impl Default for RoundedMask {
    fn default() -> Self {
        Self {
            radius: 20,
            opacity: 0,
            supersample: 2,
            filter: ResampleFilter::default(),
        }
    }
}

impl RoundedMask {
    /// Default settings with the given corner radius.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Set [`RoundedMask::opacity`].
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set [`RoundedMask::supersample`].
    pub fn with_supersample(mut self, supersample: u32) -> Self {
        self.supersample = supersample;
        self
    }

    /// Set [`RoundedMask::filter`].
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build the mask for a `size` rectangle.
    ///
    /// Fails with `InvalidRadius` when `2 * radius` exceeds the shorter side.
    #[tracing::instrument(level = "debug")]
    pub fn build(&self, size: Size) -> TagResult<PixelBuffer> {
        let Size { width, height } = size;
        let radius = self.radius;
        if u64::from(radius) * 2 > u64::from(width.min(height)) {
            return Err(TagError::invalid_radius(format!(
                "build_rounded_mask: radius {radius} does not fit a {size} rectangle \
                 (at most {})",
                width.min(height) / 2
            )));
        }

        // Built in inverted polarity (low = shown) and inverted once at the end.
        let mut cross = PixelBuffer::filled_gray(size, 0);
        let (w, h, r) = (f64::from(width), f64::from(height), f64::from(radius));
        fill_rect(&mut cross, Rect::new(r, 0.0, w - r + 1.0, h), self.opacity)?;
        fill_rect(&mut cross, Rect::new(0.0, r, w, h - r + 1.0), self.opacity)?;

        if radius > 0 {
            let corner = rasterize_corner(radius, self.supersample, self.filter)?;
            let far_x = offset(width - radius)?;
            let far_y = offset(height - radius)?;
            let tiles = [
                (0, 0, corner.clone()),
                (far_x, 0, corner.flipped(Flip::Horizontal)),
                (0, far_y, corner.flipped(Flip::Vertical)),
                (
                    far_x,
                    far_y,
                    corner.flipped(Flip::Horizontal).flipped(Flip::Vertical),
                ),
            ];
            for (x, y, tile) in &tiles {
                paste(&mut cross, tile, (*x, *y), PasteMask::None, false)?;
            }
        }

        tracing::debug!(%size, radius, "rounded mask assembled");
        Ok(cross.inverted())
    }
}

/// Build a rounded-rectangle mask with default supersampling and filter.
pub fn build_rounded_mask(
    width: u32,
    height: u32,
    radius: u32,
    opacity: u8,
) -> TagResult<PixelBuffer> {
    RoundedMask::new(radius)
        .with_opacity(opacity)
        .build(Size::new(width, height))
}

fn offset(v: u32) -> TagResult<i32> {
    i32::try_from(v)
        .map_err(|_| TagError::validation(format!("build_rounded_mask: offset {v} exceeds i32")))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/rounded.rs"]
mod tests;
