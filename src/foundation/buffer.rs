use crate::foundation::core::{Flip, Size};
use crate::foundation::error::{TagError, TagResult};

/// Sample layout of a [`PixelBuffer`].
///
/// Every format stores one byte per channel. `Binary` stores `0` or `255`.
/// Alpha is straight (not premultiplied) and always the last channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 1-bit image stored as one byte per pixel (`0` or `255`).
    Binary,
    /// 8-bit grayscale.
    Gray,
    /// 8-bit grayscale plus alpha.
    GrayAlpha,
    /// 8-bit RGB.
    Color,
    /// 8-bit RGB plus alpha.
    ColorAlpha,
}

impl PixelFormat {
    /// Samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Binary | PixelFormat::Gray => 1,
            PixelFormat::GrayAlpha => 2,
            PixelFormat::Color => 3,
            PixelFormat::ColorAlpha => 4,
        }
    }

    /// True for `GrayAlpha` and `ColorAlpha`.
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::GrayAlpha | PixelFormat::ColorAlpha)
    }

    /// Index of the alpha sample inside a pixel, if any.
    pub const fn alpha_index(self) -> Option<usize> {
        match self {
            PixelFormat::GrayAlpha => Some(1),
            PixelFormat::ColorAlpha => Some(3),
            _ => None,
        }
    }

    /// The equivalent format without an alpha channel.
    pub const fn without_alpha(self) -> Self {
        match self {
            PixelFormat::GrayAlpha => PixelFormat::Gray,
            PixelFormat::ColorAlpha => PixelFormat::Color,
            other => other,
        }
    }

    /// The equivalent format with an alpha channel. `Binary` widens to `GrayAlpha`.
    pub const fn with_alpha(self) -> Self {
        match self {
            PixelFormat::Binary | PixelFormat::Gray | PixelFormat::GrayAlpha => {
                PixelFormat::GrayAlpha
            }
            PixelFormat::Color | PixelFormat::ColorAlpha => PixelFormat::ColorAlpha,
        }
    }

    /// True for the single-channel formats accepted as masks.
    pub const fn is_single_channel(self) -> bool {
        matches!(self, PixelFormat::Binary | PixelFormat::Gray)
    }

    fn decode(self, px: &[u8]) -> [u8; 4] {
        match self {
            PixelFormat::Binary | PixelFormat::Gray => [px[0], px[0], px[0], 255],
            PixelFormat::GrayAlpha => [px[0], px[0], px[0], px[1]],
            PixelFormat::Color => [px[0], px[1], px[2], 255],
            PixelFormat::ColorAlpha => [px[0], px[1], px[2], px[3]],
        }
    }

    fn encode(self, src: PixelFormat, rgba: [u8; 4], out: &mut [u8]) {
        let gray = || {
            if src.channels() <= 2 {
                rgba[0]
            } else {
                luma(rgba[0], rgba[1], rgba[2])
            }
        };
        match self {
            PixelFormat::Binary => out[0] = if gray() >= 128 { 255 } else { 0 },
            PixelFormat::Gray => out[0] = gray(),
            PixelFormat::GrayAlpha => {
                out[0] = gray();
                out[1] = rgba[3];
            }
            PixelFormat::Color => out.copy_from_slice(&rgba[..3]),
            PixelFormat::ColorAlpha => out.copy_from_slice(&rgba),
        }
    }
}

/// ITU-R 601-2 luma transform in 16.16 fixed point.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let v = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (v >> 16) as u8
}

/// Owned raster image: `width * height` pixels of `format.channels()` bytes each,
/// row-major, no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    samples: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("samples_len", &self.samples.len())
            .finish()
    }
}

fn sample_len(format: PixelFormat, width: u32, height: u32) -> TagResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(format.channels()))
        .ok_or_else(|| TagError::validation(format!("buffer size {width}x{height} overflows")))
}

impl PixelBuffer {
    /// Allocate a buffer with every pixel set to `fill` (one value per channel).
    pub fn new(format: PixelFormat, width: u32, height: u32, fill: &[u8]) -> TagResult<Self> {
        if fill.len() != format.channels() {
            return Err(TagError::format(format!(
                "new: {format:?} takes {} fill samples, got {}",
                format.channels(),
                fill.len()
            )));
        }
        let len = sample_len(format, width, height)?;
        let samples = fill.repeat(len / format.channels());
        Ok(Self {
            width,
            height,
            format,
            samples,
        })
    }

    /// `Gray` buffer with every sample set to `value`.
    pub fn filled_gray(size: Size, value: u8) -> Self {
        Self {
            width: size.width,
            height: size.height,
            format: PixelFormat::Gray,
            samples: vec![value; size.area()],
        }
    }

    /// Fully transparent black in an alpha-bearing format.
    pub fn transparent(format: PixelFormat, size: Size) -> TagResult<Self> {
        if !format.has_alpha() {
            return Err(TagError::format(format!(
                "transparent: {format:?} has no alpha channel"
            )));
        }
        Self::new(
            format,
            size.width,
            size.height,
            &vec![0u8; format.channels()],
        )
    }

    /// Wrap existing samples. Fails with `SizeMismatch` on a wrong sample count.
    pub fn from_raw(
        format: PixelFormat,
        width: u32,
        height: u32,
        samples: Vec<u8>,
    ) -> TagResult<Self> {
        let expected = sample_len(format, width, height)?;
        if samples.len() != expected {
            return Err(TagError::size_mismatch(format!(
                "from_raw: {format:?} {width}x{height} needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            samples,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Pixel format; fixed for the lifetime of the buffer.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// True if the format carries alpha.
    pub fn has_alpha(&self) -> bool {
        self.format.has_alpha()
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// All samples, mutable. The length cannot change.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * self.format.channels())
    }

    /// Samples of one pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let i = self.offset(x, y)?;
        self.samples.get(i..i + self.format.channels())
    }

    /// Mutable samples of one pixel, or `None` outside the buffer.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let i = self.offset(x, y)?;
        let n = self.format.channels();
        self.samples.get_mut(i..i + n)
    }

    /// One row of samples.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let stride = (self.width as usize) * self.format.channels();
        let start = (y as usize).checked_mul(stride)?;
        if y >= self.height {
            return None;
        }
        self.samples.get(start..start + stride)
    }

    /// Copy into another pixel format.
    pub fn convert(&self, format: PixelFormat) -> PixelBuffer {
        if format == self.format {
            return self.clone();
        }
        let src_n = self.format.channels();
        let dst_n = format.channels();
        let mut samples = vec![0u8; self.size().area() * dst_n];
        for (src, dst) in self
            .samples
            .chunks_exact(src_n)
            .zip(samples.chunks_exact_mut(dst_n))
        {
            format.encode(self.format, self.format.decode(src), dst);
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            format,
            samples,
        }
    }

    /// Copy out `(left, top, right, bottom)`; right and bottom are exclusive.
    ///
    /// Parts of the box outside the buffer come back zero-filled.
    pub fn crop(&self, left: i32, top: i32, right: i32, bottom: i32) -> TagResult<PixelBuffer> {
        if right < left || bottom < top {
            return Err(TagError::validation(format!(
                "crop: box ({left}, {top}, {right}, {bottom}) is inverted"
            )));
        }
        let w = (i64::from(right) - i64::from(left)) as u32;
        let h = (i64::from(bottom) - i64::from(top)) as u32;
        let n = self.format.channels();
        let mut out = PixelBuffer::from_raw(
            self.format,
            w,
            h,
            vec![0u8; sample_len(self.format, w, h)?],
        )?;

        let x0 = i64::from(left).max(0);
        let x1 = i64::from(right).min(i64::from(self.width));
        let y0 = i64::from(top).max(0);
        let y1 = i64::from(bottom).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return Ok(out);
        }

        let span = ((x1 - x0) as usize) * n;
        for sy in y0..y1 {
            let dy = (sy - i64::from(top)) as usize;
            let dx = (x0 - i64::from(left)) as usize;
            let src = ((sy as usize) * (self.width as usize) + (x0 as usize)) * n;
            let dst = (dy * (w as usize) + dx) * n;
            out.samples[dst..dst + span].copy_from_slice(&self.samples[src..src + span]);
        }
        Ok(out)
    }

    /// Mirrored copy.
    pub fn flipped(&self, flip: Flip) -> PixelBuffer {
        let n = self.format.channels();
        let w = self.width as usize;
        let stride = w * n;
        let mut samples = Vec::with_capacity(self.samples.len());
        match flip {
            Flip::Horizontal => {
                for row in self.samples.chunks_exact(stride.max(1)) {
                    for px in row.chunks_exact(n).rev() {
                        samples.extend_from_slice(px);
                    }
                }
            }
            Flip::Vertical => {
                for row in self.samples.chunks_exact(stride.max(1)).rev() {
                    samples.extend_from_slice(row);
                }
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            format: self.format,
            samples,
        }
    }

    /// `255 - x` on every gray or color sample; alpha is kept as is.
    pub fn inverted(&self) -> PixelBuffer {
        let mut out = self.clone();
        let n = self.format.channels();
        let alpha = self.format.alpha_index();
        for px in out.samples.chunks_exact_mut(n) {
            for (i, s) in px.iter_mut().enumerate() {
                if Some(i) != alpha {
                    *s = 255 - *s;
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/buffer.rs"]
mod tests;
