use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{TagError, TagResult};
use crate::mask::rounded::RoundedMask;

/// Space between the text box and the tag edge, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Left padding; leaves room for the hole.
    pub left: u32,
    /// Top padding.
    pub top: u32,
    /// Right padding.
    pub right: u32,
    /// Bottom padding.
    pub bottom: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 45,
            top: 15,
            right: 15,
            bottom: 15,
        }
    }
}

/// Hanging hole punched near the left edge, vertically centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Hole {
    /// Horizontal center in pixels.
    pub center_x: i32,
    /// Radius in pixels.
    pub radius: u32,
}

impl Default for Hole {
    fn default() -> Self {
        Self {
            center_x: 25,
            radius: 5,
        }
    }
}

impl Hole {
    /// Bounding box of the hole on a tag of `size`: every pixel within `radius`
    /// of `(center_x, height / 2)` is covered.
    pub fn bounds(self, size: Size) -> Rect {
        let cx = f64::from(self.center_x) + 0.5;
        let cy = f64::from(size.height / 2) + 0.5;
        let r = f64::from(self.radius) + 0.5;
        Rect::new(cx - r, cy - r, cx + r, cy + r)
    }
}

/// Everything that decides how a tag looks.
///
/// Deserializes from JSON with every field optional; missing fields take the
/// [`TagStyle::keychain`] values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TagStyle {
    /// Font file used by the command line tool.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Space around the text.
    pub padding: Padding,
    /// Gray value of the glyphs.
    pub text_fill: u8,
    /// Gray value behind the glyphs.
    pub background: u8,
    /// Hanging hole, if any.
    pub hole: Option<Hole>,
    /// Rounded corner mask.
    pub mask: RoundedMask,
    /// Gray value left in the clipped-away corners.
    pub outside: u8,
    /// Minimum output canvas; the tag sits at its upper-left corner.
    pub canvas: Option<Size>,
}

impl Default for TagStyle {
    fn default() -> Self {
        Self::keychain()
    }
}

impl TagStyle {
    /// Dark text on a light tag with a hanging hole.
    pub fn keychain() -> Self {
        Self {
            font_path: None,
            font_size_px: 50.0,
            padding: Padding::default(),
            text_fill: 0,
            background: 200,
            hole: Some(Hole::default()),
            mask: RoundedMask::default(),
            outside: 0,
            canvas: None,
        }
    }

    /// Light text on a mid-gray tag, no hole.
    pub fn plate() -> Self {
        Self {
            text_fill: 255,
            background: 127,
            hole: None,
            ..Self::keychain()
        }
    }

    /// Parse a JSON style over the [`TagStyle::keychain`] defaults.
    pub fn from_json_str(json: &str) -> TagResult<Self> {
        Self::keychain().overlay_json(json)
    }

    /// Copy of `self` with the fields present in `json` replaced.
    ///
    /// Nested objects (`padding`, `hole`, `mask`, `canvas`) merge field by
    /// field; `null` clears an optional field.
    pub fn overlay_json(&self, json: &str) -> TagResult<Self> {
        let overlay: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| TagError::validation(format!("style json: {e}")))?;
        let mut merged = serde_json::to_value(self).context("serialize base style")?;
        merge_value(&mut merged, overlay);
        let style: TagStyle = serde_json::from_value(merged)
            .map_err(|e| TagError::validation(format!("style json: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Read a JSON style file and overlay it onto `self`.
    pub fn overlay_json_file(&self, path: &Path) -> TagResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read style '{}'", path.display()))?;
        self.overlay_json(&json)
    }

    /// Check values a tag cannot be rendered with.
    pub fn validate(&self) -> TagResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TagError::validation(
                "style: font_size_px must be finite and > 0",
            ));
        }
        if self.mask.supersample == 0 {
            return Err(TagError::validation(
                "style: mask.supersample must be >= 1",
            ));
        }
        Ok(())
    }
}

fn merge_value(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(b), serde_json::Value::Object(o)) => {
            for (k, v) in o {
                match b.get_mut(&k) {
                    Some(slot) => merge_value(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tag/style.rs"]
mod tests;
