use crate::foundation::error::{TagError, TagResult};

pub use kurbo::{Point, Rect, Vec2};

/// Width and height of a buffer in pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by this size.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where a pasted buffer lands in the destination.
///
/// `At` gives the upper-left corner and takes the size from the pasted buffer.
/// `Box` spells out all four edges (right and bottom exclusive); its size must
/// equal the pasted buffer's size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Region {
    /// Upper-left corner only.
    At {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
    },
    /// Explicit left, top, right and bottom edges.
    Box {
        /// Left edge (inclusive).
        left: i32,
        /// Top edge (inclusive).
        top: i32,
        /// Right edge (exclusive).
        right: i32,
        /// Bottom edge (exclusive).
        bottom: i32,
    },
}

impl Default for Region {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Region {
    fn from((x, y): (i32, i32)) -> Self {
        Region::At { x, y }
    }
}

impl From<(i32, i32, i32, i32)> for Region {
    fn from((left, top, right, bottom): (i32, i32, i32, i32)) -> Self {
        Region::Box {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl Region {
    /// `At { x: 0, y: 0 }`.
    pub const ORIGIN: Region = Region::At { x: 0, y: 0 };

    /// Shorthand for [`Region::At`].
    pub const fn at(x: i32, y: i32) -> Self {
        Region::At { x, y }
    }

    /// Resolve against the size of the buffer being pasted.
    ///
    /// `op` names the calling operation in the error message.
    pub fn resolve(self, size: Size, op: &str) -> TagResult<PixelRect> {
        match self {
            Region::At { x, y } => Ok(PixelRect {
                left: x,
                top: y,
                width: size.width,
                height: size.height,
            }),
            Region::Box {
                left,
                top,
                right,
                bottom,
            } => {
                let w = i64::from(right) - i64::from(left);
                let h = i64::from(bottom) - i64::from(top);
                if w != i64::from(size.width) || h != i64::from(size.height) {
                    return Err(TagError::size_mismatch(format!(
                        "{op}: region ({left}, {top}, {right}, {bottom}) is {w}x{h} but the pasted buffer is {size}"
                    )));
                }
                Ok(PixelRect {
                    left,
                    top,
                    width: size.width,
                    height: size.height,
                })
            }
        }
    }
}

/// A resolved rectangle in destination coordinates. May hang off any edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Size of the rectangle.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    pub fn right(self) -> i64 {
        i64::from(self.left) + i64::from(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> i64 {
        i64::from(self.top) + i64::from(self.height)
    }
}

/// Mirror operations applied to corner tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Flip {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
