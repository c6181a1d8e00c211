//! Filled shape primitives for single-channel buffers.
//!
//! Shapes are given as bounding boxes in pixel-edge coordinates. A pixel is
//! filled when its center lies inside the shape; there is no anti-aliasing here.
//! Angles are in degrees, measured clockwise from the +x axis (y points down).

use crate::foundation::buffer::{PixelBuffer, PixelFormat};
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{TagError, TagResult};

/// Fill every pixel whose center lies inside `rect`.
pub fn fill_rect(target: &mut PixelBuffer, rect: Rect, value: u8) -> TagResult<()> {
    fill_where(target, "fill_rect", rect, value, |p| rect.contains(p))
}

/// Fill the ellipse inscribed in `bounds`.
pub fn fill_ellipse(target: &mut PixelBuffer, bounds: Rect, value: u8) -> TagResult<()> {
    fill_where(target, "fill_ellipse", bounds, value, |p| {
        in_ellipse(bounds, p)
    })
}

/// Fill the pie slice of the ellipse inscribed in `bounds` between
/// `start_deg` (inclusive) and `end_deg` (exclusive).
pub fn fill_pieslice(
    target: &mut PixelBuffer,
    bounds: Rect,
    start_deg: f64,
    end_deg: f64,
    value: u8,
) -> TagResult<()> {
    if !start_deg.is_finite() || !end_deg.is_finite() {
        return Err(TagError::validation("fill_pieslice: angles must be finite"));
    }
    let start = start_deg.rem_euclid(360.0);
    let mut sweep = end_deg - start_deg;
    if sweep >= 360.0 {
        sweep = 360.0;
    } else {
        sweep = sweep.rem_euclid(360.0);
    }
    let center = bounds.center();
    fill_where(target, "fill_pieslice", bounds, value, |p| {
        if !in_ellipse(bounds, p) {
            return false;
        }
        let v: Vec2 = p - center;
        if v == Vec2::ZERO {
            return true;
        }
        let angle = v.atan2().to_degrees().rem_euclid(360.0);
        (angle - start).rem_euclid(360.0) < sweep
    })
}

fn in_ellipse(bounds: Rect, p: Point) -> bool {
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let c = bounds.center();
    let dx = (p.x - c.x) / rx;
    let dy = (p.y - c.y) / ry;
    dx * dx + dy * dy <= 1.0
}

fn fill_where(
    target: &mut PixelBuffer,
    op: &str,
    bounds: Rect,
    value: u8,
    inside: impl Fn(Point) -> bool,
) -> TagResult<()> {
    if !target.format().is_single_channel() {
        return Err(TagError::format(format!(
            "{op}: expects a Gray or Binary target, got {:?}",
            target.format()
        )));
    }
    let value = match target.format() {
        PixelFormat::Binary if value != 0 => 255,
        _ => value,
    };
    let bounds = bounds.abs();
    let x0 = bounds.x0.floor().max(0.0) as u32;
    let y0 = bounds.y0.floor().max(0.0) as u32;
    let x1 = (bounds.x1.ceil().max(0.0) as u32).min(target.width());
    let y1 = (bounds.y1.ceil().max(0.0) as u32).min(target.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if !inside(p) {
                continue;
            }
            if let Some(px) = target.pixel_mut(x, y) {
                px[0] = value;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shapes.rs"]
mod tests;
