use super::*;
use crate::draw::shapes::fill_rect;
use crate::foundation::core::Rect;
use crate::tag::style::Hole;

/// Each character is a solid 30x40 block.
struct BlockText;

impl TextRasterizer for BlockText {
    fn measure(&mut self, text: &str) -> TagResult<Size> {
        Ok(Size::new(30 * text.chars().count() as u32, 40))
    }

    fn draw(
        &mut self,
        target: &mut PixelBuffer,
        x: i32,
        y: i32,
        text: &str,
        fill: u8,
    ) -> TagResult<()> {
        let size = self.measure(text)?;
        let (x, y) = (f64::from(x), f64::from(y));
        fill_rect(
            target,
            Rect::new(x, y, x + f64::from(size.width), y + f64::from(size.height)),
            fill,
        )
    }
}

struct FailingText;

impl TextRasterizer for FailingText {
    fn measure(&mut self, _text: &str) -> TagResult<Size> {
        Err(TagError::text("no glyphs"))
    }

    fn draw(&mut self, _: &mut PixelBuffer, _: i32, _: i32, _: &str, _: u8) -> TagResult<()> {
        Ok(())
    }
}

fn rgba(b: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let p = b.pixel(x, y).unwrap();
    [p[0], p[1], p[2], p[3]]
}

#[test]
fn keychain_tag_layout() {
    let tag = render_tag("AB", &TagStyle::keychain(), &mut BlockText).unwrap();
    assert_eq!(tag.format(), PixelFormat::ColorAlpha);
    assert_eq!(tag.size(), Size::new(120, 70));

    // Text block spans x 45..105, y 15..55.
    assert_eq!(rgba(&tag, 60, 35), [0, 0, 0, 255]);
    assert_eq!(rgba(&tag, 110, 35), [200, 200, 200, 255]);
    assert_eq!(rgba(&tag, 60, 5), [200, 200, 200, 255]);

    for (x, y) in [(0, 0), (119, 0), (0, 69), (119, 69)] {
        assert_eq!(rgba(&tag, x, y)[3], 0, "corner ({x}, {y})");
    }
}

#[test]
fn hole_is_transparent_within_its_radius() {
    let tag = render_tag("AB", &TagStyle::keychain(), &mut BlockText).unwrap();
    let (cx, cy) = (25i64, 35i64);
    for y in 28..=42u32 {
        for x in 18..=32u32 {
            let (dx, dy) = (i64::from(x) - cx, i64::from(y) - cy);
            if dx * dx + dy * dy <= 25 {
                assert_eq!(rgba(&tag, x, y), [0, 0, 0, 0], "({x}, {y})");
            }
        }
    }
    assert_eq!(rgba(&tag, 31, 35), [200, 200, 200, 255]);
}

#[test]
fn plate_has_no_hole_and_light_text() {
    let tag = render_tag("AB", &TagStyle::plate(), &mut BlockText).unwrap();
    assert_eq!(rgba(&tag, 25, 35), [127, 127, 127, 255]);
    assert_eq!(rgba(&tag, 60, 35), [255, 255, 255, 255]);
}

#[test]
fn canvas_is_grown_and_left_transparent() {
    let style = TagStyle {
        canvas: Some(Size::new(300, 300)),
        ..TagStyle::keychain()
    };
    let tag = render_tag("AB", &style, &mut BlockText).unwrap();
    assert_eq!(tag.size(), Size::new(300, 300));
    assert_eq!(rgba(&tag, 200, 200), [0, 0, 0, 0]);
    assert_eq!(rgba(&tag, 110, 35), [200, 200, 200, 255]);
    assert!(rgba(&tag, 0, 0)[3] < rgba(&tag, 60, 35)[3]);

    // A canvas smaller than the tag never crops it.
    let style = TagStyle {
        canvas: Some(Size::new(10, 10)),
        ..TagStyle::keychain()
    };
    let tag = render_tag("AB", &style, &mut BlockText).unwrap();
    assert_eq!(tag.size(), Size::new(120, 70));
}

#[test]
fn mask_opacity_dims_the_whole_tag() {
    let mut style = TagStyle::keychain();
    style.mask.opacity = 40;
    let tag = render_tag("AB", &style, &mut BlockText).unwrap();
    let [r, g, b, a] = rgba(&tag, 110, 35);
    assert_eq!(a, 215);
    assert_eq!((r, g, b), (169, 169, 169));
}

#[test]
fn outside_value_fills_clipped_corners() {
    let style = TagStyle {
        outside: 90,
        hole: Some(Hole {
            center_x: 25,
            radius: 3,
        }),
        ..TagStyle::keychain()
    };
    let tag = render_tag("AB", &style, &mut BlockText).unwrap();
    assert_eq!(rgba(&tag, 0, 0), [90, 90, 90, 0]);
}

#[test]
fn radius_too_large_for_the_tag() {
    let mut style = TagStyle::keychain();
    style.mask.radius = 40;
    let err = render_tag("AB", &style, &mut BlockText).unwrap_err();
    assert!(matches!(err, TagError::InvalidRadius(_)));
}

#[test]
fn invalid_style_and_text_errors_propagate() {
    let style = TagStyle {
        font_size_px: 0.0,
        ..TagStyle::keychain()
    };
    let err = render_tag("AB", &style, &mut BlockText).unwrap_err();
    assert!(matches!(err, TagError::Validation(_)));

    let err = render_tag("AB", &TagStyle::keychain(), &mut FailingText).unwrap_err();
    assert!(matches!(err, TagError::Text(_)));
}
