use super::*;

fn ramp(format: PixelFormat, w: u32, h: u32) -> PixelBuffer {
    let len = (w * h) as usize * format.channels();
    let samples = (0..len).map(|i| (i * 7 % 251) as u8).collect();
    PixelBuffer::from_raw(format, w, h, samples).unwrap()
}

#[test]
fn channel_counts_are_fixed_by_format() {
    assert_eq!(PixelFormat::Binary.channels(), 1);
    assert_eq!(PixelFormat::Gray.channels(), 1);
    assert_eq!(PixelFormat::GrayAlpha.channels(), 2);
    assert_eq!(PixelFormat::Color.channels(), 3);
    assert_eq!(PixelFormat::ColorAlpha.channels(), 4);

    assert_eq!(PixelFormat::ColorAlpha.without_alpha(), PixelFormat::Color);
    assert_eq!(PixelFormat::Gray.with_alpha(), PixelFormat::GrayAlpha);
    assert_eq!(PixelFormat::Gray.alpha_index(), None);
    assert_eq!(PixelFormat::GrayAlpha.alpha_index(), Some(1));
}

#[test]
fn new_rejects_wrong_fill_width() {
    let err = PixelBuffer::new(PixelFormat::Color, 2, 2, &[1, 2]).unwrap_err();
    assert!(matches!(err, TagError::Format(_)));

    let ok = PixelBuffer::new(PixelFormat::Color, 2, 1, &[1, 2, 3]).unwrap();
    assert_eq!(ok.samples(), &[1, 2, 3, 1, 2, 3]);
}

#[test]
fn from_raw_checks_sample_count() {
    let err = PixelBuffer::from_raw(PixelFormat::GrayAlpha, 2, 2, vec![0; 7]).unwrap_err();
    assert!(matches!(err, TagError::SizeMismatch(_)));
}

#[test]
fn transparent_requires_alpha_format() {
    assert!(PixelBuffer::transparent(PixelFormat::Gray, Size::new(1, 1)).is_err());
    let t = PixelBuffer::transparent(PixelFormat::ColorAlpha, Size::new(2, 1)).unwrap();
    assert!(t.samples().iter().all(|&s| s == 0));
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut b = ramp(PixelFormat::Color, 3, 2);
    assert!(b.pixel(3, 0).is_none());
    assert!(b.pixel(0, 2).is_none());
    b.pixel_mut(2, 1).unwrap().copy_from_slice(&[9, 8, 7]);
    assert_eq!(b.pixel(2, 1).unwrap(), &[9, 8, 7]);
    assert_eq!(b.row(1).unwrap().len(), 9);
    assert!(b.row(2).is_none());
}

#[test]
fn convert_color_to_gray_uses_luma() {
    let b = PixelBuffer::from_raw(PixelFormat::Color, 3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255])
        .unwrap();
    let g = b.convert(PixelFormat::Gray);
    assert_eq!(g.samples(), &[76, 150, 29]);
}

#[test]
fn convert_adds_opaque_alpha_and_drops_it_again() {
    let g = PixelBuffer::from_raw(PixelFormat::Gray, 2, 1, vec![10, 200]).unwrap();
    let ca = g.convert(PixelFormat::ColorAlpha);
    assert_eq!(ca.samples(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    assert_eq!(ca.convert(PixelFormat::Gray), g);
}

#[test]
fn convert_to_binary_thresholds() {
    let g = PixelBuffer::from_raw(PixelFormat::Gray, 3, 1, vec![127, 128, 255]).unwrap();
    assert_eq!(g.convert(PixelFormat::Binary).samples(), &[0, 255, 255]);
}

#[test]
fn crop_pads_outside_with_zero() {
    let b = PixelBuffer::from_raw(PixelFormat::Gray, 2, 2, vec![1, 2, 3, 4]).unwrap();
    let c = b.crop(-1, 0, 2, 3).unwrap();
    assert_eq!(c.size(), Size::new(3, 3));
    assert_eq!(c.samples(), &[0, 1, 2, 0, 3, 4, 0, 0, 0]);

    let far = b.crop(10, 10, 12, 11).unwrap();
    assert_eq!(far.samples(), &[0, 0]);

    assert!(b.crop(2, 0, 1, 1).is_err());
}

#[test]
fn flips_mirror_pixels_not_samples() {
    let b = PixelBuffer::from_raw(PixelFormat::GrayAlpha, 2, 2, vec![1, 11, 2, 12, 3, 13, 4, 14])
        .unwrap();
    assert_eq!(
        b.flipped(Flip::Horizontal).samples(),
        &[2, 12, 1, 11, 4, 14, 3, 13]
    );
    assert_eq!(
        b.flipped(Flip::Vertical).samples(),
        &[3, 13, 4, 14, 1, 11, 2, 12]
    );
}

#[test]
fn invert_keeps_alpha() {
    let b = PixelBuffer::from_raw(PixelFormat::GrayAlpha, 1, 1, vec![10, 77]).unwrap();
    assert_eq!(b.inverted().samples(), &[245, 77]);

    let g = ramp(PixelFormat::Gray, 4, 4);
    assert_eq!(g.inverted().inverted(), g);
}
