use super::*;

#[test]
fn at_region_takes_size_from_source() {
    let r = Region::at(-3, 4).resolve(Size::new(10, 5), "t").unwrap();
    assert_eq!(
        r,
        PixelRect {
            left: -3,
            top: 4,
            width: 10,
            height: 5
        }
    );
    assert_eq!(r.right(), 7);
    assert_eq!(r.bottom(), 9);
}

#[test]
fn box_region_must_match_source_size() {
    let ok = Region::from((2, 2, 12, 7)).resolve(Size::new(10, 5), "t");
    assert!(ok.is_ok());

    let err = Region::from((2, 2, 12, 8))
        .resolve(Size::new(10, 5), "paste")
        .unwrap_err();
    assert!(matches!(err, TagError::SizeMismatch(_)));
    assert!(err.to_string().contains("paste:"));
}

#[test]
fn size_helpers() {
    assert_eq!(Size::new(3, 4).area(), 12);
    assert!(Size::new(0, 4).is_empty());
    assert_eq!(Size::new(3, 9).max(Size::new(5, 2)), Size::new(5, 9));
    assert_eq!(Size::new(3, 4).to_string(), "3x4");
}
