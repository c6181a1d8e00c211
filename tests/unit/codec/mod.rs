use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tagmint-codec-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn formats_map_to_matching_layouts() {
    let gray = PixelBuffer::new(PixelFormat::Gray, 3, 2, &[9]).unwrap();
    assert!(matches!(
        to_dynamic_image(&gray).unwrap(),
        image::DynamicImage::ImageLuma8(_)
    ));

    let la = PixelBuffer::new(PixelFormat::GrayAlpha, 3, 2, &[9, 1]).unwrap();
    assert!(matches!(
        to_dynamic_image(&la).unwrap(),
        image::DynamicImage::ImageLumaA8(_)
    ));

    let rgba = PixelBuffer::new(PixelFormat::ColorAlpha, 3, 2, &[1, 2, 3, 4]).unwrap();
    let img = to_dynamic_image(&rgba).unwrap();
    assert_eq!(img.to_rgba8().get_pixel(2, 1).0, [1, 2, 3, 4]);

    let bin = PixelBuffer::new(PixelFormat::Binary, 2, 2, &[255]).unwrap();
    assert_eq!(to_dynamic_image(&bin).unwrap().to_luma8().get_pixel(1, 1).0, [255]);
}

#[test]
fn wide_images_fall_back_to_color_alpha() {
    let img = image::DynamicImage::ImageRgb16(image::ImageBuffer::from_pixel(
        2,
        2,
        image::Rgb([65535u16, 0, 0]),
    ));
    let buf = from_dynamic_image(img).unwrap();
    assert_eq!(buf.format(), PixelFormat::ColorAlpha);
    assert_eq!(buf.pixel(0, 0).unwrap(), &[255, 0, 0, 255]);
}

#[test]
fn png_written_into_new_directory() {
    let dir = temp_dir("write");
    let path = dir.join("nested").join("tag.png");
    let buf = PixelBuffer::new(PixelFormat::GrayAlpha, 4, 3, &[120, 60]).unwrap();
    write_png(&buf, &path).unwrap();

    let back = read_image(&path).unwrap();
    assert_eq!(back, buf);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_image_is_an_io_error() {
    let err = read_image(Path::new("/nonexistent/tagmint.png")).unwrap_err();
    assert!(matches!(err, TagError::Other(_)));
}
