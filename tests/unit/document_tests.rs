// Overlay documents loaded from disk

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imgframe::overlay::{
    FontFamily, HorizontalAnchor, LogoAnchor, OverlayDocument, TextPlacement, VerticalAnchor,
};
use std::io::Cursor;
use tempfile::TempDir;

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

#[test]
fn test_yaml_document_with_relative_logo_path() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("brand.png"), png_bytes()).unwrap();
    let path = dir.path().join("overlay.yaml");
    std::fs::write(
        &path,
        "logo: brand.png\nlogo_size: 0.3\nlogo_position: bottom-left\n\
         text: \"Summer\\nSale\"\ntext_size: 48\ntext_color: \"#ffcc00\"\n\
         font_family: impact\ntext_position: top-right\n",
    )
    .unwrap();

    let spec = OverlayDocument::from_file(&path)
        .unwrap()
        .into_spec(dir.path());

    let logo = spec.logo.expect("logo should load");
    assert_eq!(logo.data, png_bytes());
    assert_eq!(logo.anchor, LogoAnchor::BottomLeft);
    assert!((logo.size_fraction - 0.3).abs() < f32::EPSILON);

    let text = spec.text.expect("text should be kept");
    assert_eq!(text.text, "Summer\nSale");
    assert_eq!(text.font_size, 48);
    assert_eq!(text.font_family, FontFamily::Impact);
    match text.placement {
        TextPlacement::Anchored(anchor) => {
            assert_eq!(anchor.horizontal, HorizontalAnchor::Right);
            assert_eq!(anchor.vertical, VerticalAnchor::Top);
        }
        other => panic!("expected anchored placement, got {:?}", other),
    }
}

#[test]
fn test_json_document_with_data_url_and_explicit_position() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("overlay.json");
    let data_url = format!("data:image/png;base64,{}", BASE64.encode(png_bytes()));
    let json = serde_json::json!({
        "logo": data_url,
        "text": "Drag me",
        "text_draggable": true,
        "text_x": 40,
        "text_y": 120,
    });
    std::fs::write(&path, json.to_string()).unwrap();

    let spec = OverlayDocument::from_file(&path)
        .unwrap()
        .into_spec(dir.path());

    assert_eq!(spec.logo.map(|l| l.data), Some(png_bytes()));
    let text = spec.text.unwrap();
    assert_eq!(text.placement, TextPlacement::Explicit { x: 40, y: 120 });
}

#[test]
fn test_unreadable_logo_keeps_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("overlay.yaml");
    std::fs::write(&path, "logo: missing.png\ntext: hello\n").unwrap();

    let spec = OverlayDocument::from_file(&path)
        .unwrap()
        .into_spec(dir.path());
    assert!(spec.logo.is_none());
    assert!(spec.text.is_some());
}

#[test]
fn test_extreme_values_never_fail_the_overlay_stage() {
    use imgframe::overlay::{apply_overlays, FontLibrary, StageOutcome};
    use imgframe::resize::Canvas;
    use image::{Rgb, RgbImage};

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("brand.png"), png_bytes()).unwrap();
    let path = dir.path().join("overlay.yaml");
    std::fs::write(
        &path,
        "logo: brand.png\nlogo_size: 1.0e9\n\
         text: huge\ntext_size: 2147483647\n\
         text_draggable: true\ntext_x: 2147483647\ntext_y: -2147483648\n",
    )
    .unwrap();

    let spec = OverlayDocument::from_file(&path)
        .unwrap()
        .into_spec(dir.path());
    assert_eq!(
        spec.text.as_ref().map(|t| t.placement),
        Some(TextPlacement::Explicit {
            x: i32::MAX,
            y: i32::MIN
        })
    );

    let canvas = Canvas::from_rgb(RgbImage::from_pixel(200, 100, Rgb([1, 2, 3]))).unwrap();
    let result = apply_overlays(canvas, &spec, &FontLibrary::builtin_only());

    assert!(result.report.logo.is_failed());
    assert_eq!(result.report.text, StageOutcome::Applied);
    let img = result.canvas.into_rgba();
    assert_eq!(img.dimensions(), (200, 100));
    assert!(img.pixels().all(|p| p.0 == [1, 2, 3, 255]));
}
