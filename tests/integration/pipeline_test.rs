//! End-to-end pipeline tests
//!
//! Decode → resize → overlays → encode through the public API, with
//! synthetic images so nothing depends on files on disk.

use super::test_images::{half_transparent_png, solid_jpeg, solid_logo, solid_png};
use image::{Rgba, RgbaImage};
use imgframe::overlay::text_layout::layout_text;
use imgframe::overlay::{
    apply_overlays, Dimensions, FontLibrary, LogoAnchor, LogoSpec, OverlayError, OverlaySpec,
    StageOutcome, TextSpec,
};
use imgframe::pipeline::Pipeline;
use imgframe::resize::{
    compute_and_resample, Canvas, ColorMode, ImageConfig, ImageError, OutputFormat, SizeRequest,
};

const BACKGROUND: [u8; 3] = [30, 60, 90];

fn background_canvas(width: u32, height: u32) -> Canvas {
    Canvas::decode(&solid_png(width, height, BACKGROUND)).unwrap()
}

fn is_background(px: &Rgba<u8>) -> bool {
    px[0] == BACKGROUND[0] && px[1] == BACKGROUND[1] && px[2] == BACKGROUND[2] && px[3] == 255
}

#[test]
fn test_landscape_into_square_box_keeps_aspect() {
    let request = SizeRequest::new(1000, 1000, true).unwrap();
    let out = compute_and_resample(background_canvas(2000, 1000), &request).unwrap();
    assert_eq!(out.dimensions(), (1000, 500));
}

#[test]
fn test_stretch_produces_exact_target() {
    let request = SizeRequest::new(640, 480, false).unwrap();
    let out = compute_and_resample(background_canvas(300, 900), &request).unwrap();
    assert_eq!(out.dimensions(), (640, 480));
}

#[test]
fn test_non_positive_dimensions_rejected() {
    for (w, h) in [(0, 100), (100, 0), (-1, 50), (50, -1)] {
        let result = SizeRequest::new(w, h, true);
        assert!(
            matches!(result, Err(ImageError::InvalidDimensions { .. })),
            "{w}x{h} should be rejected"
        );
    }
}

#[test]
fn test_undecodable_source_is_fatal() {
    let pipeline = Pipeline::default();
    let request = SizeRequest::new(100, 100, true).unwrap();
    let result = pipeline.process(
        b"this is not an image at all",
        &request,
        &OverlaySpec::new(),
        OutputFormat::Jpeg,
    );
    assert!(matches!(result, Err(ImageError::DecodeFailed { .. })));
}

#[test]
fn test_logo_bottom_right_placement() {
    let logo = solid_logo(400, 300, [250, 10, 10, 255]);
    let spec = OverlaySpec::new().with_logo(
        LogoSpec::new(logo)
            .with_size_fraction(0.15)
            .with_anchor(LogoAnchor::BottomRight),
    );

    let result = apply_overlays(background_canvas(800, 600), &spec, &FontLibrary::builtin_only());
    assert_eq!(result.report.logo, StageOutcome::Applied);
    let img = result.canvas.into_rgba();

    // Logo is 120x90 at (660, 490)
    let inside = img.get_pixel(660 + 60, 490 + 45);
    assert!(inside[0] > 240 && inside[1] < 30, "got {inside:?}");

    assert!(is_background(img.get_pixel(659, 489)));
    assert!(is_background(img.get_pixel(780, 580)));
    assert!(is_background(img.get_pixel(700, 489)));
    assert!(is_background(img.get_pixel(100, 100)));
}

#[test]
fn test_logo_transparent_area_keeps_canvas() {
    let logo = half_transparent_png(200, 100, [0, 255, 0]);
    let spec = OverlaySpec::new().with_logo(
        LogoSpec::new(logo)
            .with_size_fraction(0.25)
            .with_anchor(LogoAnchor::TopLeft),
    );

    let result = apply_overlays(background_canvas(800, 600), &spec, &FontLibrary::builtin_only());
    let img = result.canvas.into_rgba();

    // Logo is 200x100 at (20, 20): left half green, right half see-through
    let green = img.get_pixel(20 + 40, 20 + 50);
    assert!(green[1] > 240 && green[0] < 20, "got {green:?}");
    assert!(is_background(img.get_pixel(20 + 180, 20 + 50)));
}

#[test]
fn test_undecodable_logo_with_text_still_draws_text() {
    let spec = OverlaySpec::new()
        .with_logo(LogoSpec::new(b"\x89PNG broken".to_vec()).with_anchor(LogoAnchor::TopRight))
        .with_text(TextSpec::new("Hello\nWorld"));

    let result = apply_overlays(background_canvas(1000, 600), &spec, &FontLibrary::builtin_only());
    assert!(matches!(
        result.report.logo,
        StageOutcome::Failed(OverlayError::Decode(_))
    ));
    assert_eq!(result.report.text, StageOutcome::Applied);

    let img = result.canvas.into_rgba();

    // Nothing drawn in the top-right corner where the logo would have gone
    for y in 0..200 {
        for x in 800..1000 {
            assert!(is_background(img.get_pixel(x, y)), "pixel ({x}, {y}) changed");
        }
    }

    // Text landed in the bottom band
    let changed = (600 - 2 * 43 - 30..600 - 30)
        .flat_map(|y| (0..1000).map(move |x| (x, y)))
        .filter(|&(x, y)| !is_background(img.get_pixel(x, y)))
        .count();
    assert!(changed > 50, "only {changed} text pixels");
}

#[test]
fn test_hello_world_layout() {
    let font = imgframe::overlay::fonts::builtin_font().unwrap();
    let spec = TextSpec::new("Hello\nWorld").with_anchor("bottom-center").with_font_size(36);
    let layout = layout_text(Dimensions::new(1000, 700), &spec, &font);

    assert_eq!(layout.font_size, 36);
    assert_eq!(layout.line_height, 43);
    let first = layout.lines[0].y;
    assert_eq!(first, 700 - 2 * 43 - 30);
    assert_eq!(layout.lines[1].y, first + 43);
}

#[test]
fn test_jpeg_output_flattens_transparency_to_white() {
    let source = half_transparent_png(100, 100, [0, 0, 255]);
    let pipeline = Pipeline::default();
    let request = SizeRequest::new(100, 100, true).unwrap();
    let out = pipeline
        .process(&source, &request, &OverlaySpec::new(), OutputFormat::Jpeg)
        .unwrap();

    assert_eq!(out.content_type, "image/jpeg");
    let decoded = image::load_from_memory(&out.data).unwrap().to_rgb8();
    let right = decoded.get_pixel(90, 50);
    assert!(right[0] > 230 && right[1] > 230 && right[2] > 230, "got {right:?}");
    let left = decoded.get_pixel(10, 50);
    assert!(left[2] > 200 && left[0] < 40, "got {left:?}");
}

#[test]
fn test_png_output_keeps_alpha() {
    let source = half_transparent_png(100, 50, [0, 0, 255]);
    let pipeline = Pipeline::default();
    let request = SizeRequest::new(50, 50, true).unwrap();
    let out = pipeline
        .process(&source, &request, &OverlaySpec::new(), OutputFormat::Png)
        .unwrap();

    assert_eq!(out.output_size, (50, 25));
    let decoded = image::load_from_memory(&out.data).unwrap();
    assert!(decoded.color().has_alpha());
    assert_eq!(decoded.to_rgba8().get_pixel(49, 12)[3], 0);
}

#[test]
fn test_overlays_switch_canvas_to_rgba() {
    let pipeline = Pipeline::default();
    let request = SizeRequest::new(400, 300, false).unwrap();
    let overlays = OverlaySpec::new().with_text(TextSpec::new("Caption").at(10, 10));

    let plain = pipeline
        .transform(&solid_jpeg(200, 150, BACKGROUND), &request, &OverlaySpec::new())
        .unwrap();
    assert_eq!(plain.canvas.mode(), ColorMode::Rgb);

    let stamped = pipeline
        .transform(&solid_jpeg(200, 150, BACKGROUND), &request, &overlays)
        .unwrap();
    assert_eq!(stamped.canvas.mode(), ColorMode::Rgba);
    assert_eq!(stamped.canvas.dimensions(), (400, 300));
}

#[test]
fn test_image_bomb_rejected_before_decode() {
    let config = ImageConfig {
        max_pixels: 10_000,
        ..Default::default()
    };
    let pipeline = Pipeline::new(config, FontLibrary::builtin_only());
    let request = SizeRequest::new(10, 10, true).unwrap();
    let result = pipeline.process(
        &solid_png(200, 200, BACKGROUND),
        &request,
        &OverlaySpec::new(),
        OutputFormat::Png,
    );
    assert!(matches!(result, Err(ImageError::ImageBombDetected { .. })));
}

#[test]
fn test_concurrent_pipelines_share_fonts() {
    let pipeline = Pipeline::default();
    let source = solid_png(300, 200, BACKGROUND);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = &pipeline;
                let source = &source;
                scope.spawn(move || {
                    let request = SizeRequest::new(150 + i * 10, 100, true).unwrap();
                    let overlays = OverlaySpec::new().with_text(TextSpec::new(format!("#{i}")));
                    pipeline
                        .process(source, &request, &overlays, OutputFormat::Png)
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            let out = handle.join().unwrap();
            assert_eq!(out.overlays.text, StageOutcome::Applied);
            assert_eq!(out.output_size.1, 100);
        }
    });
}

#[test]
fn test_resized_canvas_has_expected_buffer_length() {
    let request = SizeRequest::new(123, 77, false).unwrap();
    let out = compute_and_resample(background_canvas(50, 50), &request).unwrap();
    assert_eq!(out.as_raw().len(), 123 * 77 * out.mode().channels());

    let rgba: RgbaImage = out.into_rgba();
    assert_eq!(rgba.dimensions(), (123, 77));
}
