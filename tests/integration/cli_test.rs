//! Command-line binary tests

use super::test_images::{solid_logo, solid_png};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn imgframe(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_imgframe"))
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run imgframe")
}

fn workspace_with_source(width: u32, height: u32) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.png"), solid_png(width, height, [40, 80, 120])).unwrap();
    dir
}

#[test]
fn test_resize_to_explicit_box() {
    let dir = workspace_with_source(2000, 1000);
    let output = imgframe(dir.path(), &["in.png", "out.png", "-W", "1000", "-H", "1000"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let img = image::open(dir.path().join("out.png")).unwrap();
    assert_eq!((img.width(), img.height()), (1000, 500));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1000x500"), "stdout: {stdout}");
}

#[test]
fn test_stretch_with_preset() {
    let dir = workspace_with_source(300, 300);
    let output = imgframe(
        dir.path(),
        &["in.png", "thumb.jpg", "--preset", "youtube_thumbnail", "--stretch"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let data = std::fs::read(dir.path().join("thumb.jpg")).unwrap();
    assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::Jpeg);
    let img = image::load_from_memory(&data).unwrap();
    assert_eq!((img.width(), img.height()), (1280, 720));
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = workspace_with_source(64, 64);
    let output = imgframe(
        dir.path(),
        &["in.png", "out.bin", "-W", "32", "-H", "32", "--format", "png"],
    );
    assert!(output.status.success());

    let data = std::fs::read(dir.path().join("out.bin")).unwrap();
    assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::Png);
}

#[test]
fn test_overlay_document_is_applied() {
    let dir = workspace_with_source(800, 600);
    std::fs::write(dir.path().join("logo.png"), solid_logo(400, 300, [255, 0, 0, 255])).unwrap();
    std::fs::write(
        dir.path().join("overlay.yaml"),
        "logo: logo.png\nlogo_position: bottom-right\ntext: \"Sale\"\ntext_position: top-left\n",
    )
    .unwrap();

    let output = imgframe(
        dir.path(),
        &["in.png", "out.png", "-W", "800", "-H", "600", "--overlay", "overlay.yaml"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let img = image::open(dir.path().join("out.png")).unwrap().to_rgba8();
    let logo_px = img.get_pixel(720, 535);
    assert!(logo_px[0] > 240 && logo_px[1] < 20, "got {logo_px:?}");
    assert_eq!(img.get_pixel(400, 300).0, [40, 80, 120, 255]);
}

#[test]
fn test_missing_logo_is_only_a_warning() {
    let dir = workspace_with_source(200, 200);
    std::fs::write(
        dir.path().join("overlay.json"),
        r#"{"logo": "does-not-exist.png", "text": "still here"}"#,
    )
    .unwrap();

    let output = imgframe(
        dir.path(),
        &["in.png", "out.png", "-W", "200", "-H", "200", "-o", "overlay.json"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("out.png").exists());
}

#[test]
fn test_missing_size_fails() {
    let dir = workspace_with_source(10, 10);
    let output = imgframe(dir.path(), &["in.png", "out.png"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_zero_width_fails() {
    let dir = workspace_with_source(10, 10);
    let output = imgframe(dir.path(), &["in.png", "out.png", "-W", "0", "-H", "10"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must be positive"), "stderr: {stderr}");
}

#[test]
fn test_unknown_preset_fails() {
    let dir = workspace_with_source(10, 10);
    let output = imgframe(dir.path(), &["in.png", "out.png", "--preset", "myspace_banner"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[test]
fn test_undecodable_input_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.png"), b"definitely not a png").unwrap();
    let output = imgframe(dir.path(), &["in.png", "out.png", "-W", "10", "-H", "10"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_config_file_limits_are_enforced() {
    let dir = workspace_with_source(100, 100);
    std::fs::write(
        dir.path().join("imgframe.yaml"),
        "limits:\n  max_width: 50\n  max_height: 50\nlogging:\n  level: warn\n",
    )
    .unwrap();

    let output = imgframe(
        dir.path(),
        &["in.png", "out.png", "-W", "20", "-H", "20", "-c", "imgframe.yaml"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_invalid_config_fails() {
    let dir = workspace_with_source(10, 10);
    std::fs::write(dir.path().join("bad.yaml"), "output:\n  quality: 0\n").unwrap();

    let output = imgframe(
        dir.path(),
        &["in.png", "out.png", "-W", "10", "-H", "10", "-c", "bad.yaml"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quality"), "stderr: {stderr}");
}
