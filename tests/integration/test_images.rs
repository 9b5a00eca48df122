//! Synthetic test images

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

pub fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Solid RGB image encoded as PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color))),
        ImageFormat::Png,
    )
}

/// Solid RGB image encoded as JPEG
pub fn solid_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color))),
        ImageFormat::Jpeg,
    )
}

/// RGBA PNG: opaque logo color on the left half, fully transparent right half
pub fn half_transparent_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([color[0], color[1], color[2], 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// Solid RGBA logo encoded as PNG
pub fn solid_logo(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color))),
        ImageFormat::Png,
    )
}
