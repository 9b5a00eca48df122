//! Lanczos3 resampling via fast_image_resize
//!
//! RGBA buffers are premultiplied before convolution and divided back
//! afterwards; without that, transparent pixels bleed their (meaningless)
//! color into neighbouring edges.

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::{RgbImage, RgbaImage};
use std::num::NonZeroU32;

use super::canvas::{Canvas, ColorMode};
use super::dimensions::ComputedSize;
use super::error::ImageError;

/// Resample a canvas to `size` with a Lanczos3 convolution.
///
/// Returns the input untouched when the size does not change. The color
/// mode is preserved.
pub fn resample(canvas: Canvas, size: ComputedSize) -> Result<Canvas, ImageError> {
    let (src_w, src_h) = canvas.dimensions();
    if (src_w, src_h) == (size.width, size.height) {
        return Ok(canvas);
    }

    let mode = canvas.mode();
    let resized = resize_raw(canvas.into_raw(), (src_w, src_h), size, mode)?;

    match mode {
        ColorMode::Rgb => RgbImage::from_raw(size.width, size.height, resized)
            .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))
            .and_then(Canvas::from_rgb),
        ColorMode::Rgba => RgbaImage::from_raw(size.width, size.height, resized)
            .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))
            .and_then(Canvas::from_rgba),
    }
}

/// Resample an RGBA buffer (used for overlay images).
pub fn resample_rgba(image: RgbaImage, size: ComputedSize) -> Result<RgbaImage, ImageError> {
    match resample(Canvas::from_rgba(image)?, size)? {
        Canvas::Rgba(img) => Ok(img),
        Canvas::Rgb(_) => Err(ImageError::resize_failed("Color mode changed during resize")),
    }
}

fn resize_raw(
    data: Vec<u8>,
    source: (u32, u32),
    target: ComputedSize,
    mode: ColorMode,
) -> Result<Vec<u8>, ImageError> {
    let src_width =
        NonZeroU32::new(source.0).ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height =
        NonZeroU32::new(source.1).ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width = NonZeroU32::new(target.width)
        .ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height = NonZeroU32::new(target.height)
        .ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let pixel_type = match mode {
        ColorMode::Rgb => PixelType::U8x3,
        ColorMode::Rgba => PixelType::U8x4,
    };

    let mut src_image = Image::from_vec_u8(src_width, src_height, data, pixel_type)
        .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    if mode.has_alpha() {
        alpha_mul_div
            .multiply_alpha_inplace(&mut src_image.view_mut())
            .map_err(|e| ImageError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;
    }

    let mut dst_image = Image::new(dst_width, dst_height, pixel_type);
    {
        let mut dst_view = dst_image.view_mut();
        let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

        resizer
            .resize(&src_image.view(), &mut dst_view)
            .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

        if mode.has_alpha() {
            alpha_mul_div
                .divide_alpha_inplace(&mut dst_view)
                .map_err(|e| ImageError::resize_failed(format!("Alpha divide failed: {:?}", e)))?;
        }
    }

    tracing::trace!(
        from_width = source.0,
        from_height = source.1,
        to_width = target.width,
        to_height = target.height,
        ?mode,
        "Resampled buffer"
    );

    Ok(dst_image.into_vec())
}
