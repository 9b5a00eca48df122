//! Input validation for resize requests
//!
//! Provides:
//! - Image bomb protection (dimension validation)
//! - Input size limits

use image::io::Reader as ImageReader;
use std::io::Cursor;

use super::config::ImageConfig;
use super::error::ImageError;

/// Read the image dimensions from the header without decoding pixels
pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::decode_failed(e.to_string()))?
        .into_dimensions()
        .map_err(|e| ImageError::decode_failed(e.to_string()))
}

/// Validate image dimensions against the configured limits
///
/// This should be called BEFORE resampling so that neither a huge source
/// nor a huge requested canvas gets allocated.
pub fn validate_dimensions(width: u32, height: u32, config: &ImageConfig) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::invalid_dimensions(
            width as i64,
            height as i64,
            "dimensions must be positive",
        ));
    }

    // Check individual dimensions
    if width > config.max_width || height > config.max_height {
        return Err(ImageError::image_bomb(width, height, config.max_pixels));
    }

    // Check total pixels
    let pixels = width as u64 * height as u64;
    if pixels > config.max_pixels {
        return Err(ImageError::image_bomb(width, height, config.max_pixels));
    }

    Ok(())
}

/// Validate the size a request would produce.
///
/// Same limits as for sources, but reported as a bad request rather than a
/// hostile image.
pub fn validate_output_dimensions(
    width: u32,
    height: u32,
    config: &ImageConfig,
) -> Result<(), ImageError> {
    validate_dimensions(width, height, config).map_err(|e| match e {
        ImageError::ImageBombDetected { max_pixels, .. } => ImageError::invalid_dimensions(
            width as i64,
            height as i64,
            format!(
                "output exceeds limits ({}x{}, {} pixels)",
                config.max_width, config.max_height, max_pixels
            ),
        ),
        other => other,
    })
}

/// Validate encoded input size
pub fn validate_file_size(size: usize, config: &ImageConfig) -> Result<(), ImageError> {
    if size > config.max_input_bytes {
        return Err(ImageError::FileTooLarge {
            size,
            max_size: config.max_input_bytes,
        });
    }
    Ok(())
}
