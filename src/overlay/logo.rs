//! Logo overlay preparation.
//!
//! Preparing a logo only needs the canvas size, so decoding and scaling
//! can fail without touching the canvas at all.

use image::RgbaImage;

use super::config::LogoSpec;
use super::error::OverlayError;
use super::position::{logo_position, Dimensions, PlacementPosition};
use crate::resize::{
    probe_dimensions, resample_rgba, validate_dimensions, ComputedSize, ImageConfig,
};

/// A scaled logo and where it goes.
#[derive(Clone)]
pub struct LogoLayer {
    /// The logo image (RGBA).
    pub image: RgbaImage,
    /// Top-left corner on the canvas.
    pub position: PlacementPosition,
}

impl std::fmt::Debug for LogoLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoLayer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("position", &self.position)
            .finish()
    }
}

/// Logo size for a canvas width.
///
/// The width is `floor(canvas_width * size_fraction)` and the height keeps
/// the logo's own aspect ratio, floored. A result outside the default image
/// limits (8192px per side, 50M pixels) is rejected before anything is
/// allocated.
pub fn scaled_logo_size(
    canvas_width: u32,
    logo: Dimensions,
    size_fraction: f32,
) -> Result<Dimensions, OverlayError> {
    if !size_fraction.is_finite() || size_fraction <= 0.0 {
        return Err(OverlayError::DegenerateSize(format!(
            "size fraction must be positive, got {}",
            size_fraction
        )));
    }

    // Multiply in f32 so 800 * 0.7 is 560 rather than 559.99...
    let width = (canvas_width as f32 * size_fraction).floor() as f64;
    if width < 1.0 || logo.width == 0 {
        return Err(OverlayError::DegenerateSize(format!(
            "logo width is 0 at {} of {}px",
            size_fraction, canvas_width
        )));
    }

    let height = (logo.height as f64 * (width / logo.width as f64)).floor();
    if height < 1.0 {
        return Err(OverlayError::DegenerateSize(format!(
            "logo height is 0 for a {}x{} logo scaled to {}px wide",
            logo.width, logo.height, width
        )));
    }

    // Float to int casts saturate, so anything huge still fails the limits
    let size = Dimensions::new(width as u32, height as u32);
    validate_dimensions(size.width, size.height, &ImageConfig::default())
        .map_err(|e| OverlayError::DegenerateSize(e.to_string()))?;
    Ok(size)
}

/// Decode, scale and position a logo for a canvas of the given size.
pub fn prepare_logo(spec: &LogoSpec, canvas: Dimensions) -> Result<LogoLayer, OverlayError> {
    // Refuse oversized logos from the header, before decoding
    let (width, height) =
        probe_dimensions(&spec.data).map_err(|e| OverlayError::Decode(e.to_string()))?;
    validate_dimensions(width, height, &ImageConfig::default())
        .map_err(|e| OverlayError::Decode(e.to_string()))?;

    let decoded =
        image::load_from_memory(&spec.data).map_err(|e| OverlayError::Decode(e.to_string()))?;
    let logo = decoded.to_rgba8();

    let size = scaled_logo_size(
        canvas.width,
        Dimensions::new(logo.width(), logo.height()),
        spec.size_fraction,
    )?;

    let image = resample_rgba(logo, ComputedSize::new(size.width, size.height))
        .map_err(|e| OverlayError::Render(e.to_string()))?;
    let position = logo_position(spec.anchor, canvas, size);

    tracing::debug!(
        width = size.width,
        height = size.height,
        x = position.x,
        y = position.y,
        anchor = spec.anchor.as_str(),
        "Prepared logo overlay"
    );

    Ok(LogoLayer { image, position })
}
