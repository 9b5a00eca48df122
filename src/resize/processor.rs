//! Resize stage entry point

use super::canvas::Canvas;
use super::dimensions::{calculate_dimensions, SizeRequest};
use super::error::ImageError;
use super::resampler::resample;

/// Compute the output size for `source` and resample it.
///
/// Consumes the source canvas. Any failure is fatal and no partial canvas
/// is returned. The request itself is already validated, so the only
/// errors left come from the resampler.
pub fn compute_and_resample(source: Canvas, request: &SizeRequest) -> Result<Canvas, ImageError> {
    let original = source.dimensions();
    let size = calculate_dimensions(original, request);

    tracing::debug!(
        original_width = original.0,
        original_height = original.1,
        target_width = request.width(),
        target_height = request.height(),
        maintain_aspect = request.maintain_aspect(),
        width = size.width,
        height = size.height,
        "Computed output dimensions"
    );

    resample(source, size)
}

/// Decode encoded bytes, then resize. Undecodable input is
/// [`ImageError::DecodeFailed`].
pub fn decode_and_resample(data: &[u8], request: &SizeRequest) -> Result<Canvas, ImageError> {
    let source = Canvas::decode(data)?;
    compute_and_resample(source, request)
}
