//! Pure dimension math for resize requests.
//!
//! Nothing here touches pixels, so every rule is unit testable with plain
//! integers.

use super::error::ImageError;

/// A validated resize request: target box plus aspect policy.
///
/// Both target dimensions are guaranteed to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRequest {
    width: u32,
    height: u32,
    maintain_aspect: bool,
}

impl SizeRequest {
    /// Validate and build a request.
    ///
    /// Accepts signed values because they usually come straight from user
    /// input; zero or negative values are rejected.
    pub fn new(width: i64, height: i64, maintain_aspect: bool) -> Result<Self, ImageError> {
        if width <= 0 || height <= 0 {
            return Err(ImageError::invalid_dimensions(
                width,
                height,
                "target dimensions must be positive",
            ));
        }
        if width > u32::MAX as i64 || height > u32::MAX as i64 {
            return Err(ImageError::invalid_dimensions(
                width,
                height,
                "target dimensions are out of range",
            ));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            maintain_aspect,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn maintain_aspect(&self) -> bool {
        self.maintain_aspect
    }
}

/// Final output size of a resize. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedSize {
    pub width: u32,
    pub height: u32,
}

impl ComputedSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

/// Calculate the output size for a source image and a request.
///
/// Without aspect preservation the target box is returned verbatim. With it,
/// the source is scaled by `min(target_w / source_w, target_h / source_h)`
/// and each side is floored, so the result fits inside the box (contain,
/// never cover). Integer arithmetic keeps the limiting side exact.
///
/// # Examples
/// ```
/// # use imgframe::resize::{calculate_dimensions, SizeRequest};
/// let request = SizeRequest::new(1000, 1000, true).unwrap();
/// let size = calculate_dimensions((2000, 1000), &request);
/// assert_eq!((size.width, size.height), (1000, 500));
/// ```
pub fn calculate_dimensions(source: (u32, u32), request: &SizeRequest) -> ComputedSize {
    if !request.maintain_aspect {
        return ComputedSize::new(request.width, request.height);
    }

    let (src_w, src_h) = (source.0.max(1) as u64, source.1.max(1) as u64);
    let (tgt_w, tgt_h) = (request.width as u64, request.height as u64);

    // tgt_w / src_w <= tgt_h / src_h  <=>  tgt_w * src_h <= tgt_h * src_w
    let (width, height) = if tgt_w * src_h <= tgt_h * src_w {
        // Width is the limiting side
        (tgt_w, src_h * tgt_w / src_w)
    } else {
        (src_w * tgt_h / src_h, tgt_h)
    };

    ComputedSize::new(width as u32, height as u32)
}
