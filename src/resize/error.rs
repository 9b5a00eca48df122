//! Resize error types
//!
//! Every variant here is fatal for a transformation: the caller gets the
//! error and no partial canvas. Overlay problems never end up here, see
//! [`crate::overlay::OverlayError`].

use std::fmt;

/// Errors that abort a resize operation
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    // === Decoding Errors ===
    /// Failed to decode source image data
    DecodeFailed { message: String },
    /// Image format is not supported for output
    UnsupportedFormat { format: String },

    // === Processing Errors ===
    /// Resize operation failed
    ResizeFailed { message: String },
    /// Encoding to output format failed
    EncodeFailed { format: String, message: String },

    // === Input Limits ===
    /// Image dimensions exceed safety limits (image bomb protection)
    ImageBombDetected {
        width: u32,
        height: u32,
        pixels: u64,
        max_pixels: u64,
    },
    /// Input file size exceeds limit
    FileTooLarge { size: usize, max_size: usize },

    // === Parameter Errors ===
    /// Requested dimensions are invalid
    InvalidDimensions {
        width: i64,
        height: i64,
        reason: String,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::DecodeFailed { message } => {
                write!(f, "Failed to decode image: {}", message)
            }
            ImageError::UnsupportedFormat { format } => {
                write!(f, "Unsupported image format: {}", format)
            }
            ImageError::ResizeFailed { message } => {
                write!(f, "Resize failed: {}", message)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            ImageError::ImageBombDetected {
                width,
                height,
                pixels,
                max_pixels,
            } => {
                write!(
                    f,
                    "Image dimensions {}x{} ({} pixels) exceed limit of {} pixels",
                    width, height, pixels, max_pixels
                )
            }
            ImageError::FileTooLarge { size, max_size } => {
                write!(
                    f,
                    "File size {} bytes exceeds maximum {} bytes",
                    size, max_size
                )
            }
            ImageError::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    pub fn decode_failed(message: impl Into<String>) -> Self {
        ImageError::DecodeFailed {
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImageError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        ImageError::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_dimensions(width: i64, height: i64, reason: impl Into<String>) -> Self {
        ImageError::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    pub fn image_bomb(width: u32, height: u32, max_pixels: u64) -> Self {
        ImageError::ImageBombDetected {
            width,
            height,
            pixels: width as u64 * height as u64,
            max_pixels,
        }
    }

    /// True when the error was caused by the caller's input rather than
    /// by an internal processing failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImageError::DecodeFailed { .. }
                | ImageError::UnsupportedFormat { .. }
                | ImageError::ImageBombDetected { .. }
                | ImageError::FileTooLarge { .. }
                | ImageError::InvalidDimensions { .. }
        )
    }
}
