//! Overlay error types.
//!
//! These never escape [`apply_overlays`](super::apply_overlays): a failing
//! stage is recorded in the report and the canvas is left as it was.

use std::fmt;

/// Errors that can occur inside an overlay stage.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// Logo bytes could not be read or decoded
    Decode(String),

    /// Requested overlay size collapses to zero (or is not a number)
    DegenerateSize(String),

    /// No usable font, not even the built-in one
    Font(String),

    /// Resampling or drawing failed
    Render(String),

    /// Text color is not `#RGB` or `#RRGGBB`
    InvalidColor(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "Failed to decode overlay image: {}", msg),
            Self::DegenerateSize(msg) => write!(f, "Degenerate overlay size: {}", msg),
            Self::Font(msg) => write!(f, "Font unavailable: {}", msg),
            Self::Render(msg) => write!(f, "Failed to render overlay: {}", msg),
            Self::InvalidColor(msg) => write!(f, "Invalid color: {}", msg),
        }
    }
}

impl std::error::Error for OverlayError {}
