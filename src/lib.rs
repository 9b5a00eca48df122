// imgframe: image resizing with logo and text overlays

pub mod config;
pub mod logging;
pub mod overlay;
pub mod pipeline;
pub mod resize;

pub use overlay::{apply_overlays, OverlayReport, OverlayResult, OverlaySpec};
pub use pipeline::{Pipeline, ProcessedImage};
pub use resize::{compute_and_resample, Canvas, ImageError, SizeRequest};
