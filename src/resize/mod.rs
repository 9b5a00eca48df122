//! Resize stage of the transformation pipeline
//!
//! Provides:
//! - Owned RGB/RGBA canvases and decoding
//! - Fit/contain or stretch dimension math
//! - Lanczos3 resampling with alpha preserved
//! - Output encoders (JPEG, PNG, WebP) and input limits
//!
//! Every error in this module is fatal for the transformation.

pub mod canvas;
pub mod config;
pub mod dimensions;
pub mod encoder;
pub mod error;
pub mod params;
pub mod presets;
pub mod processor;
pub mod resampler;
pub mod security;

pub use canvas::{Canvas, ColorMode};
pub use config::ImageConfig;
pub use dimensions::{calculate_dimensions, ComputedSize, SizeRequest};
pub use encoder::{encode, EncodedImage, EncoderFactory, EncoderQuality, ImageEncoder};
pub use error::ImageError;
pub use params::OutputFormat;
pub use presets::Preset;
pub use processor::{compute_and_resample, decode_and_resample};
pub use resampler::{resample, resample_rgba};
pub use security::{
    probe_dimensions, validate_dimensions, validate_file_size, validate_output_dimensions,
};
